use clap::Parser;
use glam::DVec2;
use log::info;
use roi_link::{Direction, Homography, LinkConfig, LinkedRois, RoiPose, ViewBinding, ViewSide};

/// Links two ROIs through a homography and replays a few edits.
///
/// Without a config file the second view is fabricated the same way the
/// classic demo does it: the first image rotated about its center.
#[derive(Parser)]
#[command(version, about, author)]
struct RoiLinkCli {
    /// path to a JSON LinkConfig; overrides the synthetic homography
    #[arg(long)]
    config: Option<String>,

    /// image width in pixels
    #[arg(long, default_value_t = 300)]
    width: u32,

    /// image height in pixels
    #[arg(long, default_value_t = 300)]
    height: u32,

    /// CCW rotation of the synthetic homography, degrees
    #[arg(long, default_value_t = 45.0)]
    angle: f64,
}

fn print_pair(link: &LinkedRois) {
    for side in [ViewSide::First, ViewSide::Second] {
        let p = link.pose(side);
        println!(
            "{:?}: origin ({:.3}, {:.3}), size ({:.3}, {:.3}), rotation {:.3} deg",
            side, p.origin.x, p.origin.y, p.size.x, p.size.y, p.rotation_deg
        );
    }
}

fn main() -> roi_link::Result<()> {
    env_logger::init();
    let cli = RoiLinkCli::parse();

    let mut link = match &cli.config {
        Some(path) => LinkConfig::from_json(path)?.into_link()?,
        None => {
            let center = DVec2::new(cli.width as f64 / 2.0, cli.height as f64 / 2.0);
            let homography = Homography::rotation_about(center, cli.angle);
            LinkedRois::new(
                ViewBinding::new(cli.width, cli.height, Direction::Forward),
                ViewBinding::new(cli.width, cli.height, Direction::Inverse),
                homography,
            )?
        }
    };

    link.on_synced(|side, pose| {
        info!(
            "{:?} synced to origin ({:.3}, {:.3}), rotation {:.3} deg",
            side, pose.origin.x, pose.origin.y, pose.rotation_deg
        );
    });

    println!("initial poses:");
    print_pair(&link);

    // A drag, a resize and a rotation of the first ROI, then a drag of
    // the second one back the other way.
    let base = *link.pose(ViewSide::First);
    let edits = [
        (
            ViewSide::First,
            RoiPose::new(base.origin + DVec2::new(25.0, -10.0), base.size, base.rotation_deg),
        ),
        (
            ViewSide::First,
            RoiPose::new(base.origin, base.size * 0.5, base.rotation_deg),
        ),
        (
            ViewSide::First,
            RoiPose::new(base.origin, base.size, base.rotation_deg + 30.0),
        ),
        (
            ViewSide::Second,
            RoiPose::new(base.origin - DVec2::new(15.0, 5.0), base.size, base.rotation_deg),
        ),
    ];

    for (i, (side, pose)) in edits.iter().enumerate() {
        println!("\nedit {} on {:?}:", i + 1, side);
        link.apply_edit(*side, *pose)?;
        print_pair(&link);
    }
    Ok(())
}
