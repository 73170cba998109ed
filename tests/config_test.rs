use glam::DVec2;
use roi_link::{Error, LinkConfig, RoiPose, ViewSide};
use roi_link::io::{ViewConfig, object_from_json};
use tempfile::TempDir;

fn demo_config() -> LinkConfig {
    LinkConfig {
        homography: [[1.0, 0.0, 10.0], [0.0, 1.0, -20.0], [0.0, 0.0, 1.0]],
        first: ViewConfig {
            width: 300,
            height: 200,
        },
        second: ViewConfig {
            width: 300,
            height: 200,
        },
        initial_pose: None,
    }
}

#[test]
fn test_config_json_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("link.json");
    let path = path.to_str().unwrap();

    let mut config = demo_config();
    config.initial_pose = Some(RoiPose::new(
        DVec2::new(5.0, 6.0),
        DVec2::new(40.0, 30.0),
        12.5,
    ));
    config.to_json(path).unwrap();

    let loaded = LinkConfig::from_json(path).unwrap();
    assert_eq!(loaded.homography, config.homography);
    assert_eq!(loaded.first.width, 300);
    assert_eq!(loaded.second.height, 200);
    let pose = loaded.initial_pose.unwrap();
    assert!((pose.origin.x - 5.0).abs() < 1e-12);
    assert!((pose.rotation_deg - 12.5).abs() < 1e-12);
}

#[test]
fn test_config_builds_translated_link() {
    // Pure translation homography: the second ROI is the first shifted
    // by (10, -20), same size and rotation.
    let link = demo_config().into_link().unwrap();

    let first = link.pose(ViewSide::First);
    let second = link.pose(ViewSide::Second);
    assert!((second.origin - (first.origin + DVec2::new(10.0, -20.0))).length() < 1e-9);
    assert!((second.size - first.size).length() < 1e-9);
    assert!(second.rotation_deg.abs() < 1e-9);
}

#[test]
fn test_config_initial_pose_honored() {
    let mut config = demo_config();
    let initial = RoiPose::new(DVec2::new(11.0, 22.0), DVec2::new(33.0, 44.0), 7.0);
    config.initial_pose = Some(initial);

    let link = config.into_link().unwrap();
    assert_eq!(*link.pose(ViewSide::First), initial);
}

#[test]
fn test_config_singular_homography_fails_setup() {
    let mut config = demo_config();
    config.homography = [[1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
    let err = config.into_link().unwrap_err();
    assert!(matches!(err, Error::SingularTransform(_)));
}

#[test]
fn test_missing_or_malformed_config_file() {
    let err = LinkConfig::from_json("does_not_exist.json").unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err: Error = object_from_json::<LinkConfig>(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
