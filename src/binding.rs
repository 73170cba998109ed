use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::{Direction, RoiPose};

/// Binds a logical ROI to the view it overlays.
///
/// Carries the image's pixel dimensions and which homography direction
/// converts points from this view's pixel frame into the other view's.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewBinding {
    pub image_width: u32,
    pub image_height: u32,
    pub direction: Direction,
}

impl ViewBinding {
    pub fn new(image_width: u32, image_height: u32, direction: Direction) -> ViewBinding {
        ViewBinding {
            image_width,
            image_height,
            direction,
        }
    }

    /// Embeds a point from the ROI's local frame into the image pixel
    /// frame: rotate by the pose rotation, then translate by the origin.
    pub fn local_to_image(&self, pose: &RoiPose, p: DVec2) -> DVec2 {
        let (s, c) = pose.rotation_deg.to_radians().sin_cos();
        let rotated = DVec2::new(c * p.x - s * p.y, s * p.x + c * p.y);
        pose.origin + rotated
    }

    /// Initial pose for a freshly linked ROI: an axis-aligned square of
    /// side min(width, height) / 3 centered in the image.
    pub fn default_pose(&self) -> RoiPose {
        let side = self.image_width.min(self.image_height) as f64 / 3.0;
        let origin = DVec2::new(
            (self.image_width as f64 - side) / 2.0,
            (self.image_height as f64 - side) / 2.0,
        );
        RoiPose::new(origin, DVec2::splat(side), 0.0)
    }
}
