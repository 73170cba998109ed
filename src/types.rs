use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pose of a rectangular ROI in its owning view's pixel frame.
///
/// `rotation_deg` is measured counter-clockwise from the frame's positive X
/// axis to the ROI's local X axis. Size components are required to be >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiPose {
    pub origin: DVec2,
    pub size: DVec2,
    pub rotation_deg: f64,
}

impl RoiPose {
    pub fn new(origin: DVec2, size: DVec2, rotation_deg: f64) -> RoiPose {
        RoiPose {
            origin,
            size,
            rotation_deg,
        }
    }
}

/// Which of the two linked views a ROI belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewSide {
    First,
    Second,
}

impl ViewSide {
    pub fn other(&self) -> ViewSide {
        match self {
            ViewSide::First => ViewSide::Second,
            ViewSide::Second => ViewSide::First,
        }
    }
}

/// Which stored matrix of a [`crate::homography::Homography`] to apply.
///
/// The ROI bound to the first image maps its points forward; the ROI bound
/// to the second image maps through the inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }
}

/// Folds an angle in degrees into (-180, 180].
pub fn normalize_angle_deg(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}
