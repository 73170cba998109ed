use std::io::Write;

use nalgebra as na;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::binding::ViewBinding;
use crate::homography::Homography;
use crate::link::LinkedRois;
use crate::types::{Direction, RoiPose};
use crate::{Error, Result};

/// Serializes an object to a JSON file.
pub fn object_to_json<T: Serialize>(output_path: &str, object: &T) -> Result<()> {
    let j = serde_json::to_string_pretty(object).map_err(|e| Error::Config(e.to_string()))?;
    let mut file = std::fs::File::create(output_path).map_err(|e| Error::Config(e.to_string()))?;
    file.write_all(j.as_bytes())
        .map_err(|e| Error::Config(e.to_string()))?;
    Ok(())
}

/// Deserializes an object from a JSON file.
pub fn object_from_json<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let contents =
        std::fs::read_to_string(file_path).map_err(|e| Error::Config(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| Error::Config(e.to_string()))
}

/// Pixel dimensions of one view's image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
}

/// Setup configuration for one linked ROI pair.
///
/// The homography is given row-major, mapping first-view pixel
/// coordinates (column vectors, x first) into second-view pixel
/// coordinates. The first view is bound forward, the second inverse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    pub homography: [[f64; 3]; 3],
    pub first: ViewConfig,
    pub second: ViewConfig,
    /// Initial pose of the first ROI; defaults to a centered square.
    pub initial_pose: Option<RoiPose>,
}

impl LinkConfig {
    pub fn from_json(file_path: &str) -> Result<LinkConfig> {
        object_from_json(file_path)
    }

    pub fn to_json(&self, output_path: &str) -> Result<()> {
        object_to_json(output_path, self)
    }

    pub fn homography_matrix(&self) -> na::Matrix3<f64> {
        na::Matrix3::from_row_slice(&[
            self.homography[0][0],
            self.homography[0][1],
            self.homography[0][2],
            self.homography[1][0],
            self.homography[1][1],
            self.homography[1][2],
            self.homography[2][0],
            self.homography[2][1],
            self.homography[2][2],
        ])
    }

    /// Builds the validated pair; fails fast on a singular matrix.
    pub fn into_link(self) -> Result<LinkedRois> {
        let homography = Homography::new(self.homography_matrix())?;
        let first = ViewBinding::new(self.first.width, self.first.height, Direction::Forward);
        let second = ViewBinding::new(self.second.width, self.second.height, Direction::Inverse);
        match self.initial_pose {
            Some(pose) => LinkedRois::with_initial_pose(first, second, homography, pose),
            None => LinkedRois::new(first, second, homography),
        }
    }
}
