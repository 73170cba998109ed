use glam::DVec2;
use nalgebra as na;

use crate::types::Direction;
use crate::{Error, Result};

/// Weights with |w| at or below this are treated as points at infinity.
pub const W_EPSILON: f64 = 1e-12;

/// A planar projective transform between two image pixel frames.
///
/// Convention, applied uniformly across the crate: 2D points are lifted to
/// column vectors (x, y, 1), transformed as p' = H * p, and recovered by
/// dividing by the third component. The x coordinate always comes first and
/// positive rotation angles are counter-clockwise.
///
/// The inverse is computed once at construction, so both mapping
/// directions are a single matrix multiply at use time.
#[derive(Debug, Clone)]
pub struct Homography {
    mat: na::Matrix3<f64>,
    inv: na::Matrix3<f64>,
}

impl Homography {
    /// Wraps a 3x3 matrix, precomputing its inverse.
    ///
    /// Fails with [`Error::SingularTransform`] when the matrix cannot be
    /// inverted; a ROI pair cannot be linked through such a transform.
    pub fn new(mat: na::Matrix3<f64>) -> Result<Homography> {
        let inv = mat
            .try_inverse()
            .ok_or_else(|| Error::SingularTransform(format!("{:.6}", mat)))?;
        Ok(Homography { mat, inv })
    }

    pub fn identity() -> Homography {
        Homography {
            mat: na::Matrix3::identity(),
            inv: na::Matrix3::identity(),
        }
    }

    /// Rotation by `angle_deg` (CCW) about `center`, composed as
    /// T(c) * R(angle) * T(-c).
    pub fn rotation_about(center: DVec2, angle_deg: f64) -> Homography {
        let (s, c) = angle_deg.to_radians().sin_cos();
        let rotation = na::Matrix3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        );
        let translation = na::Matrix3::new(
            1.0, 0.0, center.x, //
            0.0, 1.0, center.y, //
            0.0, 0.0, 1.0,
        );
        let inv_translation = na::Matrix3::new(
            1.0, 0.0, -center.x, //
            0.0, 1.0, -center.y, //
            0.0, 0.0, 1.0,
        );
        let mat = translation * rotation * inv_translation;
        // A rotation composed with translations is always invertible.
        Homography {
            mat,
            inv: mat.try_inverse().unwrap_or_else(na::Matrix3::identity),
        }
    }

    pub fn matrix(&self, direction: Direction) -> &na::Matrix3<f64> {
        match direction {
            Direction::Forward => &self.mat,
            Direction::Inverse => &self.inv,
        }
    }

    /// Maps a pixel-frame point through the selected direction.
    ///
    /// Returns [`Error::PointAtInfinity`] when the transformed homogeneous
    /// weight is (near) zero, instead of producing NaN geometry.
    pub fn apply(&self, direction: Direction, p: DVec2) -> Result<DVec2> {
        let m = self.matrix(direction);
        let q = m * na::Vector3::new(p.x, p.y, 1.0);
        if q.z.abs() <= W_EPSILON {
            return Err(Error::PointAtInfinity { w: q.z });
        }
        Ok(DVec2::new(q.x / q.z, q.y / q.z))
    }
}
