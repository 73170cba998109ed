use glam::DVec2;

use crate::binding::ViewBinding;
use crate::homography::Homography;
use crate::types::RoiPose;
use crate::{Error, Result};

/// Axis lengths at or below this cannot yield a rotation angle.
pub const AXIS_EPSILON: f64 = 1e-9;

/// Signed CCW angle in degrees from the +X axis to `v`.
///
/// `v` must be non-zero. cos comes from the dot product with (1, 0), the
/// sign from the 2D cross product (1, 0) x v = v.y: positive y means a
/// positive (counter-clockwise) angle.
pub fn signed_angle_deg(v: DVec2) -> f64 {
    let u = v / v.length();
    let rcos = u.x.clamp(-1.0, 1.0);
    let rsin = u.y;
    let angle = rcos.acos();
    let angle = if rsin < 0.0 { -angle } else { angle };
    angle.to_degrees()
}

/// Computes the target-view pose equivalent to `source_pose`, so that both
/// ROIs delimit the same scene region.
///
/// The three reference points (0, 0), (w, 0) and (0, h) of the source
/// ROI's local frame are embedded into the source image's pixel frame,
/// pushed through the homography direction owned by `source_binding`, and
/// w-normalized. The transformed origin is the target origin; the norms of
/// the transformed axis vectors give the target size; the signed angle of
/// the transformed X axis gives the target rotation.
///
/// Pure function: never mutates its inputs, identical inputs give
/// identical output. Failures are reason-coded:
/// - [`Error::BindingMismatch`] if both bindings claim the same
///   homography direction (a miswired pair),
/// - [`Error::InvalidPose`] for negative size components,
/// - [`Error::PointAtInfinity`] if any reference point maps to a (near)
///   zero homogeneous weight,
/// - [`Error::DegenerateAxis`] if the transformed X axis collapses, which
///   leaves the rotation undefined. A collapsed Y axis alone still yields
///   a valid zero-height pose.
pub fn map_pose(
    source_pose: &RoiPose,
    source_binding: &ViewBinding,
    target_binding: &ViewBinding,
    homography: &Homography,
) -> Result<RoiPose> {
    if source_binding.direction == target_binding.direction {
        return Err(Error::BindingMismatch(source_binding.direction));
    }
    if source_pose.size.x < 0.0 || source_pose.size.y < 0.0 {
        return Err(Error::InvalidPose(format!(
            "negative size ({}, {})",
            source_pose.size.x, source_pose.size.y
        )));
    }

    // Origin, X-axis endpoint and Y-axis endpoint in the ROI's local frame.
    let local_points = [
        DVec2::ZERO,
        DVec2::new(source_pose.size.x, 0.0),
        DVec2::new(0.0, source_pose.size.y),
    ];

    let mut mapped = [DVec2::ZERO; 3];
    for (m, p) in mapped.iter_mut().zip(local_points) {
        let in_image = source_binding.local_to_image(source_pose, p);
        *m = homography.apply(source_binding.direction, in_image)?;
    }

    let origin = mapped[0];
    let ux = mapped[1] - origin;
    let uy = mapped[2] - origin;
    let size = DVec2::new(ux.length(), uy.length());

    if size.x <= AXIS_EPSILON {
        return Err(Error::DegenerateAxis { axis: 'x' });
    }
    let rotation_deg = signed_angle_deg(ux);

    Ok(RoiPose::new(origin, size, rotation_deg))
}
