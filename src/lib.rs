//! Homography-linked region-of-interest synchronization.
//!
//! Two rectangular ROIs sit over two views of related image content, the
//! views tied together by a known planar homography. Editing either ROI
//! (move, resize, rotate) recomputes the other so both keep delimiting the
//! same scene region, each expressed in its own view's pixel frame.
//!
//! The crate is UI-free: image decoding, rendering and input capture live
//! behind the view collaborator that owns the [`LinkedRois`] pair. All
//! state (homography, bindings, poses) is passed explicitly; nothing here
//! touches process-wide singletons.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec2;
//! use roi_link::{Direction, Homography, LinkedRois, RoiPose, ViewBinding, ViewSide};
//!
//! let homography = Homography::rotation_about(DVec2::splat(150.0), 45.0);
//! let first = ViewBinding::new(300, 300, Direction::Forward);
//! let second = ViewBinding::new(300, 300, Direction::Inverse);
//! let mut link = LinkedRois::new(first, second, homography).unwrap();
//!
//! let edit = RoiPose::new(DVec2::new(20.0, 40.0), DVec2::new(80.0, 60.0), 10.0);
//! link.apply_edit(ViewSide::First, edit).unwrap();
//! let synced = link.pose(ViewSide::Second);
//! assert!((synced.rotation_deg - 55.0).abs() < 1e-9);
//! ```

pub mod binding;
pub mod homography;
pub mod io;
pub mod link;
pub mod mapper;
pub mod types;

pub use binding::ViewBinding;
pub use homography::Homography;
pub use io::LinkConfig;
pub use link::{LinkedRois, Roi};
pub use mapper::map_pose;
pub use types::{Direction, RoiPose, ViewSide};

pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    use crate::types::Direction;

    /// Errors raised while linking views or mapping poses.
    #[derive(Error, Debug)]
    pub enum Error {
        /// The homography cannot be inverted; the pair cannot be built.
        #[error("singular homography, cannot link views:\n{0}")]
        SingularTransform(String),

        /// A mapped point's homogeneous weight is (near) zero.
        #[error("mapped point at infinity (w = {w:e}), update skipped")]
        PointAtInfinity { w: f64 },

        /// The transformed ROI axis collapsed; rotation is undefined.
        #[error("degenerate ROI {axis} axis, rotation undefined, update skipped")]
        DegenerateAxis { axis: char },

        /// Both view bindings claim the same homography direction.
        #[error("both views bound to the {0:?} homography direction")]
        BindingMismatch(Direction),

        /// A pose violates its invariants (negative size).
        #[error("invalid ROI pose: {0}")]
        InvalidPose(String),

        /// Setup configuration could not be read or parsed.
        #[error("config error: {0}")]
        Config(String),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}
