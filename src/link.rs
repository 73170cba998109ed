use glam::DVec2;
use log::{debug, warn};

use crate::binding::ViewBinding;
use crate::homography::Homography;
use crate::mapper::map_pose;
use crate::types::{RoiPose, ViewSide};
use crate::{Error, Result};

/// A ROI together with its view binding.
#[derive(Debug, Clone)]
pub struct Roi {
    pose: RoiPose,
    binding: ViewBinding,
}

impl Roi {
    pub fn pose(&self) -> &RoiPose {
        &self.pose
    }

    pub fn binding(&self) -> &ViewBinding {
        &self.binding
    }

    /// Current ROI extents in its local frame.
    pub fn size(&self) -> DVec2 {
        self.pose.size
    }

    /// Embeds a local-frame point into the owning image's pixel frame.
    pub fn map_local_to_image(&self, p: DVec2) -> DVec2 {
        self.binding.local_to_image(&self.pose, p)
    }

    // Silent application path: never dispatches an edit.
    fn set_pose(&mut self, pose: RoiPose) {
        self.pose = pose;
    }
}

/// Callback invoked after a successful sync with the updated side's pose.
pub type SyncHandler = Box<dyn FnMut(ViewSide, &RoiPose)>;

/// Two ROIs over two views, kept pointing at the same scene region.
///
/// This is the dispatch layer around [`map_pose`]: one mapping per edit,
/// applied to the opposite ROI through the silent path so the update never
/// re-enters dispatch. An explicit `update_in_progress` flag guards
/// against re-entrant edit delivery; without it two mutually linked ROIs
/// would ping-pong updates forever.
pub struct LinkedRois {
    first: Roi,
    second: Roi,
    homography: Homography,
    update_in_progress: bool,
    handlers: Vec<SyncHandler>,
}

impl std::fmt::Debug for LinkedRois {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedRois")
            .field("first", &self.first)
            .field("second", &self.second)
            .field("homography", &self.homography)
            .field("update_in_progress", &self.update_in_progress)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl LinkedRois {
    /// Links two views, seeding the first ROI with its default centered
    /// pose and syncing the second from it.
    pub fn new(
        first: ViewBinding,
        second: ViewBinding,
        homography: Homography,
    ) -> Result<LinkedRois> {
        let initial = first.default_pose();
        Self::with_initial_pose(first, second, homography, initial)
    }

    /// Links two views with an explicit initial pose for the first ROI.
    ///
    /// Fails fast with [`Error::BindingMismatch`] when both bindings name
    /// the same homography direction; the initial sync's mapping errors
    /// also propagate, since a pair that cannot map its starting pose is
    /// not usable.
    pub fn with_initial_pose(
        first: ViewBinding,
        second: ViewBinding,
        homography: Homography,
        initial: RoiPose,
    ) -> Result<LinkedRois> {
        if first.direction == second.direction {
            return Err(Error::BindingMismatch(first.direction));
        }
        let mut link = LinkedRois {
            first: Roi {
                pose: initial,
                binding: first,
            },
            second: Roi {
                pose: initial,
                binding: second,
            },
            homography,
            update_in_progress: false,
            handlers: Vec::new(),
        };
        link.apply_edit(ViewSide::First, initial)?;
        Ok(link)
    }

    pub fn roi(&self, side: ViewSide) -> &Roi {
        match side {
            ViewSide::First => &self.first,
            ViewSide::Second => &self.second,
        }
    }

    pub fn pose(&self, side: ViewSide) -> &RoiPose {
        self.roi(side).pose()
    }

    pub fn homography(&self) -> &Homography {
        &self.homography
    }

    /// Registers a callback fired once per successful sync, with the side
    /// whose pose was recomputed. This is the render hook for the view
    /// collaborator; poses applied through it must not be fed back into
    /// [`LinkedRois::apply_edit`].
    pub fn on_synced(&mut self, handler: impl FnMut(ViewSide, &RoiPose) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Delivers a user edit of `side`'s ROI and recomputes the other.
    ///
    /// The edited pose is always recorded. On a recoverable mapping
    /// failure (point at infinity, degenerate axis) the opposite ROI keeps
    /// its previous pose, a warning is logged and the reason is returned;
    /// no partial geometry is ever applied.
    pub fn apply_edit(&mut self, side: ViewSide, pose: RoiPose) -> Result<()> {
        let (source, target) = match side {
            ViewSide::First => (&mut self.first, &mut self.second),
            ViewSide::Second => (&mut self.second, &mut self.first),
        };
        source.set_pose(pose);

        if self.update_in_progress {
            debug!("edit on {:?} delivered mid-update, skipping", side);
            return Ok(());
        }
        self.update_in_progress = true;
        let outcome = map_pose(
            &source.pose,
            &source.binding,
            &target.binding,
            &self.homography,
        );
        let result = match outcome {
            Ok(mapped) => {
                target.set_pose(mapped);
                debug!(
                    "synced {:?} -> {:?}: origin ({:.3}, {:.3}), size ({:.3}, {:.3}), rot {:.3} deg",
                    side,
                    side.other(),
                    mapped.origin.x,
                    mapped.origin.y,
                    mapped.size.x,
                    mapped.size.y,
                    mapped.rotation_deg
                );
                let updated = side.other();
                for handler in &mut self.handlers {
                    handler(updated, &mapped);
                }
                Ok(())
            }
            Err(e) => {
                warn!("edit on {:?} not propagated: {}", side, e);
                Err(e)
            }
        };
        self.update_in_progress = false;
        result
    }
}
