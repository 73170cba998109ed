use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use nalgebra as na;
use roi_link::{Direction, Error, Homography, LinkedRois, RoiPose, ViewBinding, ViewSide, map_pose};

fn demo_link() -> LinkedRois {
    let homography = Homography::rotation_about(DVec2::splat(150.0), 45.0);
    LinkedRois::new(
        ViewBinding::new(300, 300, Direction::Forward),
        ViewBinding::new(300, 300, Direction::Inverse),
        homography,
    )
    .unwrap()
}

#[test]
fn test_initial_sync_uses_default_pose() {
    let link = demo_link();

    // 300x300 image: centered square of side 100.
    let first = link.pose(ViewSide::First);
    assert!((first.origin - DVec2::splat(100.0)).length() < 1e-9);
    assert!((first.size - DVec2::splat(100.0)).length() < 1e-9);
    assert!(first.rotation_deg.abs() < 1e-9);

    // The second ROI was synced at construction: pure rotation keeps the
    // size and adds the homography angle.
    let second = link.pose(ViewSide::Second);
    assert!((second.size - DVec2::splat(100.0)).length() < 1e-9);
    assert!((second.rotation_deg - 45.0).abs() < 1e-9);
}

#[test]
fn test_pair_invariant_after_edits() {
    // At rest both ROIs must denote the same scene region: mapping the
    // edited side's pose again must reproduce the other side's pose.
    let mut link = demo_link();

    let edits = [
        (
            ViewSide::First,
            RoiPose::new(DVec2::new(30.0, 55.0), DVec2::new(120.0, 40.0), 12.0),
        ),
        (
            ViewSide::Second,
            RoiPose::new(DVec2::new(140.0, 90.0), DVec2::new(66.0, 66.0), -30.0),
        ),
        (
            ViewSide::First,
            RoiPose::new(DVec2::new(10.0, 10.0), DVec2::new(10.0, 200.0), 181.0),
        ),
    ];

    for (side, pose) in edits {
        link.apply_edit(side, pose).unwrap();

        let source = link.roi(side);
        let target = link.roi(side.other());
        let expected = map_pose(
            source.pose(),
            source.binding(),
            target.binding(),
            link.homography(),
        )
        .unwrap();

        assert!((target.pose().origin - expected.origin).length() < 1e-9);
        assert!((target.pose().size - expected.size).length() < 1e-9);
        assert!((target.pose().rotation_deg - expected.rotation_deg).abs() < 1e-9);
    }
}

#[test]
fn test_one_sync_notification_per_edit() {
    // Feedback suppression: an edit triggers exactly one sync of the
    // opposite side, never a second notification for the same edit.
    let mut link = demo_link();
    let synced: Rc<RefCell<Vec<ViewSide>>> = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&synced);
    link.on_synced(move |side, _pose| log.borrow_mut().push(side));

    let pose = RoiPose::new(DVec2::new(40.0, 60.0), DVec2::new(90.0, 90.0), 5.0);
    link.apply_edit(ViewSide::First, pose).unwrap();
    assert_eq!(synced.borrow().as_slice(), &[ViewSide::Second]);

    link.apply_edit(ViewSide::Second, pose).unwrap();
    assert_eq!(
        synced.borrow().as_slice(),
        &[ViewSide::Second, ViewSide::First]
    );
}

#[test]
fn test_recoverable_failure_keeps_target_pose() {
    // A perspective transform sends the line w = 0.01 x + 1 = 0 to
    // infinity; an edit whose origin lands on it must leave the other
    // ROI untouched and report the reason.
    let mat = na::Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.01, 0.0, 1.0,
    );
    let homography = Homography::new(mat).unwrap();
    let mut link = LinkedRois::new(
        ViewBinding::new(300, 300, Direction::Forward),
        ViewBinding::new(300, 300, Direction::Inverse),
        homography,
    )
    .unwrap();

    let before = *link.pose(ViewSide::Second);
    let bad = RoiPose::new(DVec2::new(-100.0, 0.0), DVec2::new(50.0, 50.0), 0.0);
    let err = link.apply_edit(ViewSide::First, bad).unwrap_err();
    assert!(matches!(err, Error::PointAtInfinity { .. }));

    // The edit itself is recorded, the target pose is not.
    assert_eq!(*link.pose(ViewSide::First), bad);
    assert_eq!(*link.pose(ViewSide::Second), before);
}

#[test]
fn test_mismatched_bindings_rejected_at_setup() {
    let homography = Homography::identity();
    let result = LinkedRois::new(
        ViewBinding::new(300, 300, Direction::Forward),
        ViewBinding::new(300, 300, Direction::Forward),
        homography,
    );
    assert!(matches!(result, Err(Error::BindingMismatch(_))));
}
