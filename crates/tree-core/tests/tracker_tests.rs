use std::cell::Cell;
use std::rc::Rc;
use tree_core::gesture::{FrameView, SAMPLE_HEIGHT, SAMPLE_WIDTH};
use tree_core::tracker::*;
use tree_core::{CaptureError, ModeController, TreeMode};

const FRAME_BYTES: usize = (SAMPLE_WIDTH * SAMPLE_HEIGHT * 4) as usize;

/// Frame with `n` bright pixels from the top-left corner.
fn frame_with(n: usize) -> Vec<u8> {
    let mut rgba = vec![0u8; FRAME_BYTES];
    for px in rgba.chunks_exact_mut(4).take(n) {
        px[0] = 255;
    }
    rgba
}

struct MockCamera {
    frame: Option<Vec<u8>>,
    fail: bool,
    releases: Rc<Cell<u32>>,
}

impl MockCamera {
    fn new(frame: Option<Vec<u8>>) -> (Self, Rc<Cell<u32>>) {
        let releases = Rc::new(Cell::new(0));
        (
            Self {
                frame,
                fail: false,
                releases: releases.clone(),
            },
            releases,
        )
    }
}

impl FrameSource for MockCamera {
    fn read_frame(
        &mut self,
        width: u32,
        height: u32,
        rgba: &mut Vec<u8>,
    ) -> Result<bool, CaptureError> {
        assert_eq!((width, height), (SAMPLE_WIDTH, SAMPLE_HEIGHT));
        if self.fail {
            return Err(CaptureError::FrameRead("device lost".into()));
        }
        match &self.frame {
            Some(f) => {
                rgba.clear();
                rgba.extend_from_slice(f);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }
}

fn active_tracker(camera: MockCamera) -> GestureTracker<MockCamera> {
    let mut tracker = GestureTracker::new();
    let ticket = tracker.begin_activation();
    tracker.complete_activation(ticket, Ok(camera));
    assert!(tracker.is_active());
    tracker
}

#[test]
fn starts_inactive() {
    let tracker: GestureTracker<MockCamera> = GestureTracker::default();
    assert_eq!(tracker.status(), &GestureStatus::Inactive);
    assert!(tracker.begin_sample().is_none());
}

#[test]
fn activation_then_sampling_applies_gestures() {
    let (camera, releases) = MockCamera::new(Some(frame_with(900)));
    let mut tracker = GestureTracker::new();
    let ticket = tracker.begin_activation();
    assert_eq!(tracker.status(), &GestureStatus::Starting);
    assert!(tracker.is_engaged());
    assert_eq!(
        tracker.complete_activation(ticket, Ok(camera)),
        &GestureStatus::Active
    );

    let mut c = ModeController::new(TreeMode::Formed);
    let outcome = tracker.sample(&mut c);
    assert!(matches!(outcome, SampleOutcome::Applied(_)));
    assert_eq!(c.mode(), TreeMode::Chaos);
    assert_eq!(releases.get(), 0);
}

#[test]
fn permission_denied_fails_without_sampling() {
    let mut tracker: GestureTracker<MockCamera> = GestureTracker::new();
    let ticket = tracker.begin_activation();
    let status = tracker
        .complete_activation(ticket, Err(CaptureError::PermissionDenied))
        .clone();
    assert!(matches!(status, GestureStatus::Failed(_)));
    assert!(!tracker.is_engaged());

    let mut c = ModeController::default();
    assert_eq!(tracker.sample(&mut c), SampleOutcome::Discarded);
}

#[test]
fn camera_arriving_after_deactivation_is_released() {
    let (camera, releases) = MockCamera::new(None);
    let mut tracker = GestureTracker::new();
    let ticket = tracker.begin_activation();
    tracker.deactivate();
    tracker.complete_activation(ticket, Ok(camera));
    assert_eq!(releases.get(), 1);
    assert_eq!(tracker.status(), &GestureStatus::Inactive);
}

#[test]
fn stale_activation_does_not_disturb_a_newer_one() {
    let (old, old_releases) = MockCamera::new(None);
    let (new, new_releases) = MockCamera::new(Some(frame_with(200)));
    let mut tracker = GestureTracker::new();
    let first = tracker.begin_activation();
    tracker.deactivate();
    let second = tracker.begin_activation();

    tracker.complete_activation(first, Ok(old));
    assert_eq!(old_releases.get(), 1);
    assert_eq!(tracker.status(), &GestureStatus::Starting);

    tracker.complete_activation(second, Ok(new));
    assert!(tracker.is_active());
    assert_eq!(new_releases.get(), 0);

    // A stale failure does not override the live session either.
    let third_party = tracker.complete_activation(first, Err(CaptureError::PermissionDenied));
    assert_eq!(third_party, &GestureStatus::Active);
}

#[test]
fn only_the_pending_activation_is_current() {
    let mut tracker: GestureTracker<MockCamera> = GestureTracker::new();
    let first = tracker.begin_activation();
    assert!(tracker.is_current(first));

    // Enable, cancel, enable again while the first request is still open.
    tracker.deactivate();
    assert!(!tracker.is_current(first));
    let second = tracker.begin_activation();
    assert!(!tracker.is_current(first));
    assert!(tracker.is_current(second));

    let (camera, _) = MockCamera::new(None);
    tracker.complete_activation(second, Ok(camera));
    assert!(!tracker.is_current(second), "completed activation is no longer pending");
}

#[test]
fn deactivate_releases_exactly_once() {
    let (camera, releases) = MockCamera::new(None);
    let mut tracker = active_tracker(camera);
    tracker.deactivate();
    tracker.deactivate();
    assert_eq!(releases.get(), 1);
    assert_eq!(tracker.status(), &GestureStatus::Inactive);
}

#[test]
fn dropping_the_tracker_releases_the_camera() {
    let (camera, releases) = MockCamera::new(None);
    let tracker = active_tracker(camera);
    drop(tracker);
    assert_eq!(releases.get(), 1);
}

#[test]
fn reactivation_releases_the_previous_camera() {
    let (first, first_releases) = MockCamera::new(None);
    let mut tracker = active_tracker(first);
    let _ticket = tracker.begin_activation();
    assert_eq!(first_releases.get(), 1);
}

#[test]
fn sample_in_flight_during_deactivation_is_discarded() {
    let (camera, _releases) = MockCamera::new(None);
    let mut tracker = active_tracker(camera);
    let ticket = tracker.begin_sample().unwrap();
    tracker.deactivate();

    let rgba = frame_with(900);
    let frame = FrameView::new(SAMPLE_WIDTH, SAMPLE_HEIGHT, &rgba).unwrap();
    let mut c = ModeController::new(TreeMode::Formed);
    let before = c.clone();
    assert_eq!(
        tracker.complete_sample(ticket, &frame, &mut c),
        SampleOutcome::Discarded
    );
    assert_eq!(c, before);
}

#[test]
fn ticket_from_before_a_restart_is_discarded() {
    let (a, _) = MockCamera::new(None);
    let (b, _) = MockCamera::new(None);
    let mut tracker = active_tracker(a);
    let old = tracker.begin_sample().unwrap();
    tracker.deactivate();
    let t = tracker.begin_activation();
    tracker.complete_activation(t, Ok(b));

    let rgba = frame_with(900);
    let frame = FrameView::new(SAMPLE_WIDTH, SAMPLE_HEIGHT, &rgba).unwrap();
    let mut c = ModeController::default();
    assert_eq!(
        tracker.complete_sample(old, &frame, &mut c),
        SampleOutcome::Discarded
    );
    assert_eq!(c.mode(), TreeMode::Formed);
}

#[test]
fn no_frame_yet_is_not_ready() {
    let (camera, _) = MockCamera::new(None);
    let mut tracker = active_tracker(camera);
    let mut c = ModeController::default();
    assert_eq!(tracker.sample(&mut c), SampleOutcome::NotReady);
    assert!(tracker.is_active());
}

#[test]
fn small_blob_is_ignored() {
    let (camera, _) = MockCamera::new(Some(frame_with(10)));
    let mut tracker = active_tracker(camera);
    let mut c = ModeController::new(TreeMode::Chaos);
    assert_eq!(tracker.sample(&mut c), SampleOutcome::Ignored);
    assert_eq!(c.mode(), TreeMode::Chaos);
}

#[test]
fn read_failure_releases_and_fails() {
    let (mut camera, releases) = MockCamera::new(None);
    camera.fail = true;
    let mut tracker = active_tracker(camera);
    let mut c = ModeController::default();
    assert!(matches!(
        tracker.sample(&mut c),
        SampleOutcome::Failed(CaptureError::FrameRead(_))
    ));
    assert_eq!(releases.get(), 1);
    assert!(matches!(tracker.status(), GestureStatus::Failed(_)));
    assert_eq!(tracker.sample(&mut c), SampleOutcome::Discarded);
    assert_eq!(releases.get(), 1);
}

#[test]
fn toggle_cycles_capture() {
    let (camera, releases) = MockCamera::new(None);
    let mut tracker = GestureTracker::new();
    let ticket = tracker.toggle().unwrap();
    // Toggling while the camera is still starting cancels it.
    assert!(tracker.toggle().is_none());
    assert_eq!(tracker.status(), &GestureStatus::Inactive);
    tracker.complete_activation(ticket, Ok(camera));
    assert_eq!(releases.get(), 1);

    let (camera, releases) = MockCamera::new(None);
    let ticket = tracker.toggle().unwrap();
    tracker.complete_activation(ticket, Ok(camera));
    assert!(tracker.is_active());
    assert!(tracker.toggle().is_none());
    assert_eq!(releases.get(), 1);
}

#[test]
fn status_labels() {
    assert_eq!(GestureStatus::Inactive.label(), "Camera off");
    assert!(GestureStatus::Failed("camera access denied".into())
        .label()
        .contains("denied"));
}
