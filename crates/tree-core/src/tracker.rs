//! Capture lifecycle around the gesture heuristic.
//!
//! Activation and sampling are both split into begin/complete halves so a
//! frontend with asynchronous camera access can interleave them with user
//! input. Every `deactivate` bumps an epoch; a ticket from an older epoch is
//! stale and its result is dropped, which is how a sample or an activation
//! still in flight when capture is switched off gets discarded.

use crate::error::CaptureError;
use crate::gesture::{classify_frame, FrameView, GestureSample, SAMPLE_HEIGHT, SAMPLE_WIDTH};
use crate::mode::ModeController;

/// A live camera the tracker can pull downsampled frames from.
pub trait FrameSource {
    /// Write the current image, scaled to `width`×`height` RGBA8, into `rgba`.
    /// Returns `Ok(false)` while no frame is available yet.
    fn read_frame(
        &mut self,
        width: u32,
        height: u32,
        rgba: &mut Vec<u8>,
    ) -> Result<bool, CaptureError>;

    /// Stop the camera. Called exactly once per acquired source.
    fn release(&mut self);
}

/// Owns an acquired source and releases it when dropped.
struct CaptureGuard<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> Drop for CaptureGuard<S> {
    fn drop(&mut self) {
        self.source.release();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GestureStatus {
    #[default]
    Inactive,
    Starting,
    Active,
    Failed(String),
}

impl GestureStatus {
    pub fn label(&self) -> String {
        match self {
            GestureStatus::Inactive => "Camera off".to_string(),
            GestureStatus::Starting => "Starting camera...".to_string(),
            GestureStatus::Active => "Camera active".to_string(),
            GestureStatus::Failed(reason) => format!("Camera failed: {reason}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationTicket {
    epoch: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleTicket {
    epoch: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SampleOutcome {
    /// Position (and possibly mode) pushed into the controller.
    Applied(GestureSample),
    /// Blob too small; nothing changed.
    Ignored,
    /// Camera has not produced a frame yet.
    NotReady,
    /// Capture is not active, or was switched off while the sample was in flight.
    Discarded,
    /// Reading the frame failed; capture is now released and `Failed`.
    Failed(CaptureError),
}

pub struct GestureTracker<S: FrameSource> {
    status: GestureStatus,
    capture: Option<CaptureGuard<S>>,
    epoch: u64,
    scratch: Vec<u8>,
}

impl<S: FrameSource> Default for GestureTracker<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FrameSource> GestureTracker<S> {
    pub fn new() -> Self {
        Self {
            status: GestureStatus::Inactive,
            capture: None,
            epoch: 0,
            scratch: Vec::with_capacity((SAMPLE_WIDTH * SAMPLE_HEIGHT * 4) as usize),
        }
    }

    #[inline]
    pub fn status(&self) -> &GestureStatus {
        &self.status
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == GestureStatus::Active
    }

    /// True while capture is on or being switched on.
    #[inline]
    pub fn is_engaged(&self) -> bool {
        matches!(self.status, GestureStatus::Starting | GestureStatus::Active)
    }

    /// Start switching capture on. Any previous capture is released first.
    pub fn begin_activation(&mut self) -> ActivationTicket {
        self.release_capture();
        self.epoch += 1;
        self.set_status(GestureStatus::Starting);
        ActivationTicket { epoch: self.epoch }
    }

    /// Whether `ticket` still belongs to the pending activation. Front-ends
    /// check this before attaching a freshly acquired stream to shared output.
    #[inline]
    pub fn is_current(&self, ticket: ActivationTicket) -> bool {
        ticket.epoch == self.epoch && self.status == GestureStatus::Starting
    }

    /// Finish an activation with the outcome of acquiring the camera.
    pub fn complete_activation(
        &mut self,
        ticket: ActivationTicket,
        acquired: Result<S, CaptureError>,
    ) -> &GestureStatus {
        let current = self.is_current(ticket);
        match acquired {
            Ok(source) => {
                let guard = CaptureGuard { source };
                if !current {
                    log::debug!("[gesture] camera arrived after deactivation; releasing");
                    drop(guard);
                    return &self.status;
                }
                self.capture = Some(guard);
                self.set_status(GestureStatus::Active);
            }
            Err(e) => {
                if current {
                    log::warn!("[gesture] camera unavailable: {e}");
                    self.set_status(GestureStatus::Failed(e.to_string()));
                }
            }
        }
        &self.status
    }

    /// Stop sampling and release the camera now. Outstanding tickets go stale.
    pub fn deactivate(&mut self) {
        self.epoch += 1;
        self.release_capture();
        self.set_status(GestureStatus::Inactive);
    }

    pub fn toggle(&mut self) -> Option<ActivationTicket> {
        if self.is_engaged() {
            self.deactivate();
            None
        } else {
            Some(self.begin_activation())
        }
    }

    pub fn begin_sample(&self) -> Option<SampleTicket> {
        self.is_active().then_some(SampleTicket { epoch: self.epoch })
    }

    /// Classify a captured frame and apply it, unless the ticket is stale.
    pub fn complete_sample(
        &mut self,
        ticket: SampleTicket,
        frame: &FrameView<'_>,
        controller: &mut ModeController,
    ) -> SampleOutcome {
        if ticket.epoch != self.epoch || !self.is_active() {
            return SampleOutcome::Discarded;
        }
        match classify_frame(frame) {
            Some(sample) => {
                sample.apply(controller);
                SampleOutcome::Applied(sample)
            }
            None => SampleOutcome::Ignored,
        }
    }

    /// One timer tick: read a frame from the held source and apply it.
    pub fn sample(&mut self, controller: &mut ModeController) -> SampleOutcome {
        let Some(ticket) = self.begin_sample() else {
            return SampleOutcome::Discarded;
        };
        let Some(guard) = self.capture.as_mut() else {
            return SampleOutcome::Discarded;
        };
        let mut buf = std::mem::take(&mut self.scratch);
        let read = guard
            .source
            .read_frame(SAMPLE_WIDTH, SAMPLE_HEIGHT, &mut buf)
            .and_then(|ready| {
                if ready {
                    FrameView::new(SAMPLE_WIDTH, SAMPLE_HEIGHT, &buf).map(Some)
                } else {
                    Ok(None)
                }
            });
        let outcome = match read {
            Ok(Some(frame)) => self.complete_sample(ticket, &frame, controller),
            Ok(None) => SampleOutcome::NotReady,
            Err(e) => SampleOutcome::Failed(e),
        };
        self.scratch = buf;
        if let SampleOutcome::Failed(e) = &outcome {
            log::warn!("[gesture] frame read failed: {e}");
            self.release_capture();
            self.set_status(GestureStatus::Failed(e.to_string()));
        }
        outcome
    }

    fn release_capture(&mut self) {
        if self.capture.take().is_some() {
            log::info!("[gesture] camera released");
        }
    }

    fn set_status(&mut self, status: GestureStatus) {
        if self.status != status {
            log::info!("[gesture] status: {}", status.label());
            self.status = status;
        }
    }
}
