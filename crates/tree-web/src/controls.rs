//! Mode buttons, the camera toggle and the gesture sampling timer.

use crate::camera::WebCamera;
use crate::dom;
use crate::ui::{self, KeyCommand};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tree_core::gesture::SAMPLE_PERIOD;
use tree_core::tracker::{GestureStatus, GestureTracker, SampleOutcome};
use tree_core::{ModeController, TreeMode};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type SharedControls = Rc<RefCell<Controls>>;

pub struct Controls {
    controller: ModeController,
    tracker: GestureTracker<WebCamera>,
    sampler: Option<dom::Interval>,
    document: web::Document,
}

impl Controls {
    pub fn new(document: web::Document) -> Self {
        Self {
            controller: ModeController::new(TreeMode::default()),
            tracker: GestureTracker::new(),
            sampler: None,
            document,
        }
    }

    #[inline]
    pub fn controller(&self) -> &ModeController {
        &self.controller
    }

    pub fn set_mode(&mut self, mode: TreeMode) {
        if self.controller.set_mode(mode) {
            self.refresh();
        }
    }

    pub fn toggle_mode(&mut self) {
        self.controller.toggle();
        self.refresh();
    }

    /// Push mode and capture state into the buttons and the status line.
    pub fn refresh(&self) {
        let doc = &self.document;
        let mode = self.controller.mode();
        let status = self.tracker.status();
        let (formed, chaos) = ui::mode_buttons(mode);
        dom::set_class(doc, ui::BTN_FORMED, ui::ACTIVE_CLASS, formed);
        dom::set_class(doc, ui::BTN_CHAOS, ui::ACTIVE_CLASS, chaos);
        dom::set_class(doc, ui::BTN_CAMERA, ui::ACTIVE_CLASS, self.tracker.is_engaged());
        dom::set_text(doc, ui::BTN_CAMERA, ui::camera_button_label(status));
        dom::set_text(doc, ui::STATUS_ID, &ui::status_line(status, mode));
    }

    fn stop_sampling(&mut self) {
        self.sampler = None;
    }
}

pub fn install(shared: &SharedControls, document: &web::Document) {
    let s = shared.clone();
    dom::add_click_listener(document, ui::BTN_FORMED, move || {
        s.borrow_mut().set_mode(TreeMode::Formed)
    });
    let s = shared.clone();
    dom::add_click_listener(document, ui::BTN_CHAOS, move || {
        s.borrow_mut().set_mode(TreeMode::Chaos)
    });
    let s = shared.clone();
    dom::add_click_listener(document, ui::BTN_CAMERA, move || toggle_camera(&s));

    let s = shared.clone();
    dom::add_keydown_listener(move |key| match ui::key_command(&key) {
        Some(KeyCommand::SetMode(mode)) => s.borrow_mut().set_mode(mode),
        Some(KeyCommand::ToggleMode) => s.borrow_mut().toggle_mode(),
        Some(KeyCommand::ToggleCamera) => toggle_camera(&s),
        None => {}
    });
}

fn toggle_camera(shared: &SharedControls) {
    let ticket = {
        let mut c = shared.borrow_mut();
        let ticket = c.tracker.toggle();
        if ticket.is_none() {
            c.stop_sampling();
        }
        c.refresh();
        ticket
    };
    let Some(ticket) = ticket else {
        return;
    };

    let shared = shared.clone();
    spawn_local(async move {
        let document = shared.borrow().document.clone();
        let weak = Rc::downgrade(&shared);
        let still_wanted = move || {
            weak.upgrade()
                .is_some_and(|s| s.borrow().tracker.is_current(ticket))
        };
        let acquired = WebCamera::open(&document, still_wanted).await;
        let mut c = shared.borrow_mut();
        let active = *c.tracker.complete_activation(ticket, acquired) == GestureStatus::Active;
        // A stale ticket can still observe Active from a newer activation
        // that already owns the timer.
        if active && c.sampler.is_none() {
            match start_sampling(Rc::downgrade(&shared)) {
                Ok(interval) => c.sampler = Some(interval),
                Err(e) => {
                    log::error!("[gesture] cannot schedule sampling: {e:?}");
                    c.tracker.deactivate();
                }
            }
        }
        c.refresh();
    });
}

fn start_sampling(weak: Weak<RefCell<Controls>>) -> anyhow::Result<dom::Interval> {
    dom::Interval::new(SAMPLE_PERIOD.as_millis() as i32, move || {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut c = shared.borrow_mut();
        let c = &mut *c;
        match c.tracker.sample(&mut c.controller) {
            SampleOutcome::Applied(sample) => {
                if sample.mode.is_some() {
                    c.refresh();
                }
            }
            SampleOutcome::Failed(_) => {
                // The timer is still running this callback; clear it once it returns.
                if let Some(interval) = c.sampler.take() {
                    spawn_local(async move { drop(interval) });
                }
                c.refresh();
            }
            SampleOutcome::Ignored | SampleOutcome::NotReady | SampleOutcome::Discarded => {}
        }
    })
}
