//! Webcam capture through `getUserMedia`, sampled by drawing the video into a
//! small 2D canvas.

use crate::dom;
use crate::ui;
use tree_core::tracker::FrameSource;
use tree_core::CaptureError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

// HTMLMediaElement.HAVE_CURRENT_DATA
const HAVE_CURRENT_DATA: u16 = 2;

pub struct WebCamera {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
    ctx: web::CanvasRenderingContext2d,
}

impl WebCamera {
    /// Ask for the camera and start playing it into the hidden video element.
    ///
    /// `still_wanted` is checked once the stream arrives; a superseded request
    /// stops its tracks without touching the shared video element.
    pub async fn open(
        document: &web::Document,
        still_wanted: impl Fn() -> bool,
    ) -> Result<Self, CaptureError> {
        let video: web::HtmlVideoElement = dom::element_by_id(document, ui::VIDEO_ID)
            .map_err(|e| CaptureError::Unavailable(e.to_string()))?;
        let canvas: web::HtmlCanvasElement = dom::element_by_id(document, ui::SAMPLE_CANVAS_ID)
            .map_err(|e| CaptureError::Unavailable(e.to_string()))?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
            .ok_or_else(|| CaptureError::Unavailable("no 2d context".into()))?;

        let devices = web::window()
            .ok_or_else(|| CaptureError::Unavailable("no window".into()))?
            .navigator()
            .media_devices()
            .map_err(|_| CaptureError::Unavailable("media devices not supported".into()))?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_video(&JsValue::from_bool(true));
        constraints.set_audio(&JsValue::from_bool(false));
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(js_capture_error)?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(js_capture_error)?
            .dyn_into()
            .map_err(|_| CaptureError::Unavailable("getUserMedia returned no stream".into()))?;
        if !still_wanted() {
            stop_tracks(&stream);
            return Err(CaptureError::Unavailable("request superseded".into()));
        }

        video.set_muted(true);
        video.set_src_object(Some(&stream));
        let mut camera = Self { stream, video, ctx };
        if let Err(e) = camera.play().await {
            camera.release();
            return Err(e);
        }
        Ok(camera)
    }

    async fn play(&self) -> Result<(), CaptureError> {
        let promise = self.video.play().map_err(js_capture_error)?;
        JsFuture::from(promise).await.map_err(js_capture_error)?;
        Ok(())
    }
}

impl FrameSource for WebCamera {
    fn read_frame(
        &mut self,
        width: u32,
        height: u32,
        rgba: &mut Vec<u8>,
    ) -> Result<bool, CaptureError> {
        if self.video.ready_state() < HAVE_CURRENT_DATA {
            return Ok(false);
        }
        let (w, h) = (width as f64, height as f64);
        self.ctx
            .draw_image_with_html_video_element_and_dw_and_dh(&self.video, 0.0, 0.0, w, h)
            .map_err(|e| CaptureError::FrameRead(format!("{e:?}")))?;
        let image = self
            .ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(|e| CaptureError::FrameRead(format!("{e:?}")))?;
        rgba.clear();
        rgba.extend_from_slice(&image.data().0);
        Ok(true)
    }

    fn release(&mut self) {
        stop_tracks(&self.stream);
        let attached = self.video.src_object().map(|s| s.id());
        if ui::owns_video_source(attached.as_deref(), &self.stream.id()) {
            self.video.set_src_object(None);
        }
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn js_capture_error(e: JsValue) -> CaptureError {
    match e.dyn_ref::<js_sys::Error>() {
        Some(err) => ui::capture_error(&String::from(err.name()), &String::from(err.message())),
        None => CaptureError::Unavailable(format!("{e:?}")),
    }
}
