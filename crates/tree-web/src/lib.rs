#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::frame::Experience;
use tree_core::{SceneConfig, TreeMode};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod controls;
mod dom;
mod frame;
mod ui;

use controls::Controls;
use frame::FrameContext;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                dom::set_text(&document, ui::STATUS_ID, &format!("Startup failed: {e}"));
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, ui::CANVAS_ID)?;
    // Avoid grabbing a 2D context here so WebGPU can acquire the canvas
    dom::sync_canvas_backing_size(&canvas);

    let controls = Rc::new(RefCell::new(Controls::new(document.clone())));
    controls::install(&controls, &document);
    controls.borrow().refresh();

    // A fresh tree on every page load.
    let config = SceneConfig::with_seed(js_sys::Date::now() as u64);
    let experience = Experience::new(&config, TreeMode::default())?;
    let renderer = frame::init_renderer(&canvas, &experience).await?;

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        controls,
        experience,
        renderer,
        canvas,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
