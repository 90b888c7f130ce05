use crate::controls::SharedControls;
use crate::dom;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::frame::Experience;
use tree_core::render::{InstanceCapacity, Renderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub controls: SharedControls,
    pub experience: Experience,
    pub renderer: Renderer<'static>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        dom::sync_canvas_backing_size(&self.canvas);
        self.renderer
            .resize(self.canvas.width(), self.canvas.height());
        let (w, h) = self.renderer.size();

        let controls = self.controls.borrow();
        let frame = self
            .experience
            .advance(dt_sec, controls.controller(), [w as f32, h as f32]);
        match self.renderer.render(&frame) {
            Ok(()) => {}
            Err(e) if e.needs_reconfigure() => self.renderer.reconfigure(),
            Err(e) => log::warn!("[gpu] frame skipped: {e}"),
        }
    }
}

pub async fn init_renderer(
    canvas: &web::HtmlCanvasElement,
    experience: &Experience,
) -> anyhow::Result<Renderer<'static>> {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let scene = experience.scene();
    let renderer = Renderer::new(
        &instance,
        surface,
        canvas.width(),
        canvas.height(),
        scene.foliage.points(),
        InstanceCapacity::for_scene(scene),
    )
    .await?;
    Ok(renderer)
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
