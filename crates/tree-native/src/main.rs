use std::time::Instant;
use winit::{
    event::*,
    event_loop::{EventLoop, EventLoopWindowTarget},
    window::{Window, WindowBuilder},
};

use tree_core::frame::Experience;
use tree_core::render::{InstanceCapacity, RenderError, Renderer};
use tree_core::{ModeController, SceneConfig, TreeMode};

mod keys;

use keys::{command_for_key, zoomed_distance, Command};

struct App<'w> {
    window: &'w Window,
    renderer: Renderer<'w>,
    experience: Experience,
    controller: ModeController,
    last_frame: Instant,
}

impl<'w> App<'w> {
    async fn new(window: &'w Window, config: &SceneConfig) -> anyhow::Result<Self> {
        let experience = Experience::new(config, TreeMode::default())?;
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let scene = experience.scene();
        let renderer = Renderer::new(
            &instance,
            surface,
            size.width,
            size.height,
            scene.foliage.points(),
            InstanceCapacity::for_scene(scene),
        )
        .await?;
        Ok(Self {
            window,
            renderer,
            experience,
            controller: ModeController::new(TreeMode::default()),
            last_frame: Instant::now(),
        })
    }

    fn handle_command(&mut self, command: Command, elwt: &EventLoopWindowTarget<()>) {
        match command {
            Command::SetMode(mode) => {
                self.controller.set_mode(mode);
            }
            Command::ToggleMode => self.controller.toggle(),
            Command::Gesture => {
                log::warn!("[gesture] webcam capture needs the web front-end");
            }
            Command::Quit => elwt.exit(),
        }
    }

    fn zoom(&mut self, wheel_lines: f32) {
        let rig = self.experience.rig_mut();
        let distance = zoomed_distance(rig.distance(), wheel_lines);
        rig.set_distance(distance);
    }

    fn render(&mut self) -> Result<(), RenderError> {
        let now = Instant::now();
        let dt_sec = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        let (w, h) = self.renderer.size();
        let frame = self
            .experience
            .advance(dt_sec, &self.controller, [w as f32, h as f32]);
        self.renderer.render(&frame)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = SceneConfig::default();
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Particle Tree (native)")
        .build(&event_loop)?;
    let mut app = pollster::block_on(App::new(&window, &config))?;
    log::info!("[mode] keys: F formed, C chaos, Space toggle, G gesture, Esc quit");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => app.renderer.resize(size.width, size.height),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if let Some(command) = command_for_key(&logical_key) {
                app.handle_command(command, elwt);
            }
        }
        Event::WindowEvent {
            event:
                WindowEvent::MouseWheel {
                    delta: MouseScrollDelta::LineDelta(_, lines),
                    ..
                },
            ..
        } => app.zoom(lines),
        Event::AboutToWait => match app.render() {
            Ok(_) => app.window.request_redraw(),
            Err(e) if e.needs_reconfigure() => app.renderer.reconfigure(),
            Err(e) if e.is_fatal() => {
                log::error!("[gpu] {e}");
                elwt.exit()
            }
            Err(e) => log::warn!("[gpu] frame skipped: {e}"),
        },
        _ => {}
    })?;
    Ok(())
}
