use std::{f32::consts::PI, sync::Arc};

use flipbook::{
    FrameTimer, SheetLayout, SpriteAnimation,
    render::{Color, Renderer, TextureHandle, camera::Camera, vec2, vec3},
};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const FRAME_PX: u32 = 32;
const LAYOUT: &str = include_str!("../walk.json");

/// Paints a ball hopping left to right, one frame per cell
///
/// Every frame also carries `frame + 1` ticks along its top edge, so playback order stays
/// readable while mirrored. The eye sits right of center so horizontal mirroring is visible
fn hopping_ball_sheet(layout: &SheetLayout) -> (u32, u32, Vec<u8>) {
    let (w, h) = (FRAME_PX * layout.columns, FRAME_PX * layout.rows);
    let mut rgba = vec![0u8; (w * h * 4) as usize];
    let frames = layout.amount_frames() as u32;
    let last = frames.saturating_sub(1).max(1) as f32;

    for frame in 0..frames {
        let (ox, oy) = (
            (frame % layout.columns) * FRAME_PX,
            (frame / layout.columns) * FRAME_PX,
        );
        let t = frame as f32 / last;
        let cx = 8.0 + 16.0 * t;
        let cy = 24.0 - 14.0 * (PI * t).sin();

        for y in 0..FRAME_PX {
            for x in 0..FRAME_PX {
                let (dx, dy) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
                let tick = y < 3 && x % 3 == 1 && x / 3 <= frame;
                let pixel = if tick {
                    [200, 220, 255, 255]
                } else if (dx - 3.0).powi(2) + (dy + 2.0).powi(2) < 2.0 {
                    [20, 20, 30, 255]
                } else if dx * dx + dy * dy < 36.0 {
                    [240, 180, 60, 255]
                } else {
                    continue;
                };

                let i = (((oy + y) * w + ox + x) * 4) as usize;
                rgba[i..i + 4].copy_from_slice(&pixel);
            }
        }
    }

    (w, h, rgba)
}

struct Scene {
    renderer: Renderer,
    ball: SpriteAnimation,
}

impl Scene {
    fn new(mut renderer: Renderer, layout: &SheetLayout) -> flipbook::Result<Self> {
        let (w, h, rgba) = hopping_ball_sheet(layout);
        let sheet: TextureHandle = renderer.add_texture_raw(w, h, &rgba);

        let (sw, sh) = renderer.surface_size();
        let mut ball = SpriteAnimation::new(
            vec3(sw / 2.0, sh / 2.0, 0.0),
            vec3(192.0, 192.0, 1.0),
            Color::WHITE,
        );
        ball.configure_from_layout(sheet, layout)?;
        renderer.set_clear_color(Color::new([0.08, 0.08, 0.1, 1.0]));

        Ok(Self { renderer, ball })
    }

    fn key(&mut self, code: KeyCode) {
        match code {
            KeyCode::KeyX => self.ball.set_mirror_x(!self.ball.mirror_x()),
            KeyCode::KeyY => self.ball.set_mirror_y(!self.ball.mirror_y()),
            KeyCode::KeyR => self.ball.restart(),
            // shown until the next update overwrites it
            KeyCode::Digit1 => self.jump(1),
            KeyCode::Digit2 => self.jump(2),
            KeyCode::Digit3 => self.jump(3),
            _ => {}
        }
    }

    fn jump(&mut self, frame: usize) {
        if let Err(e) = self.ball.set_frame(frame) {
            log::info!("{e}");
        }
    }

    fn frame(&mut self, timer: &FrameTimer) {
        self.ball.tick(timer);

        let (w, h) = self.renderer.surface_size();
        let mut camera = Camera::default();
        camera.target(vec2(w / 2.0, h / 2.0));
        self.renderer.upload_camera_matrix(camera.view_proj(vec2(w, h)));

        self.ball.draw(&mut self.renderer);
        self.renderer.render_frame();
    }
}

struct App {
    layout: SheetLayout,
    window: Option<Arc<Window>>,
    scene: Option<Scene>,
    timer: FrameTimer,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes().with_title("flipbook: walk cycle");
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        let size = window.inner_size();

        let scene = pollster::block_on(Renderer::new(size.width, size.height, window.clone()))
            .map_err(|e| e.to_string())
            .and_then(|r| Scene::new(r, &self.layout).map_err(|e| e.to_string()));
        match scene {
            Ok(scene) => {
                log::info!("X/Y mirror, R restart, 1-3 jump to frame");
                self.scene = Some(scene);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => scene.renderer.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                if !event.state.is_pressed() || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    scene.key(code);
                }
            }
            WindowEvent::RedrawRequested => {
                self.timer.update();
                scene.frame(&self.timer);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let layout: SheetLayout = match serde_json::from_str(LAYOUT) {
        Ok(layout) => layout,
        Err(e) => {
            log::error!("bad walk.json: {e}");
            return;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("failed to create event loop: {e}");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        layout,
        window: None,
        scene: None,
        timer: FrameTimer::default(),
    };
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop stopped: {e}");
    }
}
