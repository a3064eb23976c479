use std::rc::Rc;

use glam::{Mat4, Vec3};
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, Buffer, BufferUsages, Device,
    DeviceDescriptor, Instance, Limits, LoadOp, Operations, PresentMode, Queue,
    RenderPassColorAttachment, RenderPassDescriptor, RequestAdapterOptions, StoreOp, Surface,
    SurfaceConfiguration, SurfaceError, SurfaceTarget, WindowHandle, util::DeviceExt,
};

use crate::{
    Color, RenderError, Result,
    geometry_batch::GeometryBatch,
    pipeline::Pipelines,
    submit::DrawSubmit,
    texture::{ReleaseQueue, Texture, TextureHandle, TextureId},
    vertex::Vertex,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

struct RenderTarget {
    surface: Surface<'static>,
    config: SurfaceConfiguration,
}

struct Gpu {
    device: Device,
    queue: Queue,
}

/// Low-level GPU renderer built on `wgpu`
///
/// Owns the sprite sheet textures, collects submitted quads into per-texture batches &
/// draws them once per frame with alpha blending
pub struct Renderer {
    gpu: Gpu,
    target: RenderTarget,
    pipelines: Pipelines,
    camera_bind_group: BindGroup,
    camera_buffer: Buffer,
    textures: Vec<Option<Texture>>,
    default_texture: Texture,
    releases: Rc<ReleaseQueue>,
    batches: Vec<GeometryBatch>,
    clear_color: Color,
}

impl Renderer {
    /// Creates a new `Renderer` with a configured surface, pipeline & default resources
    pub async fn new(
        inner_width: u32,
        inner_height: u32,
        window: impl Into<SurfaceTarget<'static>> + WindowHandle,
    ) -> Result<Renderer> {
        let instance = Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderError::Surface)?;
        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                // Force find adapter that can present to this surface
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(RenderError::Adapter)?;
        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                required_limits: if cfg!(target_arch = "wasm32") {
                    Limits::downlevel_webgl2_defaults()
                } else {
                    Limits::default()
                },
                ..Default::default()
            })
            .await
            .map_err(RenderError::Device)?;

        // WebGPU throws error 'size is zero' if not set
        let (w, h) = (inner_width.max(1), inner_height.max(1));

        let mut surface_cfg = surface
            .get_default_config(&adapter, w, h)
            .ok_or(RenderError::UnsupportedSurface)?;
        surface_cfg.present_mode = PresentMode::AutoVsync;
        surface.configure(&device, &surface_cfg);
        log::info!(
            "renderer ready: {}x{} {:?} on {}",
            w,
            h,
            surface_cfg.format,
            adapter.get_info().name
        );

        let pipelines = Pipelines::new(&device, surface_cfg.format);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::bytes_of(&CameraUniform {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: None,
            layout: &pipelines.camera_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let default_texture = Texture::create_default(&device, &queue, &pipelines.texture_layout);

        Ok(Renderer {
            gpu: Gpu { device, queue },
            target: RenderTarget {
                surface,
                config: surface_cfg,
            },
            pipelines,
            camera_bind_group,
            camera_buffer,
            textures: Vec::new(),
            default_texture,
            releases: Rc::new(ReleaseQueue::default()),
            batches: Vec::new(),
            clear_color: Color::BLACK,
        })
    }

    /// Frees textures whose handles were dropped since the last frame
    fn collect_released(&mut self) {
        for id in self.releases.drain() {
            if let Some(slot) = self.textures.get_mut(id.0) {
                if slot.take().is_some() {
                    log::debug!("released texture {}", id.0);
                }
            }
        }
    }

    /// Draws every batch submitted since the previous frame & presents
    ///
    /// Lost or outdated surfaces are reconfigured & the frame is skipped
    pub fn render_frame(&mut self) {
        self.collect_released();
        let batches = std::mem::take(&mut self.batches);

        let frame = match self.target.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.target
                    .surface
                    .configure(&self.gpu.device, &self.target.config);
                return;
            }
            Err(e) => {
                log::warn!("skipping frame: {e}");
                return;
            }
        };
        let view = frame.texture.create_view(&Default::default());
        let mut encoder = self.gpu.device.create_command_encoder(&Default::default());

        {
            let mut r_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color.into()),
                        store: StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            r_pass.set_pipeline(&self.pipelines.sprite);
            r_pass.set_bind_group(1, &self.camera_bind_group, &[]);

            for batch in batches.iter().filter(|b| !b.is_empty()) {
                let texture = batch
                    .texture
                    .and_then(|id| self.textures.get(id.0))
                    .and_then(Option::as_ref)
                    .unwrap_or(&self.default_texture);
                texture.bind(&mut r_pass, 0);
                batch.draw(&self.gpu.device, &mut r_pass);
            }
        }

        self.gpu.queue.submit(Some(encoder.finish()));
        frame.present();
    }

    /// Resizes the surface & updates internal render targets
    pub fn resize(&mut self, w: u32, h: u32) {
        if w == 0 || h == 0 {
            return;
        }
        (self.target.config.width, self.target.config.height) = (w, h);
        self.target
            .surface
            .configure(&self.gpu.device, &self.target.config);
    }

    /// Returns the current surface dimensions (in pixels)
    pub fn surface_size(&self) -> (f32, f32) {
        (
            self.target.config.width as f32,
            self.target.config.height as f32,
        )
    }

    /// Enables/disables V‑Sync by changing the surface present mode
    ///
    /// `vsync = true` → [`PresentMode::Fifo`] (V‑Sync ON)
    /// `vsync = false` → [`PresentMode::AutoNoVsync`] (V‑Sync OFF)
    pub fn set_vsync(&mut self, on: bool) {
        self.target.config.present_mode = if on {
            PresentMode::Fifo
        } else {
            PresentMode::AutoNoVsync
        };

        self.target
            .surface
            .configure(&self.gpu.device, &self.target.config);
    }

    /// Sets the color used to clear the screen before drawing
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Uploads the given view-projection matrix to the GPU for use in vertex transforms
    pub fn upload_camera_matrix(&mut self, mat: Mat4) {
        let cam_uniform = CameraUniform {
            view_proj: mat.to_cols_array_2d(),
        };
        self.gpu
            .queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam_uniform));
    }

    /// Decodes an image (PNG) & uploads it as a sprite sheet
    pub fn add_texture(&mut self, data: &[u8]) -> Result<TextureHandle> {
        let img = image::load_from_memory(data)
            .map_err(RenderError::Image)?
            .to_rgba8();
        let (w, h) = img.dimensions();
        Ok(self.add_texture_raw(w, h, &img))
    }

    /// Uploads tightly packed RGBA bytes as a sprite sheet
    ///
    /// The texture lives until the returned handle is dropped
    pub fn add_texture_raw(&mut self, w: u32, h: u32, data: &[u8]) -> TextureHandle {
        let tex = Texture::from_bytes(
            &self.gpu.device,
            &self.gpu.queue,
            &self.pipelines.texture_layout,
            data,
            w,
            h,
        );
        let id = TextureId(insert_slot(&mut self.textures, tex));
        log::debug!("added texture {} ({w}x{h})", id.0);

        TextureHandle::new(id, self.releases.clone())
    }

    /// Number of textures currently alive on the GPU
    pub fn texture_count(&self) -> usize {
        self.textures.iter().filter(|t| t.is_some()).count()
    }
}

/// Stores `item` in the first free slot, growing `slots` only when all are taken
fn insert_slot<T>(slots: &mut Vec<Option<T>>, item: T) -> usize {
    match slots.iter().position(Option::is_none) {
        Some(i) => {
            slots[i] = Some(item);
            i
        }
        None => {
            slots.push(Some(item));
            slots.len() - 1
        }
    }
}

impl DrawSubmit for Renderer {
    /// Transforms the geometry into world space on the CPU & appends it to the batch for
    /// its texture, starting a new batch whenever the texture changes to keep draw order
    fn submit_geometry(
        &mut self,
        model: Mat4,
        vertices: &[Vertex],
        indices: &[u16],
        texture: Option<TextureId>,
    ) {
        let world: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let p = model.transform_point3(Vec3::from(v.position()));
                v.with_position(p.to_array())
            })
            .collect();

        if let Some(batch) = self.batches.last_mut() {
            if batch.texture == texture && batch.push(&world, indices) {
                return;
            }
        }

        let mut batch = GeometryBatch::new(texture);
        batch.push(&world, indices);
        self.batches.push(batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_reused() {
        let mut slots = Vec::new();
        assert_eq!(insert_slot(&mut slots, 'a'), 0);
        assert_eq!(insert_slot(&mut slots, 'b'), 1);
        assert_eq!(insert_slot(&mut slots, 'c'), 2);

        slots[1] = None;
        assert_eq!(insert_slot(&mut slots, 'd'), 1);
        assert_eq!(insert_slot(&mut slots, 'e'), 3);
        assert_eq!(slots, vec![Some('a'), Some('d'), Some('c'), Some('e')]);
    }
}
