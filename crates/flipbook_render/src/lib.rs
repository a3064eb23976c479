//! GPU side of flipbook: a `wgpu` sprite renderer plus the [`DrawSubmit`] boundary that
//! animations talk to

pub mod camera;
pub mod color;
mod geometry_batch;
mod pipeline;
mod renderer;
pub mod submit;
pub mod texture;
pub mod vertex;

use err_derive::Error;

pub use crate::color::Color;
pub use glam::{Mat4, Vec2, Vec3, vec2, vec3};
pub use renderer::Renderer;
pub use submit::DrawSubmit;
pub use texture::{ReleaseQueue, TextureHandle, TextureId, TextureRelease};
pub use vertex::Vertex;

pub type Result<T> = std::result::Result<T, RenderError>;

/// Failures while bringing up the GPU or loading textures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(display = "Failed to create a surface for the window")]
    Surface(#[cause] wgpu::CreateSurfaceError),
    #[error(display = "No GPU adapter can present to the surface")]
    Adapter(#[cause] wgpu::RequestAdapterError),
    #[error(display = "Failed to request a GPU device")]
    Device(#[cause] wgpu::RequestDeviceError),
    #[error(display = "Surface is not supported by the adapter")]
    UnsupportedSurface,
    #[error(display = "Failed to decode texture image")]
    Image(#[cause] image::ImageError),
}
