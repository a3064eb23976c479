use glam::Mat4;

use crate::{texture::TextureId, vertex::Vertex};

/// Consumer of textured geometry
///
/// Implemented by [`Renderer`](crate::Renderer); swap in a recording implementation to
/// inspect draw calls without a GPU
pub trait DrawSubmit {
    /// Queues `vertices`/`indices` (local space) for drawing with `model` applied
    ///
    /// `texture` of `None` draws with the renderer's white fallback texture
    fn submit_geometry(
        &mut self,
        model: Mat4,
        vertices: &[Vertex],
        indices: &[u16],
        texture: Option<TextureId>,
    );
}

/// A draw call captured by [`Recorder`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub model: Mat4,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub texture: Option<TextureId>,
}

/// Records every submission instead of drawing it
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<DrawCall>,
}

impl Recorder {
    pub fn last(&self) -> Option<&DrawCall> {
        self.calls.last()
    }
}

impl DrawSubmit for Recorder {
    fn submit_geometry(
        &mut self,
        model: Mat4,
        vertices: &[Vertex],
        indices: &[u16],
        texture: Option<TextureId>,
    ) {
        self.calls.push(DrawCall {
            model,
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
            texture,
        });
    }
}
