use bytemuck::{Pod, Zeroable};
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// A single interleaved vertex of a textured sprite quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    position: [f32; 3],
    color: [f32; 3],
    tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex with position, color, & texture coordinates
    ///
    /// - `position`: `[x, y, z]` in local (model) space
    /// - `color`: RGB tint multiplied with the sampled texel
    /// - `tex_coords`: `[u, v]` in normalized texture space, may leave 0–1 when mirrored
    pub fn new(position: [f32; 3], color: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            color,
            tex_coords,
        }
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn tex_coords(&self) -> [f32; 2] {
        self.tex_coords
    }

    /// Returns a copy of this vertex moved to `position`
    pub fn with_position(self, position: [f32; 3]) -> Self {
        Self { position, ..self }
    }

    /// Returns the vertex buffer layout
    ///
    /// This must match the vertex shader input layout:
    /// - location 0: `vec3<f32>` (position)
    /// - location 1: `vec3<f32>` (color)
    /// - location 2: `vec2<f32>` (texture coordinates)
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}
