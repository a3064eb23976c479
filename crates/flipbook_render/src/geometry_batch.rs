use wgpu::{BufferUsages, Device, IndexFormat, RenderPass, util::DeviceExt};

use crate::{texture::TextureId, vertex::Vertex};

/// Geometry sharing one texture, drawn with a single indexed call
///
/// Vertices are already in world space; `u16` indices cap the batch size
pub(crate) struct GeometryBatch {
    pub texture: Option<TextureId>,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl GeometryBatch {
    const MAX_VERTICES: usize = u16::MAX as usize;
    const MAX_INDICES: usize = Self::MAX_VERTICES * 6;

    pub fn new(texture: Option<TextureId>) -> Self {
        Self {
            texture,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    // Returns true if adding verts/indices would exceed max allowed
    fn would_overflow(&self, vert_count: usize, idx_count: usize) -> bool {
        self.vertices.len() + vert_count > Self::MAX_VERTICES
            || self.indices.len() + idx_count > Self::MAX_INDICES
    }

    /// Adds vertices/indices, returns false if it would overflow
    pub fn push(&mut self, verts: &[Vertex], indices: &[u16]) -> bool {
        if self.would_overflow(verts.len(), indices.len()) {
            return false;
        }

        let idx_offset = self.vertices.len() as u16;
        self.vertices.extend_from_slice(verts);
        self.indices.extend(indices.iter().map(|i| *i + idx_offset));
        true
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Uploads the batch into fresh buffers & issues the draw
    pub fn draw(&self, device: &Device, r_pass: &mut RenderPass<'_>) {
        if self.is_empty() {
            return;
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: BufferUsages::VERTEX,
        });

        // index data must be padded to COPY_BUFFER_ALIGNMENT
        let mut index_data = bytemuck::cast_slice(&self.indices).to_vec();
        index_data.resize((index_data.len() + 3) & !3, 0);

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: &index_data,
            usage: BufferUsages::INDEX,
        });

        r_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        r_pass.set_index_buffer(index_buffer.slice(..), IndexFormat::Uint16);
        r_pass.draw_indexed(0..self.indices.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> [Vertex; 4] {
        [Vertex::new([0.0; 3], [1.0; 3], [0.0; 2]); 4]
    }

    #[test]
    fn push_offsets_indices() {
        let mut batch = GeometryBatch::new(None);
        assert!(batch.is_empty());

        assert!(batch.push(&quad(), &[0, 1, 3, 1, 2, 3]));
        assert!(batch.push(&quad(), &[0, 1, 3, 1, 2, 3]));
        assert_eq!(batch.indices, vec![0, 1, 3, 1, 2, 3, 4, 5, 7, 5, 6, 7]);
        assert_eq!(batch.vertices.len(), 8);
    }

    #[test]
    fn refuses_overflow() {
        let mut batch = GeometryBatch::new(Some(TextureId(0)));
        let many = vec![Vertex::new([0.0; 3], [1.0; 3], [0.0; 2]); GeometryBatch::MAX_VERTICES];
        assert!(batch.push(&many, &[0]));
        assert!(!batch.push(&quad(), &[0, 1, 3, 1, 2, 3]));
    }
}
