use std::{cell::RefCell, fmt, rc::Rc};

use wgpu::{
    AddressMode, BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindingResource,
    Device, Extent3d, FilterMode, Origin3d, Queue, RenderPass, SamplerDescriptor,
    TexelCopyBufferLayout, TexelCopyTextureInfo, TextureAspect, TextureDescriptor,
    TextureDimension, TextureFormat, TextureUsages,
};

/// Opaque identifier of a texture owned by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Something that frees textures once nobody references them anymore
pub trait TextureRelease {
    fn release(&self, id: TextureId);
}

/// Owning reference to a loaded texture
///
/// Dropping the handle signals its owner exactly once that the texture can be freed.
/// The handle never touches the texture memory itself
pub struct TextureHandle {
    id: TextureId,
    owner: Rc<dyn TextureRelease>,
}

impl TextureHandle {
    pub fn new(id: TextureId, owner: Rc<dyn TextureRelease>) -> Self {
        Self { id, owner }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }
}

impl Drop for TextureHandle {
    fn drop(&mut self) {
        self.owner.release(self.id);
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextureHandle").field(&self.id.0).finish()
    }
}

/// Queue of texture ids waiting to be freed
///
/// Handles push into it when dropped; the renderer drains it at the start of every frame
#[derive(Debug, Default)]
pub struct ReleaseQueue {
    pending: RefCell<Vec<TextureId>>,
}

impl ReleaseQueue {
    /// Takes every id released since the last call
    pub fn drain(&self) -> Vec<TextureId> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl TextureRelease for ReleaseQueue {
    fn release(&self, id: TextureId) {
        self.pending.borrow_mut().push(id);
    }
}

/// A GPU texture that can be bound in shaders for rendering
///
/// Wraps a `wgpu::Texture`, its view, sampler, & bind group
pub(crate) struct Texture {
    bind_group: BindGroup,
}

impl Texture {
    /// Creates a new texture from raw RGBA image data,
    /// uploads the data, & builds the bind group using the layout
    ///
    /// - `data`: Must be in tightly packed 8-bit RGBA format
    /// - `width`, `height`: Dimensions of the image in pixels
    pub fn from_bytes(
        device: &Device,
        queue: &Queue,
        bind_group_layout: &BindGroupLayout,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Self {
        let size = Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&TextureDescriptor {
            label: Some("Sprite Sheet"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            data,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&Default::default());
        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("Sprite Sheet Sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Nearest,
            ..Default::default()
        });
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: None,
            layout: bind_group_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: BindingResource::TextureView(&view),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self { bind_group }
    }

    /// Creates a 1×1 white fallback texture
    ///
    /// Used when no valid texture is provided for a draw call
    pub fn create_default(device: &Device, queue: &Queue, layout: &BindGroupLayout) -> Self {
        Self::from_bytes(device, queue, layout, &[255u8, 255, 255, 255], 1, 1)
    }

    /// Binds this texture at the given index in the render pass
    ///
    /// - `index` must match the bind group index used in the pipeline layout
    pub fn bind(&self, pass: &mut RenderPass<'_>, index: u32) {
        pass.set_bind_group(index, &self.bind_group, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_handle_releases_once() {
        let queue = Rc::new(ReleaseQueue::default());
        let handle = TextureHandle::new(TextureId(3), queue.clone());
        assert!(queue.is_empty());

        drop(handle);
        assert_eq!(queue.drain(), vec![TextureId(3)]);
        // drained ids are gone
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn handles_release_in_drop_order() {
        let queue = Rc::new(ReleaseQueue::default());
        let a = TextureHandle::new(TextureId(0), queue.clone());
        let b = TextureHandle::new(TextureId(1), queue.clone());

        drop(b);
        drop(a);
        assert_eq!(queue.drain(), vec![TextureId(1), TextureId(0)]);
    }
}
