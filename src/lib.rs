//! Sprite sheet animations: a looping frame clock plus the textured quad that shows the
//! current frame
//!
//! ```no_run
//! use flipbook::{SpriteAnimation, render::{Color, vec3}};
//! # fn run(renderer: &mut flipbook::render::Renderer, png: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let mut walk = SpriteAnimation::new(vec3(400.0, 300.0, 0.0), vec3(128.0, 128.0, 1.0), Color::WHITE);
//! walk.configure_sprite_sheet(renderer.add_texture(png)?, 8, 1, 0.8)?;
//!
//! walk.update(1.0 / 60.0);
//! walk.draw(renderer);
//! renderer.render_frame();
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod error;
pub mod layout;
pub mod quad;
pub mod time;
pub mod transform;

pub use flipbook_render as render;

pub use animation::SpriteAnimation;
pub use error::{Error, Result};
pub use layout::SheetLayout;
pub use quad::Anchor;
pub use time::{FixedStep, FrameTimer, TimeSource};
pub use transform::Transform;
