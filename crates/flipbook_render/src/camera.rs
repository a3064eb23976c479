use glam::{Mat4, Vec2};

/// Orthographic 2D camera
///
/// World units are pixels at zoom 1.0; y grows downwards
pub struct Camera {
    position: Vec2,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Set the world point shown in the center of the screen
    pub fn target(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Set zoom level, clamped between 0.1 & 10.0
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(0.1, 10.0);
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Returns the orthographic view-projection matrix for the current camera state
    pub fn view_proj(&self, screen_size: Vec2) -> Mat4 {
        let half = screen_size / 2.0 / self.zoom;

        let left = self.position.x - half.x;
        let right = self.position.x + half.x;
        let bottom = self.position.y - half.y;
        let top = self.position.y + half.y;

        Mat4::orthographic_lh(left, right, top, bottom, -1.0, 1.0)
    }
}
