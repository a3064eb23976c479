use flipbook_render::{Color, Mat4, Vec3, vec3};

/// Placement of a sprite in the world
///
/// `rotation` holds per-axis Euler angles in degrees. A zero `scale` or `rotation` vector
/// means "not set" and is skipped when building the model matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Vec3,
    pub color: Color,
}

impl Transform {
    pub fn new(position: Vec3, scale: Vec3, color: Color) -> Self {
        Self {
            position,
            scale,
            rotation: Vec3::ZERO,
            color,
        }
    }

    /// translate · scale(x, y, 0) · rotX · rotY · rotZ
    pub fn model_matrix(&self) -> Mat4 {
        let mut model = Mat4::from_translation(self.position);

        if self.scale != Vec3::ZERO {
            // sprites are flat, z is collapsed
            model *= Mat4::from_scale(vec3(self.scale.x, self.scale.y, 0.0));
        }

        if self.rotation != Vec3::ZERO {
            model *= Mat4::from_rotation_x(self.rotation.x.to_radians());
            model *= Mat4::from_rotation_y(self.rotation.y.to_radians());
            model *= Mat4::from_rotation_z(self.rotation.z.to_radians());
        }

        model
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, Color::WHITE)
    }
}
