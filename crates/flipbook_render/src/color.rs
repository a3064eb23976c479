use ::color::{AlphaColor, LinearSrgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    inner: AlphaColor<LinearSrgb>,
}

impl Color {
    /// Create a new Color from RGBA components in [0..1]
    pub const fn new(components: [f32; 4]) -> Self {
        Self {
            inner: AlphaColor::new(components),
        }
    }

    /// Create a Color from 8-bit RGBA channels
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new([r, g, b, a].map(|c| c as f32 / 255.0))
    }

    /// Get raw RGBA components
    pub fn components(&self) -> [f32; 4] {
        self.inner.components
    }

    /// RGB components only; sprite vertices carry no alpha
    pub fn rgb(&self) -> [f32; 3] {
        let [r, g, b, _] = self.components();
        [r, g, b]
    }
}

impl Color {
    pub const BLACK: Color = Self {
        inner: AlphaColor::BLACK,
    };
    pub const WHITE: Color = Self {
        inner: AlphaColor::WHITE,
    };
    pub const TRANSPARENT: Color = Self {
        inner: AlphaColor::TRANSPARENT,
    };
    pub const RED: Color = Self {
        inner: AlphaColor::new([1., 0., 0., 1.]),
    };
    pub const GREEN: Color = Self {
        inner: AlphaColor::new([0., 1., 0., 1.]),
    };
    pub const BLUE: Color = Self {
        inner: AlphaColor::new([0., 0., 1., 1.]),
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

// Convert Color to wgpu::Color (f64 RGBA)
impl From<Color> for wgpu::Color {
    fn from(value: Color) -> Self {
        let [r, g, b, a] = value.components();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_is_normalized() {
        let c = Color::from_rgba8(255, 0, 51, 255);
        assert_eq!(c.components(), [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(c.rgb(), [1.0, 0.0, 0.2]);
    }
}
