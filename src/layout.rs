use crate::error::{Error, Result};

/// Grid & timing of a sprite sheet, independent of the texture it belongs to
///
/// With the `serde` feature this can live in asset descriptions, e.g.
/// `{ "columns": 8, "rows": 1, "duration_secs": 0.8 }`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetLayout {
    pub columns: u32,
    pub rows: u32,
    /// Time for one pass over every frame
    pub duration_secs: f64,
}

impl SheetLayout {
    pub fn new(columns: u32, rows: u32, duration_secs: f64) -> Self {
        Self {
            columns,
            rows,
            duration_secs,
        }
    }

    /// Rejects layouts that would divide by zero when computing frames
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(Error::invalid_config(format!(
                "grid must be at least 1x1, got {}x{}",
                self.columns, self.rows
            )));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(Error::invalid_config(format!(
                "duration must be a positive number of seconds, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }

    pub fn amount_frames(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn frame_width(&self) -> f32 {
        1.0 / self.columns as f32
    }

    pub fn frame_height(&self) -> f32 {
        1.0 / self.rows as f32
    }
}
