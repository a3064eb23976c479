use flipbook_render::{Vec3, vec3};

/// Two triangles over the four quad corners
pub const QUAD_INDICES: [u16; 6] = [0, 1, 3, 1, 2, 3];

/// Which point of the unit quad sits on the transform position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
}

/// Unit quad corners in local space, aligned to `anchor`
///
/// Order: (1,1) (1,0) (0,0) (0,1), matching the UV order of [`frame_uvs`]
pub fn unit_quad(anchor: Anchor) -> [Vec3; 4] {
    let offset = match anchor {
        Anchor::TopLeft => Vec3::ZERO,
        Anchor::Center => vec3(-0.5, -0.5, 0.0),
    };
    [
        vec3(1.0, 1.0, 0.0),
        vec3(1.0, 0.0, 0.0),
        vec3(0.0, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
    ]
    .map(|corner| corner + offset)
}

/// A frame cell on a sprite sheet grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub column: u32,
    pub row: u32,
    pub width: f32,
    pub height: f32,
}

impl Cell {
    /// Row-major cell of `frame` on a grid `columns` wide; an empty grid yields the origin
    pub fn of(frame: usize, columns: u32, width: f32, height: f32) -> Self {
        let (column, row) = match columns {
            0 => (0, 0),
            c => ((frame % c as usize) as u32, (frame / c as usize) as u32),
        };
        Self {
            column,
            row,
            width,
            height,
        }
    }
}

/// Per-corner texture coordinates for `cell`
///
/// Mirroring swaps the cell's edges on that axis, so the same cell is sampled flipped
pub fn frame_uvs(cell: Cell, mirror_x: bool, mirror_y: bool) -> [[f32; 2]; 4] {
    let (mut left, mut right) = (
        cell.width * cell.column as f32,
        cell.width * (cell.column + 1) as f32,
    );
    let (mut top, mut bottom) = (
        cell.height * cell.row as f32,
        cell.height * (cell.row + 1) as f32,
    );

    if mirror_x {
        std::mem::swap(&mut left, &mut right);
    }
    if mirror_y {
        std::mem::swap(&mut top, &mut bottom);
    }

    [[right, bottom], [right, top], [left, top], [left, bottom]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_quad_straddles_origin() {
        let q = unit_quad(Anchor::Center);
        assert_eq!(q[0], vec3(0.5, 0.5, 0.0));
        assert_eq!(q[2], vec3(-0.5, -0.5, 0.0));
        assert_eq!(unit_quad(Anchor::TopLeft)[2], Vec3::ZERO);
    }

    #[test]
    fn single_row_strip_spans_full_height() {
        // 4 frames in one row: frame 2 covers u 0.5..0.75, v 0..1
        let uvs = frame_uvs(Cell::of(2, 4, 0.25, 1.0), false, false);
        assert_eq!(uvs, [[0.75, 1.0], [0.75, 0.0], [0.5, 0.0], [0.5, 1.0]]);
    }

    #[test]
    fn grid_cells_are_row_major() {
        let cell = Cell::of(5, 4, 0.25, 0.5);
        assert_eq!((cell.column, cell.row), (1, 1));

        let uvs = frame_uvs(cell, false, false);
        assert_eq!(uvs, [[0.5, 1.0], [0.5, 0.5], [0.25, 0.5], [0.25, 1.0]]);
    }

    #[test]
    fn mirroring_flips_within_the_same_cell() {
        let cell = Cell::of(1, 4, 0.25, 1.0);
        let plain = frame_uvs(cell, false, false);

        let flipped = frame_uvs(cell, true, false);
        assert_eq!(flipped, [[0.25, 1.0], [0.25, 0.0], [0.5, 0.0], [0.5, 1.0]]);
        for (p, f) in plain.iter().zip(flipped.iter()) {
            assert_eq!(f[1], p[1]);
        }

        let upside_down = frame_uvs(cell, false, true);
        assert_eq!(upside_down, [[0.5, 0.0], [0.5, 1.0], [0.25, 1.0], [0.25, 0.0]]);
    }

    #[test]
    fn mirrored_frames_keep_their_cell() {
        // sampled region as (min u, max u, min v, max v)
        let bounds = |uvs: [[f32; 2]; 4]| {
            let u = uvs.map(|c| c[0]);
            let v = uvs.map(|c| c[1]);
            (
                u.iter().copied().fold(f32::INFINITY, f32::min),
                u.iter().copied().fold(f32::NEG_INFINITY, f32::max),
                v.iter().copied().fold(f32::INFINITY, f32::min),
                v.iter().copied().fold(f32::NEG_INFINITY, f32::max),
            )
        };

        for frame in 0..8 {
            let cell = Cell::of(frame, 4, 0.25, 0.5);
            let plain = bounds(frame_uvs(cell, false, false));
            for (mx, my) in [(true, false), (false, true), (true, true)] {
                assert_eq!(bounds(frame_uvs(cell, mx, my)), plain, "frame {frame}");
            }
        }
    }

    #[test]
    fn empty_grid_is_degenerate_but_finite() {
        let uvs = frame_uvs(Cell::of(3, 0, 0.0, 0.0), false, false);
        assert!(uvs.iter().flatten().all(|c| *c == 0.0));
    }
}
