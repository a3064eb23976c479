use flipbook_render::{Color, DrawSubmit, TextureHandle, TextureId, Vec3, Vertex};

use crate::{
    error::{Error, Result},
    layout::SheetLayout,
    quad::{Anchor, Cell, QUAD_INDICES, frame_uvs, unit_quad},
    time::TimeSource,
    transform::Transform,
};

/// A sprite that plays a sprite sheet in a loop
///
/// The frame shown is a pure function of elapsed time: every [`update`](Self::update)
/// recomputes it from `elapsed_time mod duration`, so looping needs no bookkeeping.
/// The sheet's texture is released when the animation is dropped
#[derive(Debug)]
pub struct SpriteAnimation {
    transform: Transform,
    corners: [Vec3; 4],
    sprite_sheet: Option<TextureHandle>,
    columns: u32,
    rows: u32,
    amount_frames: usize,
    frame_width: f32,
    frame_height: f32,
    duration_secs: f64,
    elapsed_time: f64,
    current_frame: usize,
    mirror_x: bool,
    mirror_y: bool,
}

impl SpriteAnimation {
    /// Creates an animation without a sprite sheet; nothing is loaded yet
    pub fn new(position: Vec3, scale: Vec3, color: Color) -> Self {
        Self {
            transform: Transform::new(position, scale, color),
            corners: unit_quad(Anchor::default()),
            sprite_sheet: None,
            columns: 0,
            rows: 0,
            amount_frames: 0,
            frame_width: 0.0,
            frame_height: 0.0,
            duration_secs: 0.0,
            elapsed_time: 0.0,
            current_frame: 0,
            mirror_x: false,
            mirror_y: false,
        }
    }

    /// Re-aligns the quad so `anchor` sits on the position
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.corners = unit_quad(anchor);
        self
    }

    /// Assigns a sprite sheet split into `columns` × `rows` frames that loop every
    /// `duration_secs`
    ///
    /// Playback is not reset; call [`restart`](Self::restart) for a clean start. The current
    /// frame may lie past the new grid until the next [`update`](Self::update). A previous
    /// sheet is released. On an invalid layout nothing changes & `sheet` is released
    pub fn configure_sprite_sheet(
        &mut self,
        sheet: TextureHandle,
        columns: u32,
        rows: u32,
        duration_secs: f64,
    ) -> Result<()> {
        self.configure_from_layout(sheet, &SheetLayout::new(columns, rows, duration_secs))
    }

    /// Same as [`configure_sprite_sheet`](Self::configure_sprite_sheet) with a stored layout
    pub fn configure_from_layout(
        &mut self,
        sheet: TextureHandle,
        layout: &SheetLayout,
    ) -> Result<()> {
        layout.validate()?;

        log::debug!(
            "sprite sheet {:?}: {}x{} frames over {}s",
            sheet.id(),
            layout.columns,
            layout.rows,
            layout.duration_secs
        );

        self.sprite_sheet = Some(sheet);
        self.columns = layout.columns;
        self.rows = layout.rows;
        self.frame_width = layout.frame_width();
        self.frame_height = layout.frame_height();
        self.amount_frames = layout.amount_frames();
        self.duration_secs = layout.duration_secs;
        Ok(())
    }

    /// Advances playback by `delta_time` seconds & recomputes the current frame
    pub fn update(&mut self, delta_time: f32) {
        self.elapsed_time += delta_time as f64;

        if self.amount_frames == 0 {
            return;
        }

        let normalized = self.elapsed_time.rem_euclid(self.duration_secs);
        let frame = (normalized / self.duration_secs * self.amount_frames as f64) as usize;
        // rounding can land exactly on amount_frames right before a wrap
        self.current_frame = frame.min(self.amount_frames - 1);
    }

    /// [`update`](Self::update) with the delta from `time`
    pub fn tick(&mut self, time: &impl TimeSource) {
        self.update(time.delta_time());
    }

    /// Jumps to `frame` until the next update recomputes it
    ///
    /// Only `0 < frame < amount_frames` is accepted; frame 0 is rejected too. Rejected frames
    /// leave the current frame untouched
    pub fn set_frame(&mut self, frame: usize) -> Result<()> {
        if frame > 0 && frame < self.amount_frames {
            self.current_frame = frame;
            Ok(())
        } else {
            log::warn!(
                "Frame {} out of bounds! ({} frames)",
                frame,
                self.amount_frames
            );
            Err(Error::FrameOutOfRange {
                frame,
                amount_frames: self.amount_frames,
            })
        }
    }

    pub fn set_mirror_x(&mut self, mirror: bool) {
        self.mirror_x = mirror;
    }

    pub fn set_mirror_y(&mut self, mirror: bool) {
        self.mirror_y = mirror;
    }

    /// Rewinds to the first frame
    pub fn restart(&mut self) {
        self.elapsed_time = 0.0;
        self.current_frame = 0;
    }

    /// Texture coordinates of the current frame, per quad corner
    pub fn uv_coords(&self) -> [[f32; 2]; 4] {
        let cell = Cell::of(
            self.current_frame,
            self.columns,
            self.frame_width,
            self.frame_height,
        );
        frame_uvs(cell, self.mirror_x, self.mirror_y)
    }

    /// The quad in local space with color & current-frame UVs
    pub fn vertices(&self) -> [Vertex; 4] {
        let color = self.transform.color.rgb();
        let uvs = self.uv_coords();
        std::array::from_fn(|i| Vertex::new(self.corners[i].to_array(), color, uvs[i]))
    }

    /// Submits the current frame to `renderer`
    pub fn draw(&self, renderer: &mut impl DrawSubmit) {
        renderer.submit_geometry(
            self.transform.model_matrix(),
            &self.vertices(),
            &QUAD_INDICES,
            self.texture_id(),
        );
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Current frame with the horizontal mirror sign applied (negative while mirrored)
    pub fn signed_frame(&self) -> i64 {
        let sign = if self.mirror_x { -1 } else { 1 };
        self.current_frame as i64 * sign
    }

    pub fn amount_frames(&self) -> usize {
        self.amount_frames
    }

    /// Sheet grid as `(columns, rows)`
    pub fn grid(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_height
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn mirror_x(&self) -> bool {
        self.mirror_x
    }

    pub fn mirror_y(&self) -> bool {
        self.mirror_y
    }

    pub fn texture_id(&self) -> Option<TextureId> {
        self.sprite_sheet.as_ref().map(TextureHandle::id)
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use flipbook_render::{ReleaseQueue, TextureId, submit::Recorder, vec3};

    use super::*;
    use crate::time::FixedStep;

    fn sheet(queue: &Rc<ReleaseQueue>, id: usize) -> TextureHandle {
        TextureHandle::new(TextureId(id), queue.clone())
    }

    fn animation(columns: u32, rows: u32, duration: f64) -> (SpriteAnimation, Rc<ReleaseQueue>) {
        let queue = Rc::new(ReleaseQueue::default());
        let mut anim = SpriteAnimation::new(Vec3::ZERO, vec3(64.0, 64.0, 1.0), Color::WHITE);
        anim.configure_sprite_sheet(sheet(&queue, 0), columns, rows, duration)
            .unwrap();
        (anim, queue)
    }

    #[test]
    fn configure_computes_grid() {
        let (anim, _queue) = animation(4, 2, 2.0);
        assert_eq!(anim.amount_frames(), 8);
        assert_eq!(anim.grid(), (4, 2));
        assert_eq!(anim.frame_width(), 0.25);
        assert_eq!(anim.frame_height(), 0.5);
        assert_eq!(anim.duration_secs(), 2.0);
        assert_eq!(anim.texture_id(), Some(TextureId(0)));
    }

    #[test]
    fn update_picks_frame_from_elapsed_time() {
        // 0.26 / 1.0 * 4 = 1.04 -> frame 1
        let (mut anim, _queue) = animation(4, 1, 1.0);
        anim.update(0.26);
        assert_eq!(anim.current_frame(), 1);

        anim.update(0.5);
        assert_eq!(anim.current_frame(), 3);
    }

    #[test]
    fn frame_stays_in_range() {
        let (mut anim, _queue) = animation(3, 2, 0.7);
        for _ in 0..500 {
            anim.update(0.013);
            assert!(anim.current_frame() < anim.amount_frames());
        }
    }

    #[test]
    fn loops_after_full_duration() {
        let (mut anim, _queue) = animation(4, 1, 1.0);
        let start = anim.current_frame();

        for _ in 0..4 {
            anim.update(0.25);
        }
        assert_eq!(anim.current_frame(), start);
        assert_eq!(anim.elapsed_time(), 1.0);
    }

    #[test]
    fn tick_reads_time_source() {
        let (mut anim, _queue) = animation(8, 1, 0.8);
        let step = FixedStep(0.1);
        for _ in 0..3 {
            anim.tick(&step);
        }
        assert_eq!(anim.current_frame(), 3);
    }

    #[test]
    fn unconfigured_animation_only_accumulates_time() {
        let mut anim = SpriteAnimation::new(Vec3::ZERO, Vec3::ONE, Color::WHITE);
        anim.update(0.5);
        assert_eq!(anim.current_frame(), 0);
        assert_eq!(anim.elapsed_time(), 0.5);
        assert!(anim.uv_coords().iter().flatten().all(|c| c.is_finite()));
    }

    #[test]
    fn set_frame_rejects_zero_and_past_the_end() {
        let (mut anim, _queue) = animation(4, 1, 1.0);
        anim.update(0.5);
        assert_eq!(anim.current_frame(), 2);

        assert_eq!(
            anim.set_frame(0),
            Err(Error::FrameOutOfRange {
                frame: 0,
                amount_frames: 4
            })
        );
        assert_eq!(anim.current_frame(), 2);

        assert!(anim.set_frame(4).is_err());
        assert_eq!(anim.current_frame(), 2);

        assert!(anim.set_frame(3).is_ok());
        assert_eq!(anim.current_frame(), 3);
    }

    #[test]
    fn mirror_x_flips_uvs_not_frame() {
        let (mut anim, _queue) = animation(4, 1, 1.0);
        anim.update(0.26);
        let plain = anim.uv_coords();

        anim.set_mirror_x(true);
        anim.update(0.0);
        assert_eq!(anim.current_frame(), 1);
        assert_eq!(anim.signed_frame(), -1);

        // same cell, left & right edges swapped
        let mirrored = anim.uv_coords();
        assert_eq!(mirrored, [[0.25, 1.0], [0.25, 0.0], [0.5, 0.0], [0.5, 1.0]]);
        assert_eq!(
            mirrored.map(|c| c[0]),
            [plain[2][0], plain[3][0], plain[0][0], plain[1][0]]
        );

        anim.set_mirror_x(false);
        assert_eq!(anim.uv_coords(), plain);
    }

    #[test]
    fn configure_keeps_playback_position() {
        let (mut anim, queue) = animation(4, 1, 1.0);
        anim.update(0.6);
        assert_eq!(anim.current_frame(), 2);

        anim.configure_sprite_sheet(sheet(&queue, 1), 2, 1, 1.0)
            .unwrap();
        assert_eq!(anim.elapsed_time(), 0.6f32 as f64);
        assert_eq!(anim.current_frame(), 2);

        // the next update folds the frame back into the smaller grid
        anim.update(0.0);
        assert_eq!(anim.current_frame(), 1);

        anim.restart();
        assert_eq!(anim.current_frame(), 0);
        assert_eq!(anim.elapsed_time(), 0.0);
    }

    #[test]
    fn invalid_configuration_changes_nothing() {
        let (mut anim, queue) = animation(4, 1, 1.0);

        let err = anim.configure_sprite_sheet(sheet(&queue, 7), 0, 1, 1.0);
        assert!(matches!(err, Err(Error::InvalidConfig { .. })));
        assert!(anim.configure_sprite_sheet(sheet(&queue, 8), 2, 2, 0.0).is_err());

        assert_eq!(anim.amount_frames(), 4);
        assert_eq!(anim.texture_id(), Some(TextureId(0)));
        // the rejected sheets were handed back to the owner
        assert_eq!(queue.drain(), vec![TextureId(7), TextureId(8)]);
    }

    #[test]
    fn sheet_released_on_replace_and_drop() {
        let (mut anim, queue) = animation(4, 1, 1.0);
        anim.configure_from_layout(sheet(&queue, 1), &SheetLayout::new(2, 2, 1.0))
            .unwrap();
        assert_eq!(queue.drain(), vec![TextureId(0)]);

        drop(anim);
        assert_eq!(queue.drain(), vec![TextureId(1)]);
    }

    #[test]
    fn draw_submits_textured_quad() {
        let (mut anim, _queue) = animation(4, 1, 1.0);
        anim.transform_mut().position = vec3(100.0, 50.0, 0.0);
        anim.transform_mut().color = Color::RED;
        anim.update(0.26);

        let mut recorder = Recorder::default();
        anim.draw(&mut recorder);

        let call = recorder.last().unwrap();
        assert_eq!(call.indices, vec![0, 1, 3, 1, 2, 3]);
        assert_eq!(call.texture, Some(TextureId(0)));
        assert_eq!(call.model, anim.transform().model_matrix());
        assert_eq!(call.vertices.len(), 4);

        let uvs: Vec<_> = call.vertices.iter().map(Vertex::tex_coords).collect();
        assert_eq!(uvs, vec![[0.5, 1.0], [0.5, 0.0], [0.25, 0.0], [0.25, 1.0]]);
        assert!(call.vertices.iter().all(|v| v.color() == [1.0, 0.0, 0.0]));
        assert_eq!(call.vertices[0].position(), [0.5, 0.5, 0.0]);
    }

    #[test]
    fn draw_without_sheet_uses_fallback_texture() {
        let anim = SpriteAnimation::new(Vec3::ZERO, Vec3::ONE, Color::WHITE)
            .with_anchor(Anchor::TopLeft);
        let mut recorder = Recorder::default();
        anim.draw(&mut recorder);

        let call = recorder.last().unwrap();
        assert_eq!(call.texture, None);
        assert_eq!(call.vertices[2].position(), [0.0, 0.0, 0.0]);
    }
}
