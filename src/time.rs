#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
fn now() -> f32 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| (p.now() / 1000.0) as f32)
}

#[cfg(not(target_arch = "wasm32"))]
fn now(start: Instant) -> f32 {
    start.elapsed().as_secs_f32()
}

/// Provides the time elapsed since the previous frame, in seconds
pub trait TimeSource {
    fn delta_time(&self) -> f32;
}

/// Wall-clock frame timer
///
/// Call [`FrameTimer::update`] once per frame, then read `delta`
pub struct FrameTimer {
    #[cfg(not(target_arch = "wasm32"))]
    start: Instant,
    last_time: f32,
    /// Seconds between the two latest updates
    pub delta: f32,
    /// Updates since creation
    pub frame: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: Instant::now(),
            last_time: 0.0,
            delta: 0.0,
            frame: 0,
        }
    }
}

impl FrameTimer {
    /// Samples the clock & stores the delta since the previous sample
    pub fn update(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        let sample = now(self.start);
        #[cfg(target_arch = "wasm32")]
        let sample = now();

        self.delta = (sample - self.last_time).max(0.0);
        self.last_time = sample;
        self.frame += 1;
    }
}

impl TimeSource for FrameTimer {
    fn delta_time(&self) -> f32 {
        self.delta
    }
}

/// Constant delta, for deterministic playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep(pub f32);

impl TimeSource for FixedStep {
    fn delta_time(&self) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_timer_counts_frames() {
        let mut timer = FrameTimer::default();
        timer.update();
        timer.update();

        assert_eq!(timer.frame, 2);
        assert!(timer.delta >= 0.0);
        assert_eq!(timer.delta_time(), timer.delta);
    }

    #[test]
    fn fixed_step_is_constant() {
        let step = FixedStep(1.0 / 60.0);
        assert_eq!(step.delta_time(), step.delta_time());
        assert_eq!(step.delta_time(), 1.0 / 60.0);
    }
}
