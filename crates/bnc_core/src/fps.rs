//! Windowed frames-per-second measurement.
//!
//! Frames are counted until the tick clock passes `next_check`. The rate is
//! then `frames * 1000 / (now - next_check + interval)`. The elapsed term is
//! offset by the interval because the deadline itself was set as
//! `previous_check + interval`, so `now - next_check + interval` approximates
//! the time since the previous check.
//!
//! A reading moves the deadline forward but leaves the frame count alone;
//! the caller resets it once the reading has been displayed. A reading that
//! could not be displayed therefore folds its frames into the next one.

pub const DEFAULT_FPS_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval_ms: u64,
    next_check_ms: u64,
    frames: u32,
}

impl FpsCounter {
    pub fn new(start_ms: u64, interval_ms: u64) -> Self {
        Self {
            interval_ms,
            next_check_ms: start_ms + interval_ms,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn next_check_ms(&self) -> u64 {
        self.next_check_ms
    }

    /// Count one presented frame. Returns the measured rate when `now_ms`
    /// is past the deadline, which then moves to `now_ms + interval`.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.frames += 1;
        if now_ms <= self.next_check_ms {
            return None;
        }

        let elapsed_ms = now_ms - self.next_check_ms + self.interval_ms;
        let fps = compute_fps(self.frames, elapsed_ms);
        self.next_check_ms = now_ms + self.interval_ms;
        Some(fps)
    }

    /// Start counting a fresh window.
    pub fn reset(&mut self) {
        self.frames = 0;
    }
}

pub fn compute_fps(frames: u32, elapsed_ms: u64) -> f32 {
    if elapsed_ms == 0 {
        return 0.0;
    }
    (frames as f64 * 1000.0 / elapsed_ms as f64) as f32
}

pub fn format_fps(fps: f32) -> String {
    format!("FPS: {fps:.1}")
}
