use std::time::{Duration, Instant};

const FRAME_TIME_SAMPLE_COUNT: usize = 60;

/// Wall-clock bookkeeping for the render loop: a millisecond tick counter
/// since startup (what the FPS counter consumes) plus a smoothed frame time
/// for the debug panel.
pub struct FrameClock {
    start: Instant,
    last_instant: Instant,
    pub frame_count: u64,
    pub real_dt: f64,

    frame_time_samples: [f64; FRAME_TIME_SAMPLE_COUNT],
    frame_time_index: usize,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_instant: start,
            frame_count: 0,
            real_dt: 0.0,
            frame_time_samples: [1.0 / 60.0; FRAME_TIME_SAMPLE_COUNT],
            frame_time_index: 0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    pub fn begin_frame_at(&mut self, now: Instant) {
        self.real_dt = now.saturating_duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.frame_count += 1;

        self.frame_time_samples[self.frame_time_index] = self.real_dt;
        self.frame_time_index = (self.frame_time_index + 1) % FRAME_TIME_SAMPLE_COUNT;
        let avg_dt: f64 =
            self.frame_time_samples.iter().sum::<f64>() / FRAME_TIME_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
    }

    /// Milliseconds between startup and the start of the current frame.
    pub fn ticks_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Milliseconds between startup and this call.
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn elapsed(&self) -> Duration {
        self.last_instant.duration_since(self.start)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_follow_frame_starts() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.ticks_ms(), 0);

        clock.begin_frame_at(start + Duration::from_millis(16));
        clock.begin_frame_at(start + Duration::from_millis(40));
        assert_eq!(clock.ticks_ms(), 40);
        assert_eq!(clock.frame_count, 2);
        assert!((clock.real_dt - 0.024).abs() < 1e-9);
    }

    #[test]
    fn now_reads_past_frame_start() {
        let start = Instant::now() - Duration::from_millis(500);
        let mut clock = FrameClock::starting_at(start);
        clock.begin_frame_at(start + Duration::from_millis(100));
        assert_eq!(clock.ticks_ms(), 100);
        assert!(clock.now_ms() >= 500);
    }

    #[test]
    fn smoothed_frame_time_converges() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        for i in 1..=FRAME_TIME_SAMPLE_COUNT as u64 {
            clock.begin_frame_at(start + Duration::from_millis(i * 20));
        }
        assert!((clock.smoothed_frame_time_ms - 20.0).abs() < 1e-6);
    }
}
