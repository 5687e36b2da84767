use embassy_time::{Duration, Instant};

use crate::math8::progress8;

/// Time-driven mix ratio for crossfading two buffers
///
/// Feed `mix_at` into `Engine::blend` once per frame to fade from the
/// current buffer to the next one over `duration`.
#[derive(Debug, Clone, Copy)]
pub struct Crossfade {
    /// Total transition duration
    duration: Duration,
    /// Time at which the transition started
    start_time: Instant,
}

impl Crossfade {
    pub const fn new(duration: Duration, start_time: Instant) -> Self {
        Self {
            duration,
            start_time,
        }
    }

    /// Restart the transition at `start_time`
    pub fn restart(&mut self, start_time: Instant) {
        self.start_time = start_time;
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Progress at `now` as 0-255
    pub fn progress(&self, now: Instant) -> u8 {
        let elapsed = now
            .checked_duration_since(self.start_time)
            .unwrap_or(Duration::from_millis(0));
        progress8(elapsed, self.duration)
    }

    /// Mix ratio at `now` in `[0, 1]`
    pub fn mix_at(&self, now: Instant) -> f32 {
        f32::from(self.progress(now)) / 255.0
    }

    /// Check if the transition has finished at `now`
    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) == u8::MAX
    }
}
