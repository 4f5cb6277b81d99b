use std::time::{Duration, Instant};

/// Frame clock. The first tick reports a zero delta.
#[derive(Debug, Default)]
pub struct Timer {
    last_tick: Option<Instant>,
    /// Time since last tick
    pub delta: Duration,
    /// Sum of all deltas so far
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples the wall clock and returns the delta since the previous tick.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Duration {
        self.delta = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.delta
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}
