use std::time::Duration;

/// Rolling frame-rate meter, refreshed once per second of frame time.
#[derive(Debug, Default)]
pub struct FpsCounter {
    frame_count: u32,
    accumulated_time: Duration,
    pub current_fps: f32,
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame of length `delta`. Returns the new rate whenever a
    /// full second has accumulated.
    pub fn update(&mut self, delta: Duration) -> Option<f32> {
        self.frame_count += 1;
        self.accumulated_time += delta;

        if self.accumulated_time.as_secs_f32() >= 1.0 {
            self.current_fps = self.frame_count as f32 / self.accumulated_time.as_secs_f32();

            self.accumulated_time = Duration::ZERO;
            self.frame_count = 0;

            return Some(self.current_fps);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let mut fps = FpsCounter::new();
        let frame = Duration::from_millis(250);
        assert_eq!(fps.update(frame), None);
        assert_eq!(fps.update(frame), None);
        assert_eq!(fps.update(frame), None);
        let rate = fps.update(frame).unwrap();
        assert!((rate - 4.0).abs() < 1e-4);
    }
}
