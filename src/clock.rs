use web_time::Instant;

/// Measures the time between frames for [`SignAnimationPlayer::tick`](crate::animation::SignAnimationPlayer::tick)
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Seconds since the previous call (or since creation)
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;

        delta.as_secs_f32()
    }
}
