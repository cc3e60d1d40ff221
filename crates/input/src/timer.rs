use std::time::Instant;

/// Per-frame timing owned by the host loop.
///
/// Each [`tick`](FrameTimer::tick) returns the seconds elapsed since the
/// previous one, capped so that a stalled frame cannot fling the camera.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last: Option<Instant>,
    max_delta: f32,
}

impl FrameTimer {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Record a frame boundary at `now` and return the clamped delta in seconds.
    ///
    /// The first tick returns 0. A `now` earlier than the previous tick also returns 0.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now
                .saturating_duration_since(last)
                .as_secs_f32()
                .min(self.max_delta),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_tick_is_zero() {
        let mut timer = FrameTimer::default();
        assert_eq!(timer.tick(Instant::now()), 0.0);
    }

    #[test]
    fn tick_measures_elapsed() {
        let mut timer = FrameTimer::new(1.0);
        let t0 = Instant::now();
        timer.tick(t0);
        let dt = timer.tick(t0 + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn tick_is_clamped() {
        let mut timer = FrameTimer::new(0.1);
        let t0 = Instant::now();
        timer.tick(t0);
        assert_eq!(timer.tick(t0 + Duration::from_secs(3)), 0.1);
    }

    #[test]
    fn going_backwards_yields_zero() {
        let mut timer = FrameTimer::default();
        let t0 = Instant::now() + Duration::from_secs(1);
        timer.tick(t0);
        assert_eq!(timer.tick(t0 - Duration::from_millis(500)), 0.0);
    }
}
