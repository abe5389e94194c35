#![forbid(unsafe_code)]

//! Per-render timing metrics.

use std::time::{Duration, Instant};

/// Timing of the most recent render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Frames per second, from the interval between the last two render starts.
    pub fps: f64,
    /// Start of the most recent render.
    pub last_time: Instant,
    /// Time spent inside the most recent render.
    pub delta_time: Duration,
}

impl FrameTiming {
    /// Timing before any render happened.
    pub fn new(now: Instant) -> Self {
        Self {
            fps: 0.0,
            last_time: now,
            delta_time: Duration::ZERO,
        }
    }

    /// Record a render that started at `start` and took `delta_time`.
    ///
    /// A zero interval since the previous start keeps the previous fps.
    pub fn record(&mut self, start: Instant, delta_time: Duration) {
        let interval = start.saturating_duration_since(self.last_time);
        if !interval.is_zero() {
            self.fps = 1.0 / interval.as_secs_f64();
        }
        self.last_time = start;
        self.delta_time = delta_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_from_interval_between_starts() {
        let t0 = Instant::now();
        let mut timing = FrameTiming::new(t0);
        timing.record(t0 + Duration::from_millis(20), Duration::from_millis(3));
        assert!((timing.fps - 50.0).abs() < 1e-9);
        assert_eq!(timing.delta_time, Duration::from_millis(3));
        assert_eq!(timing.last_time, t0 + Duration::from_millis(20));
    }

    #[test]
    fn zero_interval_keeps_previous_fps() {
        let t0 = Instant::now();
        let mut timing = FrameTiming::new(t0);
        timing.record(t0 + Duration::from_millis(10), Duration::ZERO);
        let fps = timing.fps;
        timing.record(t0 + Duration::from_millis(10), Duration::ZERO);
        assert_eq!(timing.fps, fps);
    }
}
