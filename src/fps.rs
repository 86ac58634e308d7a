//! Frames-per-second counter
//!
//! Counts frames and reports an average once per interval.

use crate::consts::FPS_INTERVAL_MS;

#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval_ms: f64,
    last_timestamp: f64,
    frames: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(FPS_INTERVAL_MS)
    }
}

impl FpsCounter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_timestamp: 0.0,
            frames: 0,
        }
    }

    /// Count a frame; returns the FPS once `interval_ms` has passed since the last report
    pub fn record(&mut self, timestamp: f64) -> Option<f64> {
        self.frames += 1;
        let elapsed = timestamp - self.last_timestamp;
        if elapsed < self.interval_ms || elapsed <= 0.0 {
            return None;
        }
        let fps = 1000.0 * self.frames as f64 / elapsed;
        self.last_timestamp = timestamp;
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_after_interval() {
        let mut fps = FpsCounter::new(1000.0);
        for i in 1..60 {
            assert_eq!(fps.record(i as f64 * 1000.0 / 60.0), None);
        }
        let reported = fps.record(1000.0).unwrap();
        assert!((reported - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_resets_between_reports() {
        let mut fps = FpsCounter::new(500.0);
        assert_eq!(fps.record(250.0), None);
        assert_eq!(fps.record(500.0), Some(4.0));
        assert_eq!(fps.record(750.0), None);
        assert_eq!(fps.record(1000.0), Some(4.0));
    }
}
