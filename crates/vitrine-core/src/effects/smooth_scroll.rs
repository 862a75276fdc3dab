//! Time-based smooth scrolling

use super::ease_in_out_quad_between;

/// Scroll animation between two window offsets
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
}

impl SmoothScroll {
    pub fn new(from: f64, to: f64, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    /// Progress (0.0 to 1.0)
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Offset to apply on the frame at `now_ms`
    pub fn offset(&self, now_ms: f64) -> f64 {
        if self.is_complete(now_ms) {
            return self.to;
        }
        let elapsed = (now_ms - self.start_ms).max(0.0);
        ease_in_out_quad_between(elapsed, self.from, self.to - self.from, self.duration_ms)
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}
