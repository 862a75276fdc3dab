//! Easing functions

/// Quadratic ease-in-out over normalized time `t` in `0..=1`
#[inline]
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Quadratic ease-in-out in the `(elapsed, start, change, duration)` form
///
/// Returns `start` at `elapsed = 0` and `start + change` at
/// `elapsed >= duration`.
#[inline]
pub fn ease_in_out_quad_between(elapsed: f64, start: f64, change: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return start + change;
    }
    start + change * ease_in_out_quad(elapsed / duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_quad_endpoints() {
        assert!((ease_in_out_quad(0.0) - 0.0).abs() < 0.001);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 0.001);
        assert!((ease_in_out_quad(1.0) - 1.0).abs() < 0.001);
        // Out of range input is clamped
        assert!((ease_in_out_quad(2.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_symmetric_around_midpoint() {
        for t in [0.1, 0.2, 0.3, 0.4] {
            let a = ease_in_out_quad(t);
            let b = ease_in_out_quad(1.0 - t);
            assert!((a + b - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_between_form() {
        assert!((ease_in_out_quad_between(0.0, 100.0, 400.0, 800.0) - 100.0).abs() < 0.001);
        assert!((ease_in_out_quad_between(400.0, 100.0, 400.0, 800.0) - 300.0).abs() < 0.001);
        assert!((ease_in_out_quad_between(800.0, 100.0, 400.0, 800.0) - 500.0).abs() < 0.001);
        assert!((ease_in_out_quad_between(5.0, 100.0, -100.0, 0.0) - 0.0).abs() < 0.001);
    }
}
