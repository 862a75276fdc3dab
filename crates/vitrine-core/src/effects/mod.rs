//! Decorative effects
//!
//! Each effect is plain per-frame state; the web crate owns the
//! animation-frame loops that drive them and the DOM layers they paint.

mod cursor;
mod easing;
mod particles;
mod point;
mod smooth_scroll;

pub use cursor::{CursorFollower, CursorFrame};
pub use easing::{ease_in_out_quad, ease_in_out_quad_between};
pub use particles::{Bounds, Link, Particle, ParticleField};
pub use point::Point;
pub use smooth_scroll::SmoothScroll;
