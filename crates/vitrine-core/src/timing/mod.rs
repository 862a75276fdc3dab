//! Rate limiting for expensive event handlers
//!
//! Scroll handlers are throttled and resize handlers debounced. Both
//! wrappers are generic over the argument type (use a tuple for several
//! arguments) and schedule their deferred work through a [`TimerHost`], so
//! ordering can be tested against [`VirtualTimers`] without a wall clock.

mod debounce;
mod throttle;
mod virtual_timers;

pub use debounce::Debounce;
pub use throttle::Throttle;
pub use virtual_timers::VirtualTimers;

use std::rc::Rc;

/// Handle for a scheduled timeout
pub type TimerId = u32;

/// Source of time and one-shot timeouts
pub trait TimerHost {
    /// Current time in milliseconds
    fn now_ms(&self) -> f64;

    /// Run `callback` once after `delay_ms`
    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId;

    /// Cancel a timeout; unknown or already fired ids are ignored
    fn clear_timeout(&self, id: TimerId);
}

impl<T: TimerHost + ?Sized> TimerHost for Rc<T> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }

    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        (**self).set_timeout(delay_ms, callback)
    }

    fn clear_timeout(&self, id: TimerId) {
        (**self).clear_timeout(id)
    }
}
