//! Leading-edge throttle with a single trailing call

use std::cell::RefCell;
use std::rc::Rc;

use super::{TimerHost, TimerId};

struct ThrottleState {
    last_run_ms: Option<f64>,
    pending: Option<TimerId>,
}

/// Runs the wrapped function at most once per `delay_ms`
///
/// The window is measured from the last actual execution. A call that lands
/// inside the window replaces any pending trailing call, so at most one
/// trailing execution happens at the window boundary, with the newest
/// arguments.
pub struct Throttle<A, H: TimerHost> {
    delay_ms: f64,
    host: Rc<H>,
    func: Rc<RefCell<dyn FnMut(A)>>,
    state: Rc<RefCell<ThrottleState>>,
}

impl<A: 'static, H: TimerHost + 'static> Throttle<A, H> {
    pub fn new(delay_ms: f64, host: Rc<H>, func: impl FnMut(A) + 'static) -> Self {
        Self {
            delay_ms,
            host,
            func: Rc::new(RefCell::new(func)),
            state: Rc::new(RefCell::new(ThrottleState {
                last_run_ms: None,
                pending: None,
            })),
        }
    }

    pub fn call(&self, args: A) {
        let now = self.host.now_ms();
        let mut state = self.state.borrow_mut();

        let elapsed = state.last_run_ms.map(|last| now - last);
        match elapsed {
            Some(elapsed) if elapsed < self.delay_ms => {
                if let Some(id) = state.pending.take() {
                    self.host.clear_timeout(id);
                }
                let wait = self.delay_ms - elapsed;
                let host = self.host.clone();
                let func = self.func.clone();
                let shared = self.state.clone();
                let id = self.host.set_timeout(
                    wait,
                    Box::new(move || {
                        {
                            let mut state = shared.borrow_mut();
                            state.pending = None;
                            state.last_run_ms = Some(host.now_ms());
                        }
                        (func.borrow_mut())(args);
                    }),
                );
                state.pending = Some(id);
            }
            _ => {
                if let Some(id) = state.pending.take() {
                    self.host.clear_timeout(id);
                }
                state.last_run_ms = Some(now);
                drop(state);
                (self.func.borrow_mut())(args);
            }
        }
    }

    /// Whether a trailing call is scheduled
    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    /// Drop any trailing call
    pub fn cancel(&self) {
        if let Some(id) = self.state.borrow_mut().pending.take() {
            self.host.clear_timeout(id);
        }
    }
}

impl<A, H: TimerHost> Drop for Throttle<A, H> {
    fn drop(&mut self) {
        if let Some(id) = self.state.borrow_mut().pending.take() {
            self.host.clear_timeout(id);
        }
    }
}
