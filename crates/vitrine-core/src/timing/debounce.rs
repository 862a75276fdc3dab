//! Trailing-edge debounce

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{TimerHost, TimerId};

/// Defers the wrapped function until calls stop for `delay_ms`
///
/// Every call restarts the timer; only the last call's arguments reach the
/// function.
pub struct Debounce<A, H: TimerHost> {
    delay_ms: f64,
    host: Rc<H>,
    func: Rc<RefCell<dyn FnMut(A)>>,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl<A: 'static, H: TimerHost + 'static> Debounce<A, H> {
    pub fn new(delay_ms: f64, host: Rc<H>, func: impl FnMut(A) + 'static) -> Self {
        Self {
            delay_ms,
            host,
            func: Rc::new(RefCell::new(func)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn call(&self, args: A) {
        if let Some(id) = self.pending.take() {
            self.host.clear_timeout(id);
        }

        let func = self.func.clone();
        let pending = self.pending.clone();
        let id = self.host.set_timeout(
            self.delay_ms,
            Box::new(move || {
                pending.set(None);
                (func.borrow_mut())(args);
            }),
        );
        self.pending.set(Some(id));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.host.clear_timeout(id);
        }
    }
}

impl<A, H: TimerHost> Drop for Debounce<A, H> {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.host.clear_timeout(id);
        }
    }
}
