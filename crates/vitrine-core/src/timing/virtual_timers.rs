//! Deterministic timer host with a manually advanced clock

use std::cell::{Cell, RefCell};

use super::{TimerHost, TimerId};

struct Scheduled {
    id: TimerId,
    due_ms: f64,
    callback: Box<dyn FnOnce()>,
}

/// Timer host whose clock only moves when told to
///
/// Timers fire in deadline order; timers sharing a deadline fire in the order
/// they were scheduled. Callbacks may schedule or clear further timers.
#[derive(Default)]
pub struct VirtualTimers {
    now_ms: Cell<f64>,
    next_id: Cell<TimerId>,
    queue: RefCell<Vec<Scheduled>>,
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `target_ms`, firing every timer due on the way
    pub fn advance_to(&self, target_ms: f64) {
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let index = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target_ms)
                    .min_by(|(_, a), (_, b)| {
                        a.due_ms
                            .partial_cmp(&b.due_ms)
                            .unwrap_or(core::cmp::Ordering::Equal)
                            .then(a.id.cmp(&b.id))
                    })
                    .map(|(i, _)| i);
                index.map(|i| queue.remove(i))
            };

            match next {
                Some(timer) => {
                    if timer.due_ms > self.now_ms.get() {
                        self.now_ms.set(timer.due_ms);
                    }
                    (timer.callback)();
                }
                None => break,
            }
        }

        if target_ms > self.now_ms.get() {
            self.now_ms.set(target_ms);
        }
    }

    /// Move the clock forward by `delta_ms`
    pub fn advance_by(&self, delta_ms: f64) {
        self.advance_to(self.now_ms.get() + delta_ms);
    }

    /// Number of timers still scheduled
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl TimerHost for VirtualTimers {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }

    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);
        self.queue.borrow_mut().push(Scheduled {
            id,
            due_ms: self.now_ms.get() + delay_ms.max(0.0),
            callback,
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.queue.borrow_mut().retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_fires_in_deadline_order() {
        let timers = VirtualTimers::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, tag) in [(30.0, "c"), (10.0, "a"), (20.0, "b")] {
            let log = log.clone();
            timers.set_timeout(delay, Box::new(move || log.borrow_mut().push(tag)));
        }

        timers.advance_to(15.0);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert!((timers.now_ms() - 15.0).abs() < f64::EPSILON);

        timers.advance_to(100.0);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_clock_reads_deadline_inside_callback() {
        let timers = Rc::new(VirtualTimers::new());
        let seen = Rc::new(Cell::new(0.0));
        {
            let timers2 = timers.clone();
            let seen = seen.clone();
            timers.set_timeout(16.0, Box::new(move || seen.set(timers2.now_ms())));
        }
        timers.advance_to(50.0);
        assert!((seen.get() - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cleared_timer_never_fires() {
        let timers = VirtualTimers::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let id = timers.set_timeout(5.0, Box::new(move || flag.set(true)));
        timers.clear_timeout(id);
        timers.advance_by(10.0);
        assert!(!fired.get());
    }

    #[test]
    fn test_callback_can_schedule_within_window() {
        let timers = Rc::new(VirtualTimers::new());
        let count = Rc::new(Cell::new(0));
        {
            let inner_timers = timers.clone();
            let count = count.clone();
            timers.set_timeout(
                10.0,
                Box::new(move || {
                    count.set(count.get() + 1);
                    let count = count.clone();
                    inner_timers.set_timeout(5.0, Box::new(move || count.set(count.get() + 1)));
                }),
            );
        }
        timers.advance_to(20.0);
        assert_eq!(count.get(), 2);
    }
}
