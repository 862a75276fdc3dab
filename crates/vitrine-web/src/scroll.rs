//! Frame-driven smooth scrolling of the window

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use vitrine_core::effects::SmoothScroll;
use web_sys::Window;

use crate::dom;
use crate::env::now_ms;

/// Animates `window.scrollY` towards a target, one step per frame
///
/// Starting a new scroll replaces the running one.
pub struct ScrollAnimator {
    window: Window,
    duration_ms: f64,
    active: RefCell<Option<SmoothScroll>>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl ScrollAnimator {
    pub fn new(window: Window, duration_ms: f64) -> Rc<Self> {
        Rc::new(Self {
            window,
            duration_ms,
            active: RefCell::new(None),
            frame: RefCell::new(None),
        })
    }

    pub fn scroll_to(self: &Rc<Self>, target_y: f64) {
        let from = dom::scroll_y(&self.window);
        let start = now_ms(&self.window);
        *self.active.borrow_mut() = Some(SmoothScroll::new(from, target_y, start, self.duration_ms));
        if self.frame.borrow().is_none() {
            self.request_frame();
        }
    }

    pub fn cancel(&self) {
        self.active.borrow_mut().take();
        self.frame.borrow_mut().take();
    }

    fn request_frame(self: &Rc<Self>) {
        let animator = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            animator.frame.borrow_mut().take();
            animator.step(timestamp);
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn step(self: &Rc<Self>, timestamp: f64) {
        let (y, done) = {
            let active = self.active.borrow();
            let Some(scroll) = active.as_ref() else {
                return;
            };
            (scroll.offset(timestamp), scroll.is_complete(timestamp))
        };
        self.window.scroll_to_with_x_and_y(0.0, y);
        if done {
            self.active.borrow_mut().take();
        } else {
            self.request_frame();
        }
    }
}
