//! Browser implementations of the core environment and timer seams

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use vitrine_core::capability::Environment;
use vitrine_core::timing::{TimerHost, TimerId};
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Reads viewport and media-query state from `window`
pub struct BrowserEnvironment {
    window: Window,
}

impl BrowserEnvironment {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Environment for BrowserEnvironment {
    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn has_touch_events(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
    }

    fn max_touch_points(&self) -> u32 {
        js_sys::Reflect::get(&self.window.navigator(), &JsValue::from_str("maxTouchPoints"))
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0)
    }

    fn media_matches(&self, query: &str) -> bool {
        matches!(self.window.match_media(query), Ok(Some(list)) if list.matches())
    }
}

/// Milliseconds on the `performance.now()` timebase
pub fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// `setTimeout`-backed timer host
///
/// Live timeouts are kept by id so they can be cleared; a fired timeout
/// removes itself.
pub struct BrowserTimers {
    window: Window,
    next_id: Cell<TimerId>,
    live: Rc<RefCell<HashMap<TimerId, Timeout>>>,
}

impl BrowserTimers {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: Cell::new(0),
            live: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Clear every pending timeout (teardown)
    pub fn clear_all(&self) {
        self.live.borrow_mut().clear();
    }
}

impl TimerHost for BrowserTimers {
    fn now_ms(&self) -> f64 {
        now_ms(&self.window)
    }

    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);

        let live = self.live.clone();
        let millis = delay_ms.max(0.0).ceil() as u32;
        let timeout = Timeout::new(millis, move || {
            live.borrow_mut().remove(&id);
            callback();
        });
        self.live.borrow_mut().insert(id, timeout);
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        // Dropping a gloo Timeout cancels it
        self.live.borrow_mut().remove(&id);
    }
}
