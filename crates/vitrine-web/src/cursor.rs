//! Custom cursor layers following the pointer

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use vitrine_core::effects::{CursorFollower, CursorFrame};
use vitrine_core::{SiteConfig, VitrineError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::constants::{CURSOR_ACTIVE_CLASS, CURSOR_DOT_CLASS, CURSOR_RING_CLASS};
use crate::dom;

struct CursorState {
    follower: CursorFollower,
    dot: HtmlElement,
    ring: HtmlElement,
    running: bool,
    frame: Option<AnimationFrame>,
}

pub struct CursorEffect {
    root: Element,
    state: Rc<RefCell<CursorState>>,
    _listeners: Vec<EventListener>,
}

/// Reuse a layer from the markup or append a fresh one to the body
fn layer(document: &Document, body: &HtmlElement, class: &str) -> Result<HtmlElement, VitrineError> {
    if let Some(el) = dom::query(document, &format!(".{class}")) {
        return Ok(el);
    }
    let el = document
        .create_element("div")
        .map_err(|e| VitrineError::Dom(format!("create cursor layer: {e:?}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| VitrineError::Dom("cursor layer is not an HtmlElement".to_string()))?;
    el.set_class_name(class);
    let _ = el.set_attribute("aria-hidden", "true");
    body.append_child(&el)
        .map_err(|e| VitrineError::Dom(format!("append cursor layer: {e:?}")))?;
    Ok(el)
}

fn paint(state: &CursorState, frame: &CursorFrame) {
    let opacity = if frame.visible { "1" } else { "0" };
    let dot = format!(
        "translate3d({}px, {}px, 0) translate(-50%, -50%)",
        frame.dot.x, frame.dot.y
    );
    let ring = format!(
        "translate3d({}px, {}px, 0) translate(-50%, -50%) scale({})",
        frame.ring.x, frame.ring.y, frame.ring_scale
    );
    dom::set_styles(&state.dot, &[("transform", dot.as_str()), ("opacity", opacity)]);
    dom::set_styles(&state.ring, &[("transform", ring.as_str()), ("opacity", opacity)]);
}

impl CursorEffect {
    pub fn new(document: &Document, config: &SiteConfig) -> Result<Self, VitrineError> {
        let root = document
            .document_element()
            .ok_or(VitrineError::MissingElement("document element"))?;
        let body = document.body().ok_or(VitrineError::MissingElement("body"))?;
        let dot = layer(document, &body, CURSOR_DOT_CLASS)?;
        let ring = layer(document, &body, CURSOR_RING_CLASS)?;

        let state = Rc::new(RefCell::new(CursorState {
            follower: CursorFollower::new(&config.cursor),
            dot,
            ring,
            running: true,
            frame: None,
        }));

        let mut listeners = Vec::new();
        listeners.push(EventListener::new(document, "mousemove", {
            let state = Rc::downgrade(&state);
            move |event| {
                let (Some(event), Some(state)) = (event.dyn_ref::<MouseEvent>(), state.upgrade()) else {
                    return;
                };
                state
                    .borrow_mut()
                    .follower
                    .on_pointer_move(f64::from(event.client_x()), f64::from(event.client_y()));
            }
        }));

        listeners.push(EventListener::new(&root, "mouseleave", {
            let state = Rc::downgrade(&state);
            move |_| {
                if let Some(state) = state.upgrade() {
                    state.borrow_mut().follower.on_pointer_leave();
                }
            }
        }));

        let selector = config.cursor.interactive_selector.clone();
        listeners.push(EventListener::new(document, "mouseover", {
            let state = Rc::downgrade(&state);
            move |event| {
                let Some(state) = state.upgrade() else {
                    return;
                };
                let interactive = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(&selector).ok().flatten())
                    .is_some();
                let mut state = state.borrow_mut();
                if interactive {
                    state.follower.on_interactive_enter();
                } else {
                    state.follower.on_interactive_leave();
                }
            }
        }));

        dom::set_class(&root, CURSOR_ACTIVE_CLASS, true);
        schedule(&state);
        log::info!("cursor: enabled");

        Ok(Self {
            root,
            state,
            _listeners: listeners,
        })
    }

    pub fn stop(&self) {
        let mut state = self.state.borrow_mut();
        state.running = false;
        state.frame.take();
        dom::set_styles(&state.dot, &[("opacity", "0")]);
        dom::set_styles(&state.ring, &[("opacity", "0")]);
        dom::set_class(&self.root, CURSOR_ACTIVE_CLASS, false);
    }
}

fn schedule(state: &Rc<RefCell<CursorState>>) {
    let weak = Rc::downgrade(state);
    let handle = request_animation_frame(move |_| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        {
            let mut guard = state.borrow_mut();
            guard.frame.take();
            if !guard.running {
                return;
            }
            let frame = guard.follower.frame();
            paint(&guard, &frame);
        }
        schedule(&state);
    });
    state.borrow_mut().frame = Some(handle);
}
