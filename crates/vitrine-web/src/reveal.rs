//! `IntersectionObserver`-driven reveal of `[data-reveal]` elements

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::render::{request_animation_frame, AnimationFrame};
use vitrine_core::config::AnimationConfig;
use vitrine_core::{Intersection, RevealAction, RevealRegistry, RevealStyle, SiteConfig, VitrineError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;

/// Attribute carrying an element's registry key
const KEY_ATTR: &str = "data-reveal-key";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct RevealState {
    registry: RevealRegistry<usize>,
    elements: Vec<HtmlElement>,
    animation: AnimationConfig,
    /// Elements whose hidden state was written this frame
    queued: Vec<usize>,
    frame: Option<AnimationFrame>,
}

/// Watches reveal targets and plays each one in exactly once
pub struct RevealController {
    observer: IntersectionObserver,
    state: Rc<RefCell<RevealState>>,
    _callback: ObserverCallback,
}

impl RevealController {
    pub fn new(document: &Document, config: &SiteConfig, reduced_motion: bool) -> Result<Self, VitrineError> {
        let elements = dom::query_all(document, &config.reveal.selector);
        if elements.is_empty() {
            return Err(VitrineError::MissingElement("reveal targets"));
        }

        let mut registry = RevealRegistry::new(reduced_motion);
        for (key, el) in elements.iter().enumerate() {
            let _ = el.set_attribute(KEY_ATTR, &key.to_string());
            registry.watch(key);
        }

        let state = Rc::new(RefCell::new(RevealState {
            registry,
            elements,
            animation: config.animation.clone(),
            queued: Vec::new(),
            frame: None,
        }));

        let weak = Rc::downgrade(&state);
        let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            on_entries(&weak, &entries, &observer);
        });

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&config.reveal.root_margin);
        options.set_threshold(&JsValue::from_f64(config.reveal.threshold));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|e| VitrineError::Dom(format!("IntersectionObserver: {e:?}")))?;

        for el in &state.borrow().elements {
            observer.observe(el);
        }
        log::info!("reveal: watching {} elements", state.borrow().elements.len());

        Ok(Self {
            observer,
            state,
            _callback: callback,
        })
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().registry.pending_len()
    }

    /// Stop observing; elements that have not fired stay as they are
    pub fn destroy(&self) {
        self.observer.disconnect();
        let mut state = self.state.borrow_mut();
        state.frame.take();
        state.queued.clear();
        state.registry.clear();
    }
}

impl Drop for RevealController {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn apply(el: &HtmlElement, style: &RevealStyle) {
    dom::set_styles(
        el,
        &[
            ("transition", style.transition.as_str()),
            ("opacity", style.opacity.as_str()),
            ("transform", style.transform.as_str()),
        ],
    );
}

fn on_entries(weak: &Weak<RefCell<RevealState>>, entries: &js_sys::Array, observer: &IntersectionObserver) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let mut guard = state.borrow_mut();

    let reports: Vec<Intersection<usize>> = entries
        .iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
        .filter_map(|entry| {
            let key = entry.target().get_attribute(KEY_ATTR)?.parse().ok()?;
            Some(Intersection {
                key,
                is_intersecting: entry.is_intersecting(),
            })
        })
        .collect();

    let state_ref = &mut *guard;
    for action in state_ref.registry.on_intersection(&reports) {
        let Some(el) = state_ref.elements.get(*action.key()) else {
            continue;
        };
        observer.unobserve(el);
        match action {
            RevealAction::ShowImmediately(_) => apply(el, &RevealStyle::immediate()),
            RevealAction::AnimateIn(key) => {
                apply(el, &RevealStyle::hidden(&state_ref.animation));
                state_ref.queued.push(key);
            }
        }
    }

    if !state_ref.queued.is_empty() && state_ref.frame.is_none() {
        let weak = weak.clone();
        state_ref.frame = Some(request_animation_frame(move |_| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut state = state.borrow_mut();
            state.frame.take();
            let visible = RevealStyle::visible(&state.animation);
            for key in std::mem::take(&mut state.queued) {
                if let Some(el) = state.elements.get(key) {
                    apply(el, &visible);
                }
            }
        }));
    }
}
