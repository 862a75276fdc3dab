//! Application context: owns every component for the lifetime of the page
//!
//! Boot runs each component constructor on its own. A component that cannot
//! start (missing markup, capability gate, browser API failure) is logged and
//! left out; the others carry on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use vitrine_core::nav::NavSurface;
use vitrine_core::{Capabilities, Navigation, SiteConfig, VitrineError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, PageTransitionEvent, Window};

use crate::constants::{CONFIG_SCRIPT_ID, NAVBAR_SELECTOR};
use crate::cursor::CursorEffect;
use crate::dom;
use crate::env::{BrowserEnvironment, BrowserTimers};
use crate::nav::{DomNavSurface, NavBindings, SharedNav};
use crate::particles::ParticleCanvas;
use crate::reveal::RevealController;
use crate::scroll::ScrollAnimator;

pub struct AppContext {
    window: Window,
    document: Document,
    config: SiteConfig,
    caps: Rc<Capabilities>,
    timers: Rc<BrowserTimers>,
    animator: Rc<ScrollAnimator>,
    nav: SharedNav,
    nav_bindings: RefCell<Option<NavBindings>>,
    reveal: RefCell<Option<RevealController>>,
    particles: RefCell<Option<ParticleCanvas>>,
    cursor: RefCell<Option<CursorEffect>>,
    torn_down: Cell<bool>,
}

/// Read overrides from the inline config script, falling back to defaults
pub fn load_config(document: &Document) -> SiteConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    if text.trim().is_empty() {
        return SiteConfig::default();
    }
    match SiteConfig::from_json(&text) {
        Ok(config) => {
            log::debug!("config: loaded overrides from #{}", CONFIG_SCRIPT_ID);
            config
        }
        Err(err) => {
            log::warn!("config: {}; using defaults", err);
            SiteConfig::default()
        }
    }
}

/// Log a component that failed to start and keep going
fn guarded<T>(name: &str, result: Result<T, VitrineError>) -> Option<T> {
    match result {
        Ok(component) => Some(component),
        Err(err) => {
            log::warn!("{}: disabled ({})", name, err);
            None
        }
    }
}

impl AppContext {
    pub fn boot(window: Window) -> Result<Rc<Self>, VitrineError> {
        let document = window.document().ok_or(VitrineError::MissingElement("document"))?;
        let config = load_config(&document);
        if let Some(level) = config.logging.level_filter() {
            log::set_max_level(level);
        }

        let caps = Rc::new(Capabilities::probe(
            BrowserEnvironment::new(window.clone()),
            config.breakpoints,
        ));
        log::info!(
            "boot: layout {:?}, touch {}, hover {}, reduced motion {}",
            caps.layout(),
            caps.supports_touch(),
            caps.supports_hover(),
            caps.prefers_reduced_motion()
        );

        let timers = Rc::new(BrowserTimers::new(window.clone()));
        let animator = ScrollAnimator::new(window.clone(), f64::from(config.nav.smooth_scroll_ms));

        let surface = DomNavSurface::discover(&window, &config, caps.prefers_reduced_motion(), animator.clone());
        let nav: SharedNav = Rc::new(RefCell::new(Navigation::init(surface, caps.clone(), &config)));
        let nav_bindings = NavBindings::attach(&nav, &window, timers.clone(), &config);

        let reveal = guarded(
            "reveal",
            RevealController::new(&document, &config, caps.prefers_reduced_motion()),
        );

        let particles = if caps.allows_decorative_motion() {
            guarded("particles", ParticleCanvas::new(&window, &document, &config))
        } else {
            log::info!("particles: skipped (mobile or reduced motion)");
            None
        };

        let cursor = if caps.allows_custom_cursor() {
            guarded("cursor", CursorEffect::new(&document, &config))
        } else {
            log::info!("cursor: skipped (no hover or mobile)");
            None
        };

        log::info!("boot: complete");
        Ok(Rc::new(Self {
            window,
            document,
            config,
            caps,
            timers,
            animator,
            nav,
            nav_bindings: RefCell::new(nav_bindings),
            reveal: RefCell::new(reveal),
            particles: RefCell::new(particles),
            cursor: RefCell::new(cursor),
            torn_down: Cell::new(false),
        }))
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    pub fn is_menu_open(&self) -> bool {
        self.nav.try_borrow().map(|nav| nav.is_open()).unwrap_or(false)
    }

    pub fn close_menu(&self) -> bool {
        self.nav
            .try_borrow_mut()
            .map(|mut nav| nav.close())
            .unwrap_or(false)
    }

    pub fn navbar_height(&self) -> f64 {
        if let Ok(nav) = self.nav.try_borrow() {
            if let Some(machine) = nav.machine() {
                return machine.surface().navbar_height();
            }
        }
        dom::query(&self.document, NAVBAR_SELECTOR)
            .map(|el| f64::from(el.offset_height()))
            .unwrap_or(0.0)
    }

    pub fn is_in_viewport(&self, element: &Element) -> bool {
        dom::is_in_viewport(&self.window, element)
    }

    /// Scroll so the first match of `selector` sits just below the navbar
    pub fn smooth_scroll_to(&self, selector: &str) -> bool {
        let Some(target) = self.document.query_selector(selector).ok().flatten() else {
            log::warn!("scroll: no element matches {:?}", selector);
            return false;
        };
        let y = (dom::document_top(&self.window, &target) - self.navbar_height()).max(0.0);
        if self.caps.prefers_reduced_motion() {
            self.window.scroll_to_with_x_and_y(0.0, y);
        } else {
            self.animator.scroll_to(y);
        }
        true
    }

    /// Remove listeners, stop frame loops and cancel timers; idempotent
    pub fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        if let Some(bindings) = self.nav_bindings.borrow_mut().take() {
            bindings.cancel_pending();
        }
        if let Some(reveal) = self.reveal.borrow_mut().take() {
            reveal.destroy();
        }
        if let Some(particles) = self.particles.borrow_mut().take() {
            particles.stop();
        }
        if let Some(cursor) = self.cursor.borrow_mut().take() {
            cursor.stop();
        }
        self.animator.cancel();
        self.timers.clear_all();
        log::info!("teardown: complete");
    }

    /// Tear down when the page is discarded
    ///
    /// A `pagehide` that parks the page in the back/forward cache leaves
    /// everything running so a restored page is still live.
    pub fn bind_page_lifecycle(self: &Rc<Self>) -> EventListener {
        let ctx = Rc::clone(self);
        EventListener::new(&self.window, "pagehide", move |event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(PageTransitionEvent::persisted);
            if persisted {
                log::debug!("lifecycle: page cached, keeping components");
                return;
            }
            ctx.teardown();
        })
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.get()
    }
}
