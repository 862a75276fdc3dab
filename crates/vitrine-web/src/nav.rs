//! Browser side of the navigation: the DOM surface and its event wiring

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use vitrine_core::nav::{
    ActiveLink, DocumentClick, EntrancePlan, Key, LinkClick, NavSurface, ScrollTick, SectionBounds,
};
use vitrine_core::timing::TimerHost;
use vitrine_core::{Debounce, Navigation, SiteConfig, Throttle, VitrineError};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, KeyboardEvent, Node, Window};

use crate::constants::{
    ACTIVE_CLASS, MENU_ITEM_SELECTOR, MENU_SELECTOR, NAVBAR_HIDDEN_CLASS, NAVBAR_SELECTOR, NAV_LINK_SELECTOR,
    SECTION_SELECTOR, TOGGLE_SELECTOR,
};
use crate::dom;
use crate::env::{now_ms, BrowserTimers};
use crate::scroll::ScrollAnimator;

const ENTRANCE_PROPS: [&str; 3] = ["opacity", "transform", "transition"];
const LOCK_PROPS: [&str; 3] = ["position", "top", "width"];

pub type SharedNav = Rc<RefCell<Navigation<DomNavSurface>>>;

/// [`NavSurface`] over the page's navbar markup
pub struct DomNavSurface {
    window: Window,
    document: Document,
    body: HtmlElement,
    navbar: HtmlElement,
    toggle: HtmlElement,
    menu: HtmlElement,
    items: Vec<HtmlElement>,
    links: Vec<HtmlElement>,
    home_id: String,
    reduced_motion: bool,
    animator: Rc<ScrollAnimator>,
    entrance_frame: Option<AnimationFrame>,
}

impl DomNavSurface {
    /// Locate the navbar, toggle and menu; any of them missing is an error
    pub fn discover(
        window: &Window,
        config: &SiteConfig,
        reduced_motion: bool,
        animator: Rc<ScrollAnimator>,
    ) -> Result<Self, VitrineError> {
        let document = window.document().ok_or(VitrineError::MissingElement("document"))?;
        let body = document.body().ok_or(VitrineError::MissingElement("body"))?;
        let navbar = dom::require(&document, NAVBAR_SELECTOR, "navbar")?;
        let toggle = dom::require(&document, TOGGLE_SELECTOR, "nav toggle")?;
        let menu = dom::require(&document, MENU_SELECTOR, "nav menu")?;
        let items = dom::query_all(&document, MENU_ITEM_SELECTOR);
        let links = dom::query_all(&document, NAV_LINK_SELECTOR);

        log::debug!("nav: {} menu items, {} links", items.len(), links.len());
        Ok(Self {
            window: window.clone(),
            document,
            body,
            navbar,
            toggle,
            menu,
            items,
            links,
            home_id: config.nav.home_id.clone(),
            reduced_motion,
            animator,
            entrance_frame: None,
        })
    }

    pub fn navbar(&self) -> &HtmlElement {
        &self.navbar
    }

    pub fn toggle(&self) -> &HtmlElement {
        &self.toggle
    }

    pub fn links(&self) -> &[HtmlElement] {
        &self.links
    }

    fn link_targets(&self, link: &ActiveLink, href: &str) -> bool {
        let Some(id) = href.strip_prefix('#') else {
            return false;
        };
        match link {
            ActiveLink::Home => id.is_empty() || id == self.home_id,
            ActiveLink::Section(section) => id == section,
        }
    }
}

impl NavSurface for DomNavSurface {
    fn scroll_y(&self) -> f64 {
        dom::scroll_y(&self.window)
    }

    fn navbar_height(&self) -> f64 {
        f64::from(self.navbar.offset_height())
    }

    fn sections(&self) -> Vec<SectionBounds> {
        dom::query_all(&self.document, SECTION_SELECTOR)
            .into_iter()
            .map(|section| {
                SectionBounds::new(
                    section.id(),
                    dom::document_top(&self.window, &section),
                    f64::from(section.offset_height()),
                )
            })
            .collect()
    }

    fn section_top(&self, id: &str) -> Option<f64> {
        self.document
            .get_element_by_id(id)
            .map(|el| dom::document_top(&self.window, &el))
    }

    fn menu_item_count(&self) -> usize {
        self.items.len()
    }

    fn set_menu_active(&mut self, active: bool) {
        dom::set_class(&self.toggle, ACTIVE_CLASS, active);
        dom::set_class(&self.menu, ACTIVE_CLASS, active);
        let _ = self
            .toggle
            .set_attribute("aria-expanded", if active { "true" } else { "false" });
    }

    fn lock_body(&mut self, offset: f64) {
        let top = format!("-{offset}px");
        dom::set_styles(
            &self.body,
            &[("position", "fixed"), ("top", top.as_str()), ("width", "100%")],
        );
    }

    fn unlock_body(&mut self) {
        dom::remove_styles(&self.body, &LOCK_PROPS);
    }

    fn scroll_to(&mut self, y: f64) {
        self.animator.cancel();
        self.window.scroll_to_with_x_and_y(0.0, y);
    }

    fn smooth_scroll_to(&mut self, y: f64) {
        if self.reduced_motion {
            self.scroll_to(y);
        } else {
            self.animator.scroll_to(y);
        }
    }

    fn set_navbar_hidden(&mut self, hidden: bool) {
        dom::set_class(&self.navbar, NAVBAR_HIDDEN_CLASS, hidden);
    }

    fn mark_active_link(&mut self, link: &ActiveLink) {
        for el in &self.links {
            let href = el.get_attribute("href").unwrap_or_default();
            dom::set_class(el, ACTIVE_CLASS, self.link_targets(link, &href));
        }
    }

    fn play_entrance(&mut self, plan: &EntrancePlan) {
        let start = format!("translateY({}px)", plan.offset_px);
        let mut staged = Vec::with_capacity(plan.steps.len());
        for step in &plan.steps {
            let Some(item) = self.items.get(step.index) else {
                continue;
            };
            dom::set_styles(
                item,
                &[("opacity", "0"), ("transform", start.as_str()), ("transition", "none")],
            );
            let transition = format!(
                "opacity {d}ms {e} {delay}ms, transform {d}ms {e} {delay}ms",
                d = plan.duration_ms,
                e = plan.easing,
                delay = step.delay_ms,
            );
            staged.push((item.clone(), transition));
        }

        // The starting state has to be committed before the transition is set
        self.entrance_frame = Some(request_animation_frame(move |_| {
            for (item, transition) in &staged {
                dom::set_styles(
                    item,
                    &[
                        ("transition", transition.as_str()),
                        ("opacity", "1"),
                        ("transform", "translateY(0)"),
                    ],
                );
            }
        }));
    }

    fn clear_entrance_styles(&mut self) {
        self.entrance_frame.take();
        for item in &self.items {
            dom::remove_styles(item, &ENTRANCE_PROPS);
        }
    }
}

// =============================================================================
// Event wiring
// =============================================================================

/// Listeners and rate limiters feeding a [`SharedNav`]
///
/// Dropping the bindings removes every listener and cancels pending timers.
pub struct NavBindings {
    _listeners: Vec<EventListener>,
    scroll: Rc<Throttle<f64, BrowserTimers>>,
    resize: Rc<Debounce<(), BrowserTimers>>,
}

impl NavBindings {
    /// Attach to an enabled navigation; returns `None` when it is disabled
    pub fn attach(nav: &SharedNav, window: &Window, timers: Rc<BrowserTimers>, config: &SiteConfig) -> Option<Self> {
        let (navbar, toggle, links) = {
            let nav = nav.borrow();
            let surface = nav.machine()?.surface();
            (surface.navbar().clone(), surface.toggle().clone(), surface.links().to_vec())
        };
        let document = window.document()?;
        let weak = Rc::downgrade(nav);
        let mut listeners = Vec::new();

        listeners.push(EventListener::new_with_options(
            &toggle,
            "click",
            EventListenerOptions::enable_prevent_default(),
            {
                let weak = weak.clone();
                move |event| {
                    event.prevent_default();
                    with_nav(&weak, |nav| nav.on_toggle_click());
                }
            },
        ));

        for link in links {
            let weak = weak.clone();
            let timers = timers.clone();
            let window = window.clone();
            let anchor = link.clone();
            listeners.push(EventListener::new_with_options(
                &link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let href = anchor.get_attribute("href").unwrap_or_default();
                    let now = now_ms(&window);
                    let Some(due) = with_nav(&weak, |nav| {
                        let outcome = nav.on_link_click(&LinkClick { href: &href, now_ms: now });
                        if outcome.is_consumed() {
                            event.prevent_default();
                        }
                        nav.pending_scroll_due()
                    })
                    .flatten() else {
                        return;
                    };
                    schedule_poll(&weak, &timers, due - now);
                },
            ));
        }

        listeners.push(EventListener::new(&document, "click", {
            let weak = weak.clone();
            move |event| {
                let inside_navbar = event
                    .target()
                    .and_then(|target| target.dyn_into::<Node>().ok())
                    .map(|node| navbar.contains(Some(&node)))
                    .unwrap_or(false);
                with_nav(&weak, |nav| nav.on_document_click(DocumentClick { inside_navbar }));
            }
        }));

        listeners.push(EventListener::new(&document, "keydown", {
            let weak = weak.clone();
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                with_nav(&weak, |nav| nav.on_key(Key::from_dom(&event.key())));
            }
        }));

        let scroll = Rc::new(Throttle::new(
            f64::from(config.timing.throttle_ms),
            timers.clone(),
            {
                let weak = weak.clone();
                move |scroll_y: f64| {
                    with_nav(&weak, |nav| nav.on_scroll(ScrollTick { scroll_y }));
                }
            },
        ));
        listeners.push(EventListener::new(window, "scroll", {
            let scroll = scroll.clone();
            let window = window.clone();
            move |_| scroll.call(dom::scroll_y(&window))
        }));

        let resize = Rc::new(Debounce::new(f64::from(config.timing.debounce_ms), timers, {
            let weak = weak.clone();
            move |()| {
                with_nav(&weak, |nav| nav.on_resize());
            }
        }));
        listeners.push(EventListener::new(window, "resize", {
            let resize = resize.clone();
            move |_| resize.call(())
        }));

        log::debug!("nav: {} listeners attached", listeners.len());
        Some(Self {
            _listeners: listeners,
            scroll,
            resize,
        })
    }

    /// Drop any trailing scroll or settled resize still waiting
    pub fn cancel_pending(&self) {
        self.scroll.cancel();
        self.resize.cancel();
    }
}

/// Run `f` against the navigation if it is still alive and not busy
fn with_nav<R>(weak: &Weak<RefCell<Navigation<DomNavSurface>>>, f: impl FnOnce(&mut Navigation<DomNavSurface>) -> R) -> Option<R> {
    let nav = weak.upgrade()?;
    let mut nav = nav.try_borrow_mut().ok()?;
    Some(f(&mut nav))
}

/// Resolve the deferred hash-link scroll once its settle delay has passed
fn schedule_poll(weak: &Weak<RefCell<Navigation<DomNavSurface>>>, timers: &Rc<BrowserTimers>, delay_ms: f64) {
    let weak = weak.clone();
    let host = Rc::downgrade(timers);
    timers.set_timeout(
        delay_ms.max(0.0),
        Box::new(move || {
            let Some(host) = host.upgrade() else {
                return;
            };
            let now = host.now_ms();
            with_nav(&weak, |nav| nav.poll(now));
        }),
    );
}
