//! Responsive navigation
//!
//! Two states, `Closed` (initial) and `Open`, driven by typed input
//! channels:
//!
//! - toggle click flips the state
//! - menu link click closes the menu on mobile; hash links defer a smooth
//!   scroll until [`Navigation::poll`] sees the settle delay elapse
//! - a click outside the navbar closes the menu on mobile
//! - Escape closes the menu
//! - a settled resize to a non-mobile width closes the menu
//! - scroll ticks hide/show the navbar and recompute the active link
//!
//! Opening on a mobile layout pins the body so the page does not scroll
//! behind the menu; closing releases the pin and restores the offset.

mod active;
mod machine;
mod session;
mod surface;

pub use active::active_link;
pub use machine::NavMachine;
pub use session::{MenuState, NavSession, PendingScroll, ScrollLock, ScrollTarget};
pub use surface::{ActiveLink, EntrancePlan, EntranceStep, NavSurface, SectionBounds};

use std::rc::Rc;

use crate::capability::Capabilities;
use crate::config::SiteConfig;
use crate::error::VitrineError;

/// What a handler did with its event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The state machine acted on the event. For link clicks this also
    /// means the browser's default navigation must be prevented.
    Consumed,
    /// Nothing happened; the host proceeds as usual
    Ignored,
}

impl EventOutcome {
    #[inline]
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventOutcome::Consumed)
    }
}

/// Click on a link inside the menu
#[derive(Clone, Copy, Debug)]
pub struct LinkClick<'a> {
    /// Raw `href` attribute
    pub href: &'a str,
    pub now_ms: f64,
}

/// Click anywhere in the document
#[derive(Clone, Copy, Debug)]
pub struct DocumentClick {
    /// Whether the click target lies inside the navbar
    pub inside_navbar: bool,
}

/// Keys the navigation reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Scroll position sample
#[derive(Clone, Copy, Debug)]
pub struct ScrollTick {
    pub scroll_y: f64,
}

/// Navigation component, or its inert stand-in when the page lacks the markup
pub enum Navigation<S> {
    Enabled(NavMachine<S>),
    Disabled,
}

impl<S: NavSurface> Navigation<S> {
    /// Bind to a discovered surface; a failed discovery yields `Disabled`
    pub fn init(surface: Result<S, VitrineError>, caps: Rc<Capabilities>, config: &SiteConfig) -> Self {
        match surface {
            Ok(surface) => {
                log::info!("nav: initialized");
                Navigation::Enabled(NavMachine::new(
                    surface,
                    caps,
                    config.nav.clone(),
                    config.animation.clone(),
                ))
            }
            Err(err) => {
                log::warn!("nav: disabled ({})", err);
                Navigation::Disabled
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Navigation::Enabled(_))
    }

    pub fn is_open(&self) -> bool {
        match self {
            Navigation::Enabled(machine) => machine.is_open(),
            Navigation::Disabled => false,
        }
    }

    pub fn machine(&self) -> Option<&NavMachine<S>> {
        match self {
            Navigation::Enabled(machine) => Some(machine),
            Navigation::Disabled => None,
        }
    }

    fn dispatch(&mut self, f: impl FnOnce(&mut NavMachine<S>) -> EventOutcome) -> EventOutcome {
        match self {
            Navigation::Enabled(machine) => f(machine),
            Navigation::Disabled => EventOutcome::Ignored,
        }
    }

    pub fn close(&mut self) -> bool {
        match self {
            Navigation::Enabled(machine) => machine.close(),
            Navigation::Disabled => false,
        }
    }

    pub fn on_toggle_click(&mut self) -> EventOutcome {
        self.dispatch(|m| m.on_toggle_click())
    }

    pub fn on_link_click(&mut self, click: &LinkClick<'_>) -> EventOutcome {
        self.dispatch(|m| m.on_link_click(click))
    }

    pub fn on_document_click(&mut self, click: DocumentClick) -> EventOutcome {
        self.dispatch(|m| m.on_document_click(click))
    }

    pub fn on_key(&mut self, key: Key) -> EventOutcome {
        self.dispatch(|m| m.on_key(key))
    }

    pub fn on_resize(&mut self) -> EventOutcome {
        self.dispatch(|m| m.on_resize())
    }

    pub fn on_scroll(&mut self, tick: ScrollTick) -> EventOutcome {
        self.dispatch(|m| m.on_scroll(tick))
    }

    pub fn pending_scroll_due(&self) -> Option<f64> {
        self.machine().and_then(|m| m.pending_scroll_due())
    }

    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self {
            Navigation::Enabled(machine) => machine.poll(now_ms),
            Navigation::Disabled => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, StaticEnvironment, SurfaceCall};

    fn mobile_nav(scroll_y: f64) -> (Rc<StaticEnvironment>, Navigation<RecordingSurface>) {
        let env = Rc::new(StaticEnvironment::with_width(375.0));
        let config = SiteConfig::default();
        let caps = Rc::new(Capabilities::probe(env.clone(), config.breakpoints));
        let surface = RecordingSurface::with_scroll(scroll_y);
        (env, Navigation::init(Ok(surface), caps, &config))
    }

    fn calls(nav: &Navigation<RecordingSurface>) -> Vec<SurfaceCall> {
        nav.machine().map(|m| m.surface().calls.clone()).unwrap_or_default()
    }

    #[test]
    fn test_disabled_when_markup_missing() {
        let env = StaticEnvironment::with_width(375.0);
        let config = SiteConfig::default();
        let caps = Rc::new(Capabilities::probe(env, config.breakpoints));
        let mut nav: Navigation<RecordingSurface> =
            Navigation::init(Err(VitrineError::MissingElement("navbar")), caps, &config);

        assert!(!nav.is_enabled());
        assert_eq!(nav.on_toggle_click(), EventOutcome::Ignored);
        assert_eq!(nav.on_key(Key::Escape), EventOutcome::Ignored);
        assert!(!nav.is_open());
        assert!(!nav.poll(1e9));
    }

    #[test]
    fn test_escape_while_closed_is_noop() {
        let (_env, mut nav) = mobile_nav(0.0);
        let before = calls(&nav);
        assert_eq!(nav.on_key(Key::Escape), EventOutcome::Ignored);
        assert_eq!(calls(&nav), before);
        assert!(!nav.is_open());
    }

    #[test]
    fn test_other_keys_ignored_while_open() {
        let (_env, mut nav) = mobile_nav(0.0);
        nav.on_toggle_click();
        assert_eq!(nav.on_key(Key::Other), EventOutcome::Ignored);
        assert!(nav.is_open());
        assert_eq!(nav.on_key(Key::from_dom("Escape")), EventOutcome::Consumed);
        assert!(!nav.is_open());
    }

    #[test]
    fn test_click_inside_navbar_keeps_menu_open() {
        let (_env, mut nav) = mobile_nav(0.0);
        nav.on_toggle_click();
        let outcome = nav.on_document_click(DocumentClick { inside_navbar: true });
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(nav.is_open());

        nav.on_document_click(DocumentClick { inside_navbar: false });
        assert!(!nav.is_open());
    }

    #[test]
    fn test_initial_active_link_marked_once() {
        let (_env, mut nav) = mobile_nav(0.0);
        let marks = |nav: &Navigation<RecordingSurface>| {
            calls(nav)
                .into_iter()
                .filter(|c| matches!(c, SurfaceCall::MarkActive(_)))
                .count()
        };
        assert_eq!(marks(&nav), 1);
        nav.on_scroll(ScrollTick { scroll_y: 40.0 });
        assert_eq!(marks(&nav), 1);
    }
}
