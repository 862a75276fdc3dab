//! Responsive navigation state machine

use std::rc::Rc;

use crate::capability::Capabilities;
use crate::config::{AnimationConfig, NavConfig};

use super::session::{MenuState, NavSession, PendingScroll, ScrollLock, ScrollTarget};
use super::{active_link, DocumentClick, EntrancePlan, EventOutcome, Key, LinkClick, NavSurface, ScrollTick};

/// Navigation state machine bound to a page surface
pub struct NavMachine<S> {
    surface: S,
    caps: Rc<Capabilities>,
    nav: NavConfig,
    animation: AnimationConfig,
    session: NavSession,
}

impl<S: NavSurface> NavMachine<S> {
    /// Start closed and mark the link for the current scroll offset
    pub fn new(surface: S, caps: Rc<Capabilities>, nav: NavConfig, animation: AnimationConfig) -> Self {
        let mut machine = Self {
            surface,
            caps,
            nav,
            animation,
            session: NavSession::default(),
        };
        let y = machine.surface.scroll_y();
        machine.session.last_scroll_y = y;
        machine.refresh_active_link(y);
        machine
    }

    pub fn session(&self) -> &NavSession {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn open(&mut self) {
        self.session.menu = MenuState::Open;
        self.surface.set_menu_active(true);

        if self.caps.is_mobile() {
            self.lock();
        }

        if !self.caps.prefers_reduced_motion() {
            let plan = EntrancePlan::staggered(
                self.surface.menu_item_count(),
                self.animation.stagger_ms,
                self.animation.duration_ms,
                &self.animation.easing,
                self.animation.offset_px,
            );
            self.surface.play_entrance(&plan);
        }
        log::debug!("nav: opened");
    }

    fn lock(&mut self) {
        let offset = self.surface.scroll_y();
        self.surface.lock_body(offset);
        self.session.scroll_lock = Some(ScrollLock { offset });
    }

    /// Close the menu; returns false when it was already closed
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.session.menu = MenuState::Closed;
        self.surface.set_menu_active(false);

        // A lock survives layout changes, so it is released whenever held
        if let Some(lock) = self.session.scroll_lock.take() {
            self.surface.unlock_body();
            self.surface.scroll_to(lock.offset);
        }
        log::debug!("nav: closed");
        true
    }

    // =========================================================================
    // Input channels
    // =========================================================================

    pub fn on_toggle_click(&mut self) -> EventOutcome {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        EventOutcome::Consumed
    }

    /// Handle a click on a link inside the menu
    ///
    /// `Consumed` means the host must prevent the default navigation.
    pub fn on_link_click(&mut self, click: &LinkClick<'_>) -> EventOutcome {
        if !self.is_open() || !self.caps.is_mobile() {
            return EventOutcome::Ignored;
        }

        match ScrollTarget::from_href(click.href) {
            Some(target) => {
                self.close();
                self.session.pending_scroll = Some(PendingScroll {
                    target,
                    due_ms: click.now_ms + f64::from(self.nav.link_scroll_delay_ms),
                });
                EventOutcome::Consumed
            }
            None => {
                self.close();
                EventOutcome::Ignored
            }
        }
    }

    pub fn on_document_click(&mut self, click: DocumentClick) -> EventOutcome {
        if click.inside_navbar || !self.is_open() || !self.caps.is_mobile() {
            return EventOutcome::Ignored;
        }
        self.close();
        EventOutcome::Consumed
    }

    pub fn on_key(&mut self, key: Key) -> EventOutcome {
        if key == Key::Escape && self.close() {
            EventOutcome::Consumed
        } else {
            EventOutcome::Ignored
        }
    }

    /// Handle a settled resize (the host debounces)
    pub fn on_resize(&mut self) -> EventOutcome {
        if self.caps.is_mobile() {
            // Opened on a wider layout: take the lock a mobile open would have
            if self.is_open() && self.session.scroll_lock.is_none() {
                self.lock();
                return EventOutcome::Consumed;
            }
            return EventOutcome::Ignored;
        }
        let closed = self.close();
        self.surface.clear_entrance_styles();
        if closed {
            EventOutcome::Consumed
        } else {
            EventOutcome::Ignored
        }
    }

    /// Handle a scroll tick (the host throttles)
    pub fn on_scroll(&mut self, tick: ScrollTick) -> EventOutcome {
        // A pinned body reports synthetic offsets until the lock is released
        if self.session.scroll_lock.is_some() {
            return EventOutcome::Ignored;
        }

        let y = tick.scroll_y;
        let delta = y - self.session.last_scroll_y;
        if delta.abs() > self.nav.scroll_noise_px {
            let hidden = delta > 0.0 && y > self.nav.hide_after_px;
            if hidden != self.session.navbar_hidden {
                self.session.navbar_hidden = hidden;
                self.surface.set_navbar_hidden(hidden);
            }
        }
        self.session.last_scroll_y = y;

        self.refresh_active_link(y);
        EventOutcome::Consumed
    }

    /// Deadline of the deferred hash-link scroll, if one is waiting
    pub fn pending_scroll_due(&self) -> Option<f64> {
        self.session.pending_scroll.as_ref().map(|p| p.due_ms)
    }

    /// Run the deferred hash-link scroll once due; returns whether it ran
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let due = match &self.session.pending_scroll {
            Some(pending) => pending.due_ms <= now_ms,
            None => false,
        };
        if !due {
            return false;
        }

        let Some(pending) = self.session.pending_scroll.take() else {
            return false;
        };
        let y = match &pending.target {
            ScrollTarget::Top => Some(0.0),
            ScrollTarget::Section(id) => self
                .surface
                .section_top(id)
                .map(|top| (top - self.surface.navbar_height()).max(0.0)),
        };
        match y {
            Some(y) => {
                self.surface.smooth_scroll_to(y);
                true
            }
            None => {
                log::warn!("nav: scroll target {:?} not found", pending.target);
                false
            }
        }
    }

    fn refresh_active_link(&mut self, y: f64) {
        let sections = self.surface.sections();
        let link = active_link(y, self.surface.navbar_height(), &sections, &self.nav);
        if self.session.active_link.as_ref() != Some(&link) {
            self.surface.mark_active_link(&link);
            self.session.active_link = Some(link);
        }
    }
}
