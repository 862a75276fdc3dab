//! Integration tests for the site core
//!
//! These tests drive the components the way the page does:
//! - Menu toggling, body scroll lock and its offset round-trip
//! - Resize, outside click and Escape dismissal
//! - Deferred hash-link scrolling after close
//! - Scroll-driven navbar hiding and active-link marking
//! - Throttled scroll and debounced resize against virtual timers
//! - One-shot reveals

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_core::nav::{ActiveLink, DocumentClick, Key, LinkClick, ScrollTick};
use vitrine_core::testing::{RecordingSurface, StaticEnvironment, SurfaceCall};
use vitrine_core::timing::VirtualTimers;
use vitrine_core::{
    Capabilities, Debounce, EventOutcome, Intersection, Navigation, RevealAction, RevealRegistry,
    SiteConfig, Throttle,
};

const MOBILE: f64 = 375.0;
const DESKTOP: f64 = 1440.0;

struct Page {
    env: Rc<StaticEnvironment>,
    nav: Navigation<RecordingSurface>,
}

impl Page {
    fn new(width: f64, scroll_y: f64) -> Self {
        Self::with_env(StaticEnvironment::with_width(width), scroll_y)
    }

    fn with_env(env: StaticEnvironment, scroll_y: f64) -> Self {
        let env = Rc::new(env);
        let config = SiteConfig::default();
        let caps = Rc::new(Capabilities::probe(env.clone(), config.breakpoints));
        let nav = Navigation::init(Ok(RecordingSurface::with_scroll(scroll_y)), caps, &config);
        Self { env, nav }
    }

    fn surface(&self) -> &RecordingSurface {
        self.nav.machine().expect("navigation enabled").surface()
    }

    fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.surface().count(pred)
    }
}

// =============================================================================
// Toggle and scroll lock
// =============================================================================

#[test]
fn test_toggle_alternates_and_locks_only_on_mobile() {
    for width in [MOBILE, DESKTOP] {
        let mut page = Page::new(width, 0.0);
        for i in 0..6 {
            assert_eq!(page.nav.on_toggle_click(), EventOutcome::Consumed);
            let open = i % 2 == 0;
            assert_eq!(page.nav.is_open(), open);
            assert_eq!(page.surface().menu_active, open);
            assert_eq!(page.surface().is_locked(), open && width == MOBILE);
        }
    }
}

#[test]
fn test_unlock_restores_recorded_offset() {
    let mut page = Page::new(MOBILE, 1234.0);

    page.nav.on_toggle_click();
    assert_eq!(page.surface().body_top, Some(-1234.0));
    // The pinned body reads as scrolled to the top
    assert_eq!(page.surface().scroll_y, 0.0);

    page.nav.on_toggle_click();
    assert!(!page.surface().is_locked());
    assert_eq!(page.surface().scroll_y, 1234.0);
    assert_eq!(page.surface().calls.last(), Some(&SurfaceCall::ScrollTo(1234.0)));
}

#[test]
fn test_entrance_animation_skipped_for_reduced_motion() {
    let mut page = Page::new(MOBILE, 0.0);
    page.nav.on_toggle_click();
    assert_eq!(page.count(|c| matches!(c, SurfaceCall::PlayEntrance(4))), 1);

    let mut page = Page::with_env(
        StaticEnvironment {
            reduced_motion: true,
            ..StaticEnvironment::with_width(MOBILE)
        },
        0.0,
    );
    page.nav.on_toggle_click();
    assert!(page.nav.is_open());
    assert_eq!(page.count(|c| matches!(c, SurfaceCall::PlayEntrance(_))), 0);
}

// =============================================================================
// Dismissal channels
// =============================================================================

#[test]
fn test_resize_to_desktop_closes_exactly_once() {
    let mut page = Page::new(MOBILE, 500.0);
    page.nav.on_toggle_click();
    assert!(page.surface().is_locked());

    page.env.set_width(DESKTOP);
    assert_eq!(page.nav.on_resize(), EventOutcome::Consumed);
    assert!(!page.nav.is_open());
    assert!(!page.surface().is_locked());
    assert_eq!(page.surface().scroll_y, 500.0);

    for _ in 0..3 {
        assert_eq!(page.nav.on_resize(), EventOutcome::Ignored);
    }
    assert_eq!(page.count(|c| *c == SurfaceCall::SetMenuActive(false)), 1);
    assert_eq!(page.count(|c| *c == SurfaceCall::UnlockBody), 1);
    // Inline entrance styles are cleared on every non-mobile resize
    assert_eq!(page.count(|c| *c == SurfaceCall::ClearEntranceStyles), 4);
}

#[test]
fn test_resize_within_mobile_keeps_menu_open() {
    let mut page = Page::new(MOBILE, 0.0);
    page.nav.on_toggle_click();
    page.env.set_width(414.0);
    assert_eq!(page.nav.on_resize(), EventOutcome::Ignored);
    assert!(page.nav.is_open());
    assert_eq!(page.count(|c| *c == SurfaceCall::ClearEntranceStyles), 0);
}

#[test]
fn test_resize_to_mobile_while_open_takes_lock() {
    let mut page = Page::new(DESKTOP, 640.0);
    page.nav.on_toggle_click();
    assert!(page.nav.is_open());
    assert!(!page.surface().is_locked());

    page.env.set_width(MOBILE);
    assert_eq!(page.nav.on_resize(), EventOutcome::Consumed);
    assert!(page.nav.is_open());
    assert_eq!(page.surface().body_top, Some(-640.0));

    // Already pinned: further mobile resizes change nothing
    assert_eq!(page.nav.on_resize(), EventOutcome::Ignored);
    assert_eq!(page.count(|c| matches!(c, SurfaceCall::LockBody(_))), 1);

    page.nav.on_toggle_click();
    assert!(!page.surface().is_locked());
    assert_eq!(page.surface().scroll_y, 640.0);
}

#[test]
fn test_outside_click_only_closes_on_mobile() {
    let mut page = Page::new(DESKTOP, 0.0);
    page.nav.on_toggle_click();
    page.nav.on_document_click(DocumentClick { inside_navbar: false });
    assert!(page.nav.is_open());

    let mut page = Page::new(MOBILE, 0.0);
    page.nav.on_toggle_click();
    assert_eq!(
        page.nav.on_document_click(DocumentClick { inside_navbar: false }),
        EventOutcome::Consumed
    );
    assert!(!page.nav.is_open());
}

#[test]
fn test_escape_closes_on_any_layout() {
    let mut page = Page::new(DESKTOP, 0.0);
    page.nav.on_toggle_click();
    assert_eq!(page.nav.on_key(Key::Escape), EventOutcome::Consumed);
    assert!(!page.nav.is_open());
}

#[test]
fn test_escape_while_closed_has_no_side_effects() {
    let mut page = Page::new(MOBILE, 300.0);
    let before = page.surface().calls.clone();
    let session = page.nav.machine().unwrap().session().clone();

    assert_eq!(page.nav.on_key(Key::Escape), EventOutcome::Ignored);
    assert_eq!(page.surface().calls, before);
    assert_eq!(page.nav.machine().unwrap().session(), &session);
}

// =============================================================================
// Link clicks
// =============================================================================

#[test]
fn test_hash_link_closes_then_scrolls_after_delay() {
    let mut page = Page::new(MOBILE, 0.0);
    page.nav.on_toggle_click();

    let outcome = page.nav.on_link_click(&LinkClick {
        href: "#services",
        now_ms: 1000.0,
    });
    assert_eq!(outcome, EventOutcome::Consumed);
    assert!(!page.nav.is_open());
    assert_eq!(page.nav.pending_scroll_due(), Some(1150.0));

    // Not yet
    assert!(!page.nav.poll(1149.0));
    assert_eq!(page.count(|c| matches!(c, SurfaceCall::SmoothScrollTo(_))), 0);

    assert!(page.nav.poll(1150.0));
    // services top 1400 minus navbar 70
    assert_eq!(page.surface().calls.last(), Some(&SurfaceCall::SmoothScrollTo(1330.0)));
    assert_eq!(page.nav.pending_scroll_due(), None);
    assert!(!page.nav.poll(2000.0));

    // Close (unlock + restore) strictly precedes the scroll
    let calls = &page.surface().calls;
    let unlock = calls.iter().position(|c| *c == SurfaceCall::UnlockBody).unwrap();
    let scroll = calls.iter().position(|c| matches!(c, SurfaceCall::SmoothScrollTo(_))).unwrap();
    assert!(unlock < scroll);
}

#[test]
fn test_bare_hash_scrolls_to_top() {
    let mut page = Page::new(MOBILE, 900.0);
    page.nav.on_toggle_click();
    page.nav.on_link_click(&LinkClick { href: "#", now_ms: 0.0 });
    assert!(page.nav.poll(150.0));
    assert_eq!(page.surface().calls.last(), Some(&SurfaceCall::SmoothScrollTo(0.0)));
}

#[test]
fn test_missing_hash_target_is_dropped() {
    let mut page = Page::new(MOBILE, 0.0);
    page.nav.on_toggle_click();
    page.nav.on_link_click(&LinkClick { href: "#nowhere", now_ms: 0.0 });
    assert!(!page.nav.poll(500.0));
    assert_eq!(page.nav.pending_scroll_due(), None);
}

#[test]
fn test_external_link_closes_and_allows_navigation() {
    let mut page = Page::new(MOBILE, 0.0);
    page.nav.on_toggle_click();
    let outcome = page.nav.on_link_click(&LinkClick {
        href: "/careers",
        now_ms: 0.0,
    });
    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(!page.nav.is_open());
    assert_eq!(page.nav.pending_scroll_due(), None);
}

#[test]
fn test_link_click_ignored_when_closed_or_desktop() {
    let mut page = Page::new(MOBILE, 0.0);
    let click = LinkClick { href: "#about", now_ms: 0.0 };
    assert_eq!(page.nav.on_link_click(&click), EventOutcome::Ignored);

    let mut page = Page::new(DESKTOP, 0.0);
    page.nav.on_toggle_click();
    assert_eq!(page.nav.on_link_click(&click), EventOutcome::Ignored);
    assert!(page.nav.is_open());
}

// =============================================================================
// Scroll channel
// =============================================================================

#[test]
fn test_navbar_hides_on_down_and_shows_on_up() {
    let mut page = Page::new(DESKTOP, 0.0);

    // Downward but not yet past the hide offset
    page.nav.on_scroll(ScrollTick { scroll_y: 80.0 });
    assert!(!page.surface().navbar_hidden);

    page.nav.on_scroll(ScrollTick { scroll_y: 300.0 });
    assert!(page.surface().navbar_hidden);

    // Jitter under the noise threshold changes nothing
    page.nav.on_scroll(ScrollTick { scroll_y: 295.0 });
    assert!(page.surface().navbar_hidden);

    page.nav.on_scroll(ScrollTick { scroll_y: 200.0 });
    assert!(!page.surface().navbar_hidden);

    assert_eq!(page.nav.machine().unwrap().session().last_scroll_y, 200.0);
    assert_eq!(page.count(|c| matches!(c, SurfaceCall::SetNavbarHidden(_))), 2);
}

#[test]
fn test_active_link_follows_scroll() {
    let mut page = Page::new(DESKTOP, 0.0);
    assert_eq!(page.surface().active, Some(ActiveLink::Home));

    for y in [0.0, 42.0, 99.0] {
        page.nav.on_scroll(ScrollTick { scroll_y: y });
        assert_eq!(page.surface().active, Some(ActiveLink::Home));
    }

    // about: [800 - 70 - 50, +600)
    page.nav.on_scroll(ScrollTick { scroll_y: 700.0 });
    assert_eq!(page.surface().active, Some(ActiveLink::Section("about".into())));

    page.nav.on_scroll(ScrollTick { scroll_y: 1500.0 });
    assert_eq!(page.surface().active, Some(ActiveLink::Section("services".into())));

    let marks = page.count(|c| matches!(c, SurfaceCall::MarkActive(_)));
    assert_eq!(marks, 3);
}

#[test]
fn test_scroll_ignored_while_body_pinned() {
    let mut page = Page::new(MOBILE, 600.0);
    page.nav.on_toggle_click();
    assert_eq!(page.nav.on_scroll(ScrollTick { scroll_y: 0.0 }), EventOutcome::Ignored);
    assert_eq!(page.nav.machine().unwrap().session().last_scroll_y, 600.0);
}

// =============================================================================
// Rate limiting wired to the navigation
// =============================================================================

#[test]
fn test_throttled_scroll_feeds_navigation() {
    let timers = Rc::new(VirtualTimers::new());
    let page = Rc::new(RefCell::new(Page::new(DESKTOP, 0.0)));
    let sink = page.clone();
    let throttle = Throttle::new(16.0, timers.clone(), move |y: f64| {
        sink.borrow_mut().nav.on_scroll(ScrollTick { scroll_y: y });
    });

    for (t, y) in [(0.0, 10.0), (4.0, 200.0), (8.0, 400.0), (12.0, 700.0)] {
        timers.advance_to(t);
        throttle.call(y);
    }
    assert_eq!(page.borrow().nav.machine().unwrap().session().last_scroll_y, 10.0);

    timers.advance_to(16.0);
    let page = page.borrow();
    let session = page.nav.machine().unwrap().session();
    assert_eq!(session.last_scroll_y, 700.0);
    assert!(session.navbar_hidden);
    assert_eq!(page.surface().active, Some(ActiveLink::Section("about".into())));
}

#[test]
fn test_debounced_resize_closes_once() {
    let timers = Rc::new(VirtualTimers::new());
    let page = Rc::new(RefCell::new(Page::new(MOBILE, 0.0)));
    page.borrow_mut().nav.on_toggle_click();

    let sink = page.clone();
    let debounce = Debounce::new(300.0, timers.clone(), move |_: ()| {
        sink.borrow_mut().nav.on_resize();
    });

    page.borrow().env.set_width(DESKTOP);
    for t in [0.0, 50.0, 100.0] {
        timers.advance_to(t);
        debounce.call(());
    }
    timers.advance_to(399.0);
    assert!(page.borrow().nav.is_open());

    timers.advance_to(400.0);
    assert!(!page.borrow().nav.is_open());
    assert_eq!(
        page.borrow().count(|c| *c == SurfaceCall::SetMenuActive(false)),
        1
    );
}

// =============================================================================
// Reveal
// =============================================================================

#[test]
fn test_reveal_triggers_once_per_session() {
    let mut registry = RevealRegistry::new(false);
    for id in ["hero", "features", "pricing"] {
        registry.watch(id);
    }

    let mut triggers = Vec::new();
    for _ in 0..5 {
        for visible in [true, false] {
            let batch: Vec<_> = ["hero", "features"]
                .into_iter()
                .map(|key| Intersection {
                    key,
                    is_intersecting: visible,
                })
                .collect();
            triggers.extend(registry.on_intersection(&batch));
        }
    }

    assert_eq!(
        triggers,
        vec![RevealAction::AnimateIn("hero"), RevealAction::AnimateIn("features")]
    );
    assert!(registry.is_pending(&"pricing"));
    assert_eq!(registry.pending_len(), 1);
}
