//! In-memory stand-ins for the browser, for tests and headless use

use std::cell::Cell;

use crate::capability::{Environment, HOVER_QUERY, REDUCED_MOTION_QUERY};
use crate::nav::{ActiveLink, EntrancePlan, NavSurface, SectionBounds};

/// Environment with fixed answers; only the width can change
#[derive(Clone, Debug, Default)]
pub struct StaticEnvironment {
    pub width: Cell<f64>,
    pub touch: bool,
    pub touch_points: u32,
    pub hover: bool,
    pub reduced_motion: bool,
}

impl StaticEnvironment {
    /// Hover-capable, no touch, full motion
    pub fn with_width(width: f64) -> Self {
        Self {
            width: Cell::new(width),
            hover: true,
            ..Default::default()
        }
    }

    pub fn set_width(&self, width: f64) {
        self.width.set(width);
    }
}

impl Environment for StaticEnvironment {
    fn viewport_width(&self) -> f64 {
        self.width.get()
    }

    fn has_touch_events(&self) -> bool {
        self.touch
    }

    fn max_touch_points(&self) -> u32 {
        self.touch_points
    }

    fn media_matches(&self, query: &str) -> bool {
        match query {
            HOVER_QUERY => self.hover,
            REDUCED_MOTION_QUERY => self.reduced_motion,
            _ => false,
        }
    }
}

/// A write made through [`NavSurface`]
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    SetMenuActive(bool),
    LockBody(f64),
    UnlockBody,
    ScrollTo(f64),
    SmoothScrollTo(f64),
    SetNavbarHidden(bool),
    MarkActive(ActiveLink),
    PlayEntrance(usize),
    ClearEntranceStyles,
}

/// Page model that records every write
///
/// Pinning the body behaves like the browser: the window offset reads 0
/// until something scrolls it again.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    pub scroll_y: f64,
    pub navbar_height: f64,
    pub sections: Vec<SectionBounds>,
    pub menu_items: usize,
    /// Inline `top` of the pinned body, if pinned
    pub body_top: Option<f64>,
    pub menu_active: bool,
    pub navbar_hidden: bool,
    pub active: Option<ActiveLink>,
    pub entrance_styled: bool,
    pub calls: Vec<SurfaceCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            navbar_height: 70.0,
            sections: vec![
                SectionBounds::new("home", 0.0, 800.0),
                SectionBounds::new("about", 800.0, 600.0),
                SectionBounds::new("services", 1400.0, 900.0),
                SectionBounds::new("contact", 2300.0, 700.0),
            ],
            menu_items: 4,
            body_top: None,
            menu_active: false,
            navbar_hidden: false,
            active: None,
            entrance_styled: false,
            calls: Vec::new(),
        }
    }
}

impl RecordingSurface {
    pub fn with_scroll(scroll_y: f64) -> Self {
        Self {
            scroll_y,
            ..Default::default()
        }
    }

    pub fn is_locked(&self) -> bool {
        self.body_top.is_some()
    }

    /// Number of recorded calls matching `pred`
    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl NavSurface for RecordingSurface {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn navbar_height(&self) -> f64 {
        self.navbar_height
    }

    fn sections(&self) -> Vec<SectionBounds> {
        self.sections.clone()
    }

    fn section_top(&self, id: &str) -> Option<f64> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.top)
    }

    fn menu_item_count(&self) -> usize {
        self.menu_items
    }

    fn set_menu_active(&mut self, active: bool) {
        self.menu_active = active;
        self.calls.push(SurfaceCall::SetMenuActive(active));
    }

    fn lock_body(&mut self, offset: f64) {
        self.body_top = Some(-offset);
        self.scroll_y = 0.0;
        self.calls.push(SurfaceCall::LockBody(offset));
    }

    fn unlock_body(&mut self) {
        self.body_top = None;
        self.calls.push(SurfaceCall::UnlockBody);
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
        self.calls.push(SurfaceCall::ScrollTo(y));
    }

    fn smooth_scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
        self.calls.push(SurfaceCall::SmoothScrollTo(y));
    }

    fn set_navbar_hidden(&mut self, hidden: bool) {
        self.navbar_hidden = hidden;
        self.calls.push(SurfaceCall::SetNavbarHidden(hidden));
    }

    fn mark_active_link(&mut self, link: &ActiveLink) {
        self.active = Some(link.clone());
        self.calls.push(SurfaceCall::MarkActive(link.clone()));
    }

    fn play_entrance(&mut self, plan: &EntrancePlan) {
        self.entrance_styled = true;
        self.calls.push(SurfaceCall::PlayEntrance(plan.steps.len()));
    }

    fn clear_entrance_styles(&mut self) {
        self.entrance_styled = false;
        self.calls.push(SurfaceCall::ClearEntranceStyles);
    }
}
