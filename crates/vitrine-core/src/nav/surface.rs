//! DOM side of the navigation state machine

/// Geometry of a page section that a nav link can point at
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    /// Element id, without the leading `#`
    pub id: String,
    /// Offset of the section top from the document top
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Which nav link carries the active marker
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveLink {
    /// Top of the page, no section selected
    Home,
    /// Link whose `href` is `#<id>`
    Section(String),
}

/// One menu item's slot in the entrance animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntranceStep {
    pub index: usize,
    pub delay_ms: u32,
}

/// Staggered entrance animation for the opened menu
#[derive(Clone, Debug, PartialEq)]
pub struct EntrancePlan {
    pub steps: Vec<EntranceStep>,
    pub duration_ms: u32,
    pub easing: String,
    /// Vertical distance each item slides up from
    pub offset_px: f64,
}

impl EntrancePlan {
    /// Items start one stagger interval apart, in document order
    pub fn staggered(item_count: usize, stagger_ms: u32, duration_ms: u32, easing: &str, offset_px: f64) -> Self {
        let steps = (0..item_count)
            .map(|index| EntranceStep {
                index,
                delay_ms: stagger_ms.saturating_mul(index as u32),
            })
            .collect();
        Self {
            steps,
            duration_ms,
            easing: easing.to_string(),
            offset_px,
        }
    }
}

/// Everything the navigation state machine reads from or writes to the page
///
/// The browser implementation lives in the web crate; tests use
/// [`crate::testing::RecordingSurface`].
pub trait NavSurface {
    /// Current vertical scroll offset of the window
    fn scroll_y(&self) -> f64;

    /// Rendered height of the navbar
    fn navbar_height(&self) -> f64;

    /// Sections with an id, in document order
    fn sections(&self) -> Vec<SectionBounds>;

    /// Document offset of the element with `id`
    fn section_top(&self, id: &str) -> Option<f64>;

    /// Number of items in the menu list
    fn menu_item_count(&self) -> usize;

    /// Add or remove the active classes on the toggle and the menu
    fn set_menu_active(&mut self, active: bool);

    /// Pin the body at `offset` so the page cannot scroll behind the menu
    fn lock_body(&mut self, offset: f64);

    /// Undo [`NavSurface::lock_body`]
    fn unlock_body(&mut self);

    /// Jump the window to `y` without animation
    fn scroll_to(&mut self, y: f64);

    /// Animate the window to `y`
    fn smooth_scroll_to(&mut self, y: f64);

    fn set_navbar_hidden(&mut self, hidden: bool);

    fn mark_active_link(&mut self, link: &ActiveLink);

    fn play_entrance(&mut self, plan: &EntrancePlan);

    /// Remove inline styles left on menu items by the entrance animation
    fn clear_entrance_styles(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staggered_plan() {
        let plan = EntrancePlan::staggered(4, 100, 600, "ease", 30.0);
        let delays: Vec<u32> = plan.steps.iter().map(|s| s.delay_ms).collect();
        assert_eq!(delays, vec![0, 100, 200, 300]);
        assert_eq!(plan.steps[3].index, 3);
    }

    #[test]
    fn test_empty_menu_plan() {
        let plan = EntrancePlan::staggered(0, 100, 600, "ease", 30.0);
        assert!(plan.steps.is_empty());
    }
}
