//! Navigation session state

use super::ActiveLink;

/// Menu visibility
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Body scroll lock taken when the menu opened on a mobile layout
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollLock {
    /// Window offset at lock time; the body is pinned at `top: -offset`
    pub offset: f64,
}

/// Where a deferred hash-link scroll goes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollTarget {
    /// `#` on its own: the top of the page
    Top,
    Section(String),
}

impl ScrollTarget {
    /// Parse a hash href; `None` when it is not one
    pub fn from_href(href: &str) -> Option<Self> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            Some(ScrollTarget::Top)
        } else {
            Some(ScrollTarget::Section(id.to_string()))
        }
    }
}

/// Scroll to run once the menu close has settled
#[derive(Clone, Debug, PartialEq)]
pub struct PendingScroll {
    pub target: ScrollTarget,
    pub due_ms: f64,
}

/// State owned by the navigation state machine
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavSession {
    pub menu: MenuState,
    pub last_scroll_y: f64,
    pub scroll_lock: Option<ScrollLock>,
    pub navbar_hidden: bool,
    /// Last link marked on the page; `None` until the first recompute
    pub active_link: Option<ActiveLink>,
    pub pending_scroll: Option<PendingScroll>,
}

impl NavSession {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.menu == MenuState::Open
    }
}
