//! Selectors, class names and element ids the page markup must provide
//!
//! Kept in one place so the markup contract can be audited against
//! `web/index.html`.

// =============================================================================
// Navigation
// =============================================================================

pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const TOGGLE_SELECTOR: &str = ".nav-toggle";
pub const MENU_SELECTOR: &str = ".nav-menu";
pub const MENU_ITEM_SELECTOR: &str = ".nav-menu > li";
pub const NAV_LINK_SELECTOR: &str = ".nav-menu a";
pub const SECTION_SELECTOR: &str = "section[id]";

/// Set on the toggle and the menu while open, and on the current nav link
pub const ACTIVE_CLASS: &str = "active";
/// Set on the navbar while scrolled out of view
pub const NAVBAR_HIDDEN_CLASS: &str = "navbar--hidden";

// =============================================================================
// Effects
// =============================================================================

pub const PARTICLE_CANVAS_SELECTOR: &str = "canvas[data-particles]";
pub const CURSOR_DOT_CLASS: &str = "cursor-dot";
pub const CURSOR_RING_CLASS: &str = "cursor-ring";
/// Added to the root element while the custom cursor replaces the system one
pub const CURSOR_ACTIVE_CLASS: &str = "has-custom-cursor";

// =============================================================================
// Boot
// =============================================================================

/// `<script type="application/json">` holding configuration overrides
pub const CONFIG_SCRIPT_ID: &str = "vitrine-config";
/// Property installed on `window` for other page scripts
pub const GLOBAL_NAMESPACE: &str = "Vitrine";
