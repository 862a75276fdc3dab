//! Device capability probe
//!
//! Touch, hover and reduced-motion are fixed for a session and read once.
//! Layout class (mobile/tablet/desktop) depends on the live viewport width
//! and is recomputed on every call.

use crate::config::Breakpoints;

/// Media query matched for hover-capable pointers
pub const HOVER_QUERY: &str = "(hover: hover)";

/// Media query matched when the user asked for less motion
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Read access to the host environment
///
/// Implementations must not fail: an unavailable feature reports `false`
/// or zero.
pub trait Environment {
    /// Current viewport width in CSS pixels
    fn viewport_width(&self) -> f64;
    /// Whether `ontouchstart` exists on the window
    fn has_touch_events(&self) -> bool;
    /// `navigator.maxTouchPoints`
    fn max_touch_points(&self) -> u32;
    /// Whether a media query currently matches
    fn media_matches(&self, query: &str) -> bool;
}

/// Layout class derived from the viewport width
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutClass {
    Mobile,
    Tablet,
    Desktop,
}

impl LayoutClass {
    /// Classify a width against the breakpoint pair
    pub fn classify(width: f64, breakpoints: &Breakpoints) -> Self {
        if width <= breakpoints.mobile {
            LayoutClass::Mobile
        } else if width <= breakpoints.tablet {
            LayoutClass::Tablet
        } else {
            LayoutClass::Desktop
        }
    }
}

/// Capability snapshot plus live layout predicates
pub struct Capabilities {
    env: Box<dyn Environment>,
    breakpoints: Breakpoints,
    supports_touch: bool,
    supports_hover: bool,
    prefers_reduced_motion: bool,
}

impl Capabilities {
    /// Probe the environment once for session-stable features
    pub fn probe(env: impl Environment + 'static, breakpoints: Breakpoints) -> Self {
        let supports_touch = env.has_touch_events() || env.max_touch_points() > 0;
        let supports_hover = env.media_matches(HOVER_QUERY);
        let prefers_reduced_motion = env.media_matches(REDUCED_MOTION_QUERY);
        log::debug!(
            "capabilities: touch={} hover={} reduced_motion={}",
            supports_touch,
            supports_hover,
            prefers_reduced_motion
        );
        Self {
            env: Box::new(env),
            breakpoints,
            supports_touch,
            supports_hover,
            prefers_reduced_motion,
        }
    }

    #[inline]
    pub fn layout(&self) -> LayoutClass {
        LayoutClass::classify(self.env.viewport_width(), &self.breakpoints)
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.layout() == LayoutClass::Mobile
    }

    #[inline]
    pub fn is_tablet(&self) -> bool {
        self.layout() == LayoutClass::Tablet
    }

    #[inline]
    pub fn is_desktop(&self) -> bool {
        self.layout() == LayoutClass::Desktop
    }

    #[inline]
    pub fn supports_touch(&self) -> bool {
        self.supports_touch
    }

    #[inline]
    pub fn supports_hover(&self) -> bool {
        self.supports_hover
    }

    #[inline]
    pub fn prefers_reduced_motion(&self) -> bool {
        self.prefers_reduced_motion
    }

    /// Decorative motion runs only on larger screens without a reduced-motion request
    pub fn allows_decorative_motion(&self) -> bool {
        !self.prefers_reduced_motion && !self.is_mobile()
    }

    /// The custom cursor needs a hover-capable pointer and a non-mobile layout
    pub fn allows_custom_cursor(&self) -> bool {
        self.supports_hover && !self.is_mobile()
    }
}

impl<T: Environment + ?Sized> Environment for std::rc::Rc<T> {
    fn viewport_width(&self) -> f64 {
        (**self).viewport_width()
    }

    fn has_touch_events(&self) -> bool {
        (**self).has_touch_events()
    }

    fn max_touch_points(&self) -> u32 {
        (**self).max_touch_points()
    }

    fn media_matches(&self, query: &str) -> bool {
        (**self).media_matches(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticEnvironment;
    use std::rc::Rc;

    #[test]
    fn test_classify_boundaries() {
        let bp = Breakpoints::default();
        assert_eq!(LayoutClass::classify(320.0, &bp), LayoutClass::Mobile);
        assert_eq!(LayoutClass::classify(768.0, &bp), LayoutClass::Mobile);
        assert_eq!(LayoutClass::classify(769.0, &bp), LayoutClass::Tablet);
        assert_eq!(LayoutClass::classify(1024.0, &bp), LayoutClass::Tablet);
        assert_eq!(LayoutClass::classify(1025.0, &bp), LayoutClass::Desktop);
    }

    #[test]
    fn test_layout_follows_live_width() {
        let env = Rc::new(StaticEnvironment::with_width(1280.0));
        let caps = Capabilities::probe(env.clone(), Breakpoints::default());
        assert!(caps.is_desktop());
        assert!(!caps.is_mobile());

        env.set_width(500.0);
        assert!(caps.is_mobile());
        assert!(!caps.is_tablet());

        env.set_width(900.0);
        assert!(caps.is_tablet());
        assert!(!caps.is_mobile());
    }

    #[test]
    fn test_touch_from_either_signal() {
        let env = StaticEnvironment {
            touch_points: 5,
            ..StaticEnvironment::with_width(400.0)
        };
        assert!(Capabilities::probe(env, Breakpoints::default()).supports_touch());

        let env = StaticEnvironment {
            touch: true,
            ..StaticEnvironment::with_width(400.0)
        };
        assert!(Capabilities::probe(env, Breakpoints::default()).supports_touch());

        let env = StaticEnvironment::with_width(400.0);
        assert!(!Capabilities::probe(env, Breakpoints::default()).supports_touch());
    }

    #[test]
    fn test_effect_gates() {
        let env = Rc::new(StaticEnvironment::with_width(1440.0));
        let caps = Capabilities::probe(env.clone(), Breakpoints::default());
        assert!(caps.allows_decorative_motion());
        assert!(caps.allows_custom_cursor());

        env.set_width(375.0);
        assert!(!caps.allows_decorative_motion());
        assert!(!caps.allows_custom_cursor());

        let env = StaticEnvironment {
            reduced_motion: true,
            hover: false,
            ..StaticEnvironment::with_width(1440.0)
        };
        let caps = Capabilities::probe(env, Breakpoints::default());
        assert!(caps.prefers_reduced_motion());
        assert!(!caps.allows_decorative_motion());
        assert!(!caps.allows_custom_cursor());
    }
}
