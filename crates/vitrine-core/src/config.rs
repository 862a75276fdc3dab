//! Static site configuration
//!
//! Every tunable constant used by the components lives here. The record is
//! loaded once at startup (defaults, optionally overridden by an inline JSON
//! document) and handed to each constructor by reference. Nothing mutates it
//! afterwards.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration record
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub animation: AnimationConfig,
    pub particles: ParticleConfig,
    pub timing: TimingConfig,
    pub breakpoints: Breakpoints,
    pub nav: NavConfig,
    pub reveal: RevealConfig,
    pub cursor: CursorConfig,
    pub logging: LoggingConfig,
}

/// Entrance and reveal animation constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Transition duration in milliseconds
    pub duration_ms: u32,
    /// CSS easing curve applied to transitions
    pub easing: String,
    /// Delay between consecutive menu items in the entrance animation
    pub stagger_ms: u32,
    /// Vertical offset (px) items start from before sliding into place
    pub offset_px: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 600,
            easing: "cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
            stagger_ms: 100,
            offset_px: 30.0,
        }
    }
}

/// Particle canvas constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Maximum speed per axis in px/frame
    pub speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Particles closer than this are joined by a line (0 disables links)
    pub link_distance: f64,
    /// Fill colour as an `r, g, b` triple used in `rgba()`
    pub color: String,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            speed: 0.5,
            min_size: 1.0,
            max_size: 3.0,
            min_opacity: 0.1,
            max_opacity: 0.6,
            link_distance: 120.0,
            color: "99, 102, 241".to_string(),
        }
    }
}

/// Rate limiting delays for expensive handlers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Scroll handler throttle (one frame)
    pub throttle_ms: u32,
    /// Resize handler debounce
    pub debounce_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 16,
            debounce_ms: 250,
        }
    }
}

/// Viewport width thresholds in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Widths up to and including this are mobile
    pub mobile: f64,
    /// Widths above `mobile` up to and including this are tablet
    pub tablet: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: 768.0,
            tablet: 1024.0,
        }
    }
}

/// Navigation thresholds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Scroll deltas at or below this are ignored for hide/show
    pub scroll_noise_px: f64,
    /// The navbar only hides once scrolled past this offset
    pub hide_after_px: f64,
    /// Offsets below this are the home state (no section active)
    pub home_threshold_px: f64,
    /// Extra lead subtracted from section tops when picking the active link
    pub section_offset_px: f64,
    /// Delay between closing the menu and scrolling to a hash target
    pub link_scroll_delay_ms: u32,
    pub smooth_scroll_ms: u32,
    /// Identifier of the home link target (`#home`)
    pub home_id: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scroll_noise_px: 10.0,
            hide_after_px: 100.0,
            home_threshold_px: 100.0,
            section_offset_px: 50.0,
            link_scroll_delay_ms: 150,
            smooth_scroll_ms: 800,
            home_id: "home".to_string(),
        }
    }
}

/// Reveal-on-scroll observer options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// IntersectionObserver root margin
    pub root_margin: String,
    /// Intersection ratio that counts as visible
    pub threshold: f64,
    /// CSS selector of elements to reveal
    pub selector: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            root_margin: "-10%".to_string(),
            threshold: 0.1,
            selector: "[data-reveal]".to_string(),
        }
    }
}

/// Custom cursor constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Fraction of the remaining distance the ring covers each frame
    pub follow_factor: f64,
    /// Ring scale while hovering an interactive element
    pub hover_scale: f64,
    /// Selector of elements that count as interactive
    pub interactive_selector: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            follow_factor: 0.15,
            hover_scale: 1.5,
            interactive_selector: "a, button, [data-cursor]".to_string(),
        }
    }
}

/// Console diagnostics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.level.parse().ok()
    }
}

impl SiteConfig {
    /// Parse a JSON document; fields it omits keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize for the exported namespace
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Reject values the components cannot operate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoints.mobile <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "breakpoints.mobile",
                reason: "must be positive",
            });
        }
        if self.breakpoints.tablet <= self.breakpoints.mobile {
            return Err(ConfigError::Invalid {
                field: "breakpoints.tablet",
                reason: "must be above the mobile breakpoint",
            });
        }
        if self.timing.throttle_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timing.throttle_ms",
                reason: "must be greater than zero",
            });
        }
        if self.timing.debounce_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timing.debounce_ms",
                reason: "must be greater than zero",
            });
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Invalid {
                field: "reveal.threshold",
                reason: "must be within 0..=1",
            });
        }
        if self.particles.min_size > self.particles.max_size {
            return Err(ConfigError::Invalid {
                field: "particles.min_size",
                reason: "must not exceed max_size",
            });
        }
        if self.particles.min_opacity > self.particles.max_opacity {
            return Err(ConfigError::Invalid {
                field: "particles.min_opacity",
                reason: "must not exceed max_opacity",
            });
        }
        if !(0.0..=1.0).contains(&self.cursor.follow_factor) {
            return Err(ConfigError::Invalid {
                field: "cursor.follow_factor",
                reason: "must be within 0..=1",
            });
        }
        if self.logging.level_filter().is_none() {
            return Err(ConfigError::Invalid {
                field: "logging.level",
                reason: "unknown log level",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timing.throttle_ms, 16);
        assert_eq!(config.nav.link_scroll_delay_ms, 150);
        assert!((config.nav.scroll_noise_px - 10.0).abs() < f64::EPSILON);
        assert!((config.reveal.threshold - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_override() {
        let config = SiteConfig::from_json(
            r#"{ "timing": { "debounce_ms": 300 }, "particles": { "count": 12 } }"#,
        )
        .unwrap();
        assert_eq!(config.timing.debounce_ms, 300);
        // Untouched fields in an overridden section keep their defaults
        assert_eq!(config.timing.throttle_ms, 16);
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.nav, NavConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_rejects_inverted_breakpoints() {
        let err = SiteConfig::from_json(r#"{ "breakpoints": { "mobile": 900, "tablet": 800 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "breakpoints.tablet",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_delay() {
        let err = SiteConfig::from_json(r#"{ "timing": { "throttle_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_log_level() {
        let config = SiteConfig::from_json(r#"{ "logging": { "level": "debug" } }"#).unwrap();
        assert_eq!(config.logging.level_filter(), Some(log::LevelFilter::Debug));
        assert!(SiteConfig::from_json(r#"{ "logging": { "level": "loud" } }"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SiteConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let config = SiteConfig::default();
        let parsed = SiteConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(parsed, config);
    }
}
