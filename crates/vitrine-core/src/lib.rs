//! Presentation logic for the Vitrine marketing site
//!
//! This crate holds the state behind the site's interactive chrome:
//! - Responsive navigation (menu toggle, body scroll lock, active link)
//! - One-shot reveal-on-scroll
//! - Throttle/debounce for scroll and resize handlers
//! - Particle, cursor and smooth-scroll effect math
//! - Device capability probe and static configuration
//!
//! ## Architecture
//!
//! Nothing here touches the browser. Components talk to the page through
//! small traits ([`capability::Environment`], [`nav::NavSurface`],
//! [`timing::TimerHost`]); `vitrine-web` implements them with `web-sys`, and
//! [`testing`] provides in-memory versions.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use vitrine_core::{Capabilities, Navigation, SiteConfig};
//! use vitrine_core::testing::{RecordingSurface, StaticEnvironment};
//!
//! let config = SiteConfig::default();
//! let caps = Rc::new(Capabilities::probe(
//!     StaticEnvironment::with_width(375.0),
//!     config.breakpoints,
//! ));
//! let mut nav = Navigation::init(Ok(RecordingSurface::default()), caps, &config);
//!
//! nav.on_toggle_click();
//! assert!(nav.is_open());
//! ```

pub mod capability;
pub mod config;
pub mod effects;
pub mod error;
pub mod nav;
pub mod reveal;
pub mod testing;
pub mod timing;

pub use capability::{Capabilities, Environment, LayoutClass};
pub use config::SiteConfig;
pub use error::{ConfigError, Result, VitrineError};
pub use nav::{EventOutcome, Navigation};
pub use reveal::{Intersection, RevealAction, RevealRegistry, RevealStyle};
pub use timing::{Debounce, Throttle, TimerHost};
