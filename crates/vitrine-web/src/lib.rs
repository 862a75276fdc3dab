//! Browser runtime for the Vitrine site
//!
//! Binds the `vitrine-core` components to the page with `web-sys`:
//! - [`env`] implements the capability and timer seams
//! - [`nav`] implements the navigation surface and wires its listeners
//! - [`reveal`], particles and cursor drive their DOM layers per frame
//! - [`app::AppContext`] owns all of it for the lifetime of the page
//!
//! The module start hook boots on `DOMContentLoaded` and installs
//! [`SiteApp`] as `window.Vitrine`.

pub mod app;
pub mod constants;
mod cursor;
pub mod dom;
pub mod env;
mod exports;
pub mod nav;
mod particles;
pub mod reveal;
pub mod scroll;
mod util;

pub use cursor::CursorEffect;
pub use exports::{start, SiteApp};
pub use particles::ParticleCanvas;
pub use util::init_logging;
