//! JavaScript surface: the module start hook and `window.Vitrine`

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use crate::app::AppContext;
use crate::constants::GLOBAL_NAMESPACE;
use crate::util::init_logging;

/// Handle installed as `window.Vitrine` for other page scripts
#[wasm_bindgen]
pub struct SiteApp {
    ctx: Rc<AppContext>,
}

#[wasm_bindgen]
impl SiteApp {
    // =========================================================================
    // Capabilities
    // =========================================================================

    #[wasm_bindgen(js_name = isMobile)]
    pub fn is_mobile(&self) -> bool {
        self.ctx.capabilities().is_mobile()
    }

    #[wasm_bindgen(js_name = isTablet)]
    pub fn is_tablet(&self) -> bool {
        self.ctx.capabilities().is_tablet()
    }

    #[wasm_bindgen(js_name = supportsHover)]
    pub fn supports_hover(&self) -> bool {
        self.ctx.capabilities().supports_hover()
    }

    #[wasm_bindgen(js_name = prefersReducedMotion)]
    pub fn prefers_reduced_motion(&self) -> bool {
        self.ctx.capabilities().prefers_reduced_motion()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[wasm_bindgen(js_name = isMenuOpen)]
    pub fn is_menu_open(&self) -> bool {
        self.ctx.is_menu_open()
    }

    /// Returns false when the menu was already closed
    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&self) -> bool {
        self.ctx.close_menu()
    }

    #[wasm_bindgen(js_name = navbarHeight)]
    pub fn navbar_height(&self) -> f64 {
        self.ctx.navbar_height()
    }

    /// Animate to the first element matching `selector`
    #[wasm_bindgen(js_name = smoothScrollTo)]
    pub fn smooth_scroll_to(&self, selector: &str) -> bool {
        self.ctx.smooth_scroll_to(selector)
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Effective configuration as JSON
    #[wasm_bindgen]
    pub fn config(&self) -> String {
        self.ctx.config().to_json()
    }

    #[wasm_bindgen(js_name = isInViewport)]
    pub fn is_in_viewport(&self, element: &Element) -> bool {
        self.ctx.is_in_viewport(element)
    }

    /// Tear everything down and remove `window.Vitrine`
    #[wasm_bindgen]
    pub fn destroy(&self) {
        self.ctx.teardown();
        if let Some(window) = web_sys::window() {
            let _ = js_sys::Reflect::delete_property(&window, &JsValue::from_str(GLOBAL_NAMESPACE));
        }
    }
}

/// Boot the site once the document is parsed
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    init_logging(log::LevelFilter::Info);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_| mount(window)).forget();
    } else {
        mount(window);
    }
    Ok(())
}

fn mount(window: Window) {
    let ctx = match AppContext::boot(window.clone()) {
        Ok(ctx) => ctx,
        Err(err) => {
            log::error!("boot: failed ({})", err);
            return;
        }
    };

    let app = SiteApp { ctx: ctx.clone() };
    if js_sys::Reflect::set(&window, &JsValue::from_str(GLOBAL_NAMESPACE), &JsValue::from(app)).is_err() {
        log::warn!("boot: could not install window.{}", GLOBAL_NAMESPACE);
    }

    ctx.bind_page_lifecycle().forget();
}
