//! Small DOM helpers shared by the components

use vitrine_core::VitrineError;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// First element matching `selector`, as an `HtmlElement`
pub fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Like [`query`] but reports the missing element by name
pub fn require(document: &Document, selector: &str, name: &'static str) -> Result<HtmlElement, VitrineError> {
    query(document, selector).ok_or(VitrineError::MissingElement(name))
}

/// All elements matching `selector`, in document order
pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

/// Offset of the element's top edge from the document top
pub fn document_top(window: &Window, element: &Element) -> f64 {
    element.get_bounding_client_rect().top() + scroll_y(window)
}

/// Whether the element lies entirely inside the viewport
pub fn is_in_viewport(window: &Window, element: &Element) -> bool {
    let rect = element.get_bounding_client_rect();
    rect.top() >= 0.0
        && rect.left() >= 0.0
        && rect.bottom() <= viewport_height(window)
        && rect.right() <= viewport_width(window)
}

/// Write inline style properties, ignoring failures
pub fn set_styles(element: &HtmlElement, props: &[(&str, &str)]) {
    let style = element.style();
    for (name, value) in props {
        let _ = style.set_property(name, value);
    }
}

pub fn remove_styles(element: &HtmlElement, names: &[&str]) {
    let style = element.style();
    for name in names {
        let _ = style.remove_property(name);
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}
