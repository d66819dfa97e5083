use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use peerchat_web_protocol::{theme_pairs, ColorScheme};

/// Write the theme variables onto the document root, slot order, so the
/// stylesheet picks the new colors up immediately.
pub fn apply(doc: &Document, scheme: &ColorScheme) -> Result<(), JsValue> {
    let root = doc
        .document_element()
        .ok_or_else(|| JsValue::from_str("no document element"))?
        .dyn_into::<web_sys::HtmlElement>()?;

    let style = root.style();
    for (variable, value) in theme_pairs(scheme) {
        style.set_property(variable, value)?;
    }
    Ok(())
}
