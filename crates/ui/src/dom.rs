use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlInputElement};

/// Get document helper
pub fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Look up an element by id, failing loudly when the markup drifted.
pub fn element(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

/// Look up an `<input>` by id
pub fn input(doc: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
    element(doc, id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an input")))
}

/// Collect all elements carrying a class, e.g. every username label.
pub fn elements_by_class(doc: &Document, class: &str) -> Result<Vec<Element>, JsValue> {
    let list = doc.query_selector_all(&format!(".{class}"))?;
    let mut elements = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(node) = list.item(i) {
            if let Ok(el) = node.dyn_into::<Element>() {
                elements.push(el);
            }
        }
    }
    Ok(elements)
}
