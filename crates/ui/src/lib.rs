//! Browser side of peerchat-web: the settings panel, compiled to wasm.
//!
//! `main_js` mounts the panel over the markup in `index.html`, opens the
//! bridge socket to the host and wires the save and connect buttons.

mod bridge;
mod dom;
mod panel;
mod theme;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::bridge::WsBackend;
use crate::panel::SettingsPanel;

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let doc = dom::document()?;
    let panel = Rc::new(SettingsPanel::mount(&doc)?);

    let ws_url = get_ws_url()?;
    web_sys::console::log_1(&format!("bridge: connecting to {ws_url}").into());

    let backend = WsBackend::connect(&ws_url, Rc::clone(&panel))?;
    panel.wire_actions(Rc::new(backend))?;

    Ok(())
}

fn get_ws_url() -> Result<String, JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    let location = js_sys::Reflect::get(&window, &"location".into())?;

    let hostname = js_sys::Reflect::get(&location, &"hostname".into())?
        .as_string()
        .unwrap_or_else(|| "localhost".to_string());

    let protocol = js_sys::Reflect::get(&location, &"protocol".into())?
        .as_string()
        .unwrap_or_else(|| "http:".to_string());

    let ws_protocol = if protocol == "https:" { "wss:" } else { "ws:" };

    // WS port comes from the dynamic config the host serves at /config.js
    let config = js_sys::Reflect::get(&window, &"PEERCHAT_CONFIG".into())?;
    let ws_port = if config.is_undefined() {
        web_sys::console::warn_1(&"PEERCHAT_CONFIG not found, defaulting wsPort to 9100".into());
        9100
    } else {
        js_sys::Reflect::get(&config, &"wsPort".into())?
            .as_f64()
            .unwrap_or(9100.0) as u16
    };

    Ok(format!("{}//{}:{}", ws_protocol, hostname, ws_port))
}
