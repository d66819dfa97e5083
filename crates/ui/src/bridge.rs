use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

use peerchat_web_protocol::{HostMessage, SettingsUpdate, UiMessage};

use crate::panel::SettingsPanel;

/// What the panel needs from the host side. Click handlers talk to this
/// instead of a concrete socket, so the panel can be driven without one.
pub trait Backend {
    fn update_settings(&self, update: SettingsUpdate);
    fn connect_to_peer(&self, address: String);
}

/// WebSocket-backed [`Backend`] speaking the JSON bridge protocol.
pub struct WsBackend {
    ws: WebSocket,
}

impl WsBackend {
    /// Open the bridge socket and feed every pushed document into the panel.
    pub fn connect(ws_url: &str, panel: Rc<SettingsPanel>) -> Result<Self, JsValue> {
        let ws = WebSocket::new(ws_url)?;

        // ON OPEN
        let onopen = Closure::wrap(Box::new(move || {
            web_sys::console::log_1(&"bridge: connected".into());
        }) as Box<dyn FnMut()>);
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();

        // ON MESSAGE
        let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
            let Some(text) = e.data().as_string() else {
                web_sys::console::warn_1(&"bridge: non-text frame dropped".into());
                return;
            };
            match HostMessage::from_json(&text) {
                Ok(HostMessage::LoadSettings(document)) => {
                    if let Err(err) = panel.load(&document) {
                        web_sys::console::error_1(&err);
                    }
                }
                Err(err) => {
                    web_sys::console::warn_1(&format!("bridge: bad frame: {err}").into());
                }
            }
        }) as Box<dyn FnMut(_)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        // ON ERROR
        let onerror = Closure::wrap(Box::new(move |_e: ErrorEvent| {
            web_sys::console::error_1(&"bridge: socket error".into());
        }) as Box<dyn FnMut(_)>);
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        // ON CLOSE
        let onclose = Closure::wrap(Box::new(move |e: CloseEvent| {
            web_sys::console::warn_1(
                &format!("bridge: closed: {} {}", e.code(), e.reason()).into(),
            );
        }) as Box<dyn FnMut(_)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        Ok(Self { ws })
    }

    fn send(&self, message: &UiMessage) {
        match message.to_json() {
            Ok(text) => {
                if let Err(err) = self.ws.send_with_str(&text) {
                    web_sys::console::error_1(&err);
                }
            }
            Err(err) => {
                web_sys::console::error_1(&format!("bridge: encode failed: {err}").into());
            }
        }
    }
}

impl Backend for WsBackend {
    fn update_settings(&self, update: SettingsUpdate) {
        self.send(&UiMessage::UpdateSettings(update));
    }

    fn connect_to_peer(&self, address: String) {
        self.send(&UiMessage::ConnectToPeer { address });
    }
}
