use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, HtmlInputElement};

use peerchat_web_protocol::{SettingsDocument, SettingsForm, USERNAME_MAX_CHARS};

use crate::bridge::Backend;
use crate::dom;
use crate::theme;

/// The settings panel component.
///
/// Every element reference is looked up once at mount and kept here; the
/// handlers work off this struct instead of re-querying the document.
pub struct SettingsPanel {
    doc: Document,
    username_input: HtmlInputElement,
    status_input: HtmlInputElement,
    port_input: HtmlInputElement,
    color_inputs: [HtmlInputElement; 11],
    avatar_image: HtmlImageElement,
    username_labels: Vec<Element>,
    username_hint: Element,
    peer_address_input: HtmlInputElement,
    save_button: Element,
    connect_button: Element,
}

impl SettingsPanel {
    /// Look up every element the panel touches. A missing element fails the
    /// mount, not a click handler later.
    pub fn mount(doc: &Document) -> Result<Self, JsValue> {
        let mut colors = Vec::with_capacity(11);
        for slot in 1..=11 {
            colors.push(dom::input(doc, &format!("color-{slot}"))?);
        }
        let color_inputs: [HtmlInputElement; 11] = colors
            .try_into()
            .map_err(|_| JsValue::from_str("expected 11 color inputs"))?;

        Ok(Self {
            doc: doc.clone(),
            username_input: dom::input(doc, "settings-username")?,
            status_input: dom::input(doc, "settings-status")?,
            port_input: dom::input(doc, "settings-port")?,
            color_inputs,
            avatar_image: dom::element(doc, "profile-avatar")?
                .dyn_into::<HtmlImageElement>()
                .map_err(|_| JsValue::from_str("#profile-avatar is not an image"))?,
            username_labels: dom::elements_by_class(doc, "username")?,
            username_hint: dom::element(doc, "username-hint")?,
            peer_address_input: dom::input(doc, "peer-address")?,
            save_button: dom::element(doc, "save-settings")?,
            connect_button: dom::element(doc, "connect-peer")?,
        })
    }

    /// Mirror a loaded document into the page: avatar, username labels, the
    /// editable fields and the live theme.
    pub fn load(&self, document: &SettingsDocument) -> Result<(), JsValue> {
        self.avatar_image.set_src(&document.avatar);
        for label in &self.username_labels {
            label.set_text_content(Some(&document.username));
        }

        let mut form = SettingsForm::default();
        form.apply_document(document);
        self.write_form(&form);

        theme::apply(&self.doc, &document.color_scheme)
    }

    fn write_form(&self, form: &SettingsForm) {
        self.username_input.set_value(&form.username);
        self.status_input.set_value(&form.status);
        self.port_input.set_value(&form.internal_server_port);
        for (input, value) in self.color_inputs.iter().zip(&form.colors) {
            input.set_value(value);
        }
    }

    /// Read the editable fields back out of the DOM.
    fn read_form(&self) -> SettingsForm {
        SettingsForm {
            username: self.username_input.value(),
            status: self.status_input.value(),
            internal_server_port: self.port_input.value(),
            colors: std::array::from_fn(|i| self.color_inputs[i].value()),
        }
    }

    fn set_hint(&self, text: &str) {
        self.username_hint.set_text_content(Some(text));
    }

    /// Wire the save and connect buttons to the backend.
    pub fn wire_actions(self: &Rc<Self>, backend: Rc<dyn Backend>) -> Result<(), JsValue> {
        {
            let panel = Rc::clone(self);
            let backend = Rc::clone(&backend);
            let on_save = Closure::wrap(Box::new(move || {
                let form = panel.read_form();
                if let Some(update) = form.submit() {
                    panel.set_hint("");
                    backend.update_settings(update);
                } else {
                    panel.set_hint(&format!(
                        "username must be at most {USERNAME_MAX_CHARS} characters"
                    ));
                }
            }) as Box<dyn FnMut()>);
            self.save_button
                .add_event_listener_with_callback("click", on_save.as_ref().unchecked_ref())?;
            on_save.forget();
        }

        {
            let panel = Rc::clone(self);
            let on_connect = Closure::wrap(Box::new(move || {
                // forwarded untouched; the host decides what an address means
                backend.connect_to_peer(panel.peer_address_input.value());
            }) as Box<dyn FnMut()>);
            self.connect_button
                .add_event_listener_with_callback("click", on_connect.as_ref().unchecked_ref())?;
            on_connect.forget();
        }

        Ok(())
    }
}
