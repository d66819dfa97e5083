use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::{username_within_limit, ColorScheme, SettingsDocument, USERNAME_MAX_CHARS};

/// Edited panel fields sent back to the host.
///
/// The avatar is not editable from the panel and never travels in this
/// direction; the host keeps its stored value when applying an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub username: String,
    pub status: String,
    pub internal_server_port: String,
    pub color_scheme: ColorScheme,
}

impl SettingsUpdate {
    /// Identity fields in the order they appear in the panel.
    pub fn misc_values(&self) -> [&str; 3] {
        [&self.username, &self.status, &self.internal_server_port]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("username exceeds {USERNAME_MAX_CHARS} characters")]
    UsernameTooLong,
}

/// Host-side acceptance gate. The panel refuses to send oversized
/// usernames, but the host does not trust the panel.
pub fn validate_update(update: &SettingsUpdate) -> Result<(), UpdateError> {
    if !username_within_limit(&update.username) {
        return Err(UpdateError::UsernameTooLong);
    }
    Ok(())
}

/// Messages pushed from the host to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum HostMessage {
    /// Full document push: sent on connect and after every accepted update.
    LoadSettings(SettingsDocument),
}

/// Messages sent by the browser to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum UiMessage {
    UpdateSettings(SettingsUpdate),
    ConnectToPeer { address: String },
}

impl HostMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl UiMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_update() -> SettingsUpdate {
        SettingsUpdate {
            username: "Bob".to_string(),
            status: "ok".to_string(),
            internal_server_port: "8080".to_string(),
            color_scheme: ColorScheme::from_values(std::array::from_fn(|i| format!("#{i}"))),
        }
    }

    #[test]
    fn ui_messages_are_tagged_with_legacy_call_names() {
        let json = UiMessage::ConnectToPeer {
            address: "10.0.0.7".to_string(),
        }
        .to_json()
        .unwrap();
        assert_eq!(
            json,
            "{\"type\":\"connectToPeer\",\"data\":{\"address\":\"10.0.0.7\"}}"
        );

        let json = UiMessage::UpdateSettings(sample_update()).to_json().unwrap();
        assert!(json.starts_with("{\"type\":\"updateSettings\""));
        assert!(json.contains("\"internalServerPort\":\"8080\""));
    }

    #[test]
    fn load_settings_round_trips() {
        let msg = HostMessage::LoadSettings(SettingsDocument::initial());
        let json = msg.to_json().unwrap();
        assert!(json.starts_with("{\"type\":\"loadSettings\""));
        assert_eq!(HostMessage::from_json(&json).unwrap(), msg);
    }

    #[test]
    fn update_round_trips() {
        let msg = UiMessage::UpdateSettings(sample_update());
        assert_eq!(UiMessage::from_json(&msg.to_json().unwrap()).unwrap(), msg);
    }

    #[test]
    fn misc_values_keep_panel_order() {
        let update = sample_update();
        assert_eq!(update.misc_values(), ["Bob", "ok", "8080"]);
    }

    #[test]
    fn validation_boundary() {
        let mut update = sample_update();
        update.username = "a".repeat(16);
        assert_eq!(validate_update(&update), Ok(()));
        update.username = "a".repeat(17);
        assert_eq!(validate_update(&update), Err(UpdateError::UsernameTooLong));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(UiMessage::from_json("{\"type\":\"shutdown\",\"data\":{}}").is_err());
    }
}
