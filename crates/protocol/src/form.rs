use crate::messages::SettingsUpdate;
use crate::settings::{username_within_limit, ColorScheme, SettingsDocument};

/// Editable state of the settings panel, mirrored from the DOM.
///
/// The wasm panel copies its input values into this struct before deciding
/// anything and writes it back out after a document load. Keeping the rules
/// here means they run (and test) without a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub username: String,
    pub status: String,
    pub internal_server_port: String,
    /// Color picker values in slot order; index 0 is slot 1.
    pub colors: [String; 11],
}

impl SettingsForm {
    /// Mirrors a loaded document into the editable fields.
    pub fn apply_document(&mut self, doc: &SettingsDocument) {
        self.username = doc.username.clone();
        self.status = doc.status.clone();
        self.internal_server_port = doc.internal_server_port.clone();
        self.colors = doc.color_scheme.values().map(str::to_string);
    }

    /// Identity fields in the order they appear in the panel.
    pub fn misc_values(&self) -> [&str; 3] {
        [&self.username, &self.status, &self.internal_server_port]
    }

    pub fn submit_allowed(&self) -> bool {
        username_within_limit(&self.username)
    }

    /// Builds the outbound update, or `None` when the username is over the
    /// limit and nothing may be sent.
    pub fn submit(&self) -> Option<SettingsUpdate> {
        if !self.submit_allowed() {
            return None;
        }
        Some(SettingsUpdate {
            username: self.username.clone(),
            status: self.status.clone(),
            internal_server_port: self.internal_server_port.clone(),
            color_scheme: ColorScheme::from_values(self.colors.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> SettingsDocument {
        SettingsDocument {
            avatar: "a.png".to_string(),
            username: "Bob".to_string(),
            status: "ok".to_string(),
            internal_server_port: "8080".to_string(),
            color_scheme: ColorScheme::from_values(std::array::from_fn(|i| {
                format!("#c{}", i + 1)
            })),
        }
    }

    #[test]
    fn load_mirrors_every_editable_field() {
        let doc = sample_document();
        let mut form = SettingsForm::default();
        form.apply_document(&doc);

        assert_eq!(form.username, "Bob");
        assert_eq!(form.status, "ok");
        assert_eq!(form.internal_server_port, "8080");
        for (i, color) in form.colors.iter().enumerate() {
            assert_eq!(color, &format!("#c{}", i + 1));
        }
    }

    #[test]
    fn load_is_idempotent() {
        let doc = sample_document();
        let mut once = SettingsForm::default();
        once.apply_document(&doc);

        let mut twice = SettingsForm::default();
        twice.apply_document(&doc);
        twice.apply_document(&doc);

        assert_eq!(once, twice);
    }

    #[test]
    fn submit_boundary_at_sixteen_characters() {
        let mut form = SettingsForm {
            username: "a".repeat(16),
            ..SettingsForm::default()
        };
        assert!(form.submit().is_some());

        form.username = "a".repeat(17);
        assert!(form.submit().is_none());
    }

    #[test]
    fn submit_collects_colors_in_slot_order() {
        let mut form = SettingsForm::default();
        form.colors = std::array::from_fn(|i| format!("#{:02x}", i * 11));

        let update = form.submit().expect("blank username submits");
        assert_eq!(update.color_scheme.values(), form.colors.each_ref().map(String::as_str));
        assert_eq!(update.color_scheme.color1, form.colors[0]);
        assert_eq!(update.color_scheme.color11, form.colors[10]);
    }

    #[test]
    fn submit_keeps_misc_field_order() {
        let mut form = SettingsForm::default();
        form.apply_document(&sample_document());
        assert_eq!(form.misc_values(), ["Bob", "ok", "8080"]);

        let update = form.submit().unwrap();
        assert_eq!(update.misc_values(), form.misc_values());
    }

    #[test]
    fn update_carries_no_avatar() {
        // SettingsUpdate has no avatar field by construction; applying it
        // must leave the stored avatar alone, which the host store tests
        // cover. Here we only pin the serialized shape.
        let mut form = SettingsForm::default();
        form.apply_document(&sample_document());
        let json = serde_json::to_string(&form.submit().unwrap()).unwrap();
        assert!(!json.contains("avatar"));
    }
}
