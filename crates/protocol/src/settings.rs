use serde::{Deserialize, Deserializer, Serialize};

/// Hard cap the panel and the host both enforce on usernames.
pub const USERNAME_MAX_CHARS: usize = 16;

pub fn username_within_limit(username: &str) -> bool {
    username.chars().count() <= USERNAME_MAX_CHARS
}

/// The persisted settings payload, as stored in `settings.json` and pushed
/// to the UI over the bridge.
///
/// Every field is optional on the wire; absent keys deserialize to empty
/// strings so a sparse document still loads with blank fields instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsDocument {
    pub avatar: String,
    pub username: String,
    pub status: String,
    #[serde(deserialize_with = "port_as_string")]
    pub internal_server_port: String,
    pub color_scheme: ColorScheme,
}

/// The 11-slot color theme. Slot numbers are meaningful: slot N feeds the
/// Nth theme variable (see [`crate::theme::THEME_VARIABLES`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ColorScheme {
    pub color1: String,
    pub color2: String,
    pub color3: String,
    pub color4: String,
    pub color5: String,
    pub color6: String,
    pub color7: String,
    pub color8: String,
    pub color9: String,
    pub color10: String,
    pub color11: String,
}

impl ColorScheme {
    /// Slot values in slot order, color1 first.
    pub fn values(&self) -> [&str; 11] {
        [
            &self.color1,
            &self.color2,
            &self.color3,
            &self.color4,
            &self.color5,
            &self.color6,
            &self.color7,
            &self.color8,
            &self.color9,
            &self.color10,
            &self.color11,
        ]
    }

    pub fn from_values(values: [String; 11]) -> Self {
        let [color1, color2, color3, color4, color5, color6, color7, color8, color9, color10, color11] =
            values;
        Self {
            color1,
            color2,
            color3,
            color4,
            color5,
            color6,
            color7,
            color8,
            color9,
            color10,
            color11,
        }
    }
}

impl SettingsDocument {
    /// The document written on first run: blank identity, dark palette.
    pub fn initial() -> Self {
        Self {
            avatar: String::new(),
            username: String::new(),
            status: String::new(),
            internal_server_port: "42800".to_string(),
            color_scheme: ColorScheme {
                color1: "#22252b".to_string(),
                color2: "#1b1e24".to_string(),
                color3: "#16181d".to_string(),
                color4: "#e8e6e3".to_string(),
                color5: "#9aa0a6".to_string(),
                color6: "#c5c8ce".to_string(),
                color7: "#3a3f4b".to_string(),
                color8: "#2c313c".to_string(),
                color9: "#8b95a1".to_string(),
                color10: "#2a2e36".to_string(),
                color11: "#4f9d69".to_string(),
            },
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// Older documents stored the port as a bare number; accept both shapes.
fn port_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u64),
        Text(String),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Number(n) => n.to_string(),
        Port::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        let colors: Vec<String> = (1..=11)
            .map(|n| format!("\"color{n}\":\"#{n:03x}\""))
            .collect();
        format!(
            "{{\"avatar\":\"a.png\",\"username\":\"Bob\",\"status\":\"ok\",\
             \"internalServerPort\":\"8080\",\"colorScheme\":{{{}}}}}",
            colors.join(",")
        )
    }

    #[test]
    fn parses_full_document() {
        let doc = SettingsDocument::from_json(&sample_json()).unwrap();
        assert_eq!(doc.avatar, "a.png");
        assert_eq!(doc.username, "Bob");
        assert_eq!(doc.status, "ok");
        assert_eq!(doc.internal_server_port, "8080");
        assert_eq!(doc.color_scheme.color1, "#001");
        assert_eq!(doc.color_scheme.color11, "#00b");
    }

    #[test]
    fn missing_keys_become_blank_fields() {
        let doc = SettingsDocument::from_json("{\"username\":\"Bob\"}").unwrap();
        assert_eq!(doc.username, "Bob");
        assert_eq!(doc.avatar, "");
        assert_eq!(doc.status, "");
        assert_eq!(doc.internal_server_port, "");
        assert_eq!(doc.color_scheme, ColorScheme::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SettingsDocument::from_json("{\"username\":").is_err());
    }

    #[test]
    fn numeric_port_accepted() {
        let doc = SettingsDocument::from_json("{\"internalServerPort\":8080}").unwrap();
        assert_eq!(doc.internal_server_port, "8080");
    }

    #[test]
    fn round_trips_through_json() {
        let doc = SettingsDocument::from_json(&sample_json()).unwrap();
        let again = SettingsDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn username_limit_boundary() {
        assert!(username_within_limit(&"a".repeat(16)));
        assert!(!username_within_limit(&"a".repeat(17)));
        // counted in characters, not bytes
        assert!(username_within_limit(&"ü".repeat(16)));
    }

    #[test]
    fn scheme_values_follow_slot_order() {
        let scheme = ColorScheme::from_values(std::array::from_fn(|i| format!("#{i}")));
        let values = scheme.values();
        assert_eq!(values[0], "#0");
        assert_eq!(values[10], "#10");
        assert_eq!(scheme.color1, "#0");
        assert_eq!(scheme.color11, "#10");
    }
}
