//! Settings persistence
//!
//! Stores the settings document as JSON in ~/.config/peerchat-web/settings.json

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;

use peerchat_web_protocol::{validate_update, SettingsDocument, SettingsUpdate, UpdateError};

/// Settings storage backed by a single JSON document on disk
pub struct SettingsStore {
    path: PathBuf,
    document: SettingsDocument,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The update failed validation and was not applied.
    #[error(transparent)]
    Rejected(#[from] UpdateError),
    #[error(transparent)]
    Persist(#[from] anyhow::Error),
}

impl SettingsStore {
    /// Open the store, creating a default document on first run.
    ///
    /// An unreadable or malformed settings file is an error: silently
    /// replacing it would throw away the user's theme and identity.
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let document = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            SettingsDocument::from_json(&raw)
                .with_context(|| format!("Malformed settings file {}", path.display()))?
        } else {
            let document = SettingsDocument::initial();
            write_atomic(&path, &document)?;
            info!(path = %path.display(), "created default settings file");
            document
        };

        Ok(Self { path, document })
    }

    /// Get default store path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("peerchat-web").join("settings.json"))
    }

    pub fn document(&self) -> &SettingsDocument {
        &self.document
    }

    /// Apply an update from the panel and persist it.
    ///
    /// Re-validates even though the panel already gates the submit; the
    /// stored avatar is kept since the panel cannot edit it. The in-memory
    /// document is replaced only once the new one is on disk, so
    /// [`Self::document`] never reports values that were not saved.
    pub fn apply_update(&mut self, update: &SettingsUpdate) -> Result<&SettingsDocument, StoreError> {
        validate_update(update)?;

        let mut document = self.document.clone();
        document.username = update.username.clone();
        document.status = update.status.clone();
        document.internal_server_port = update.internal_server_port.clone();
        document.color_scheme = update.color_scheme.clone();

        write_atomic(&self.path, &document)?;
        self.document = document;
        Ok(&self.document)
    }
}

/// Write via a temp file in the same directory, then rename over the
/// target, so a crash mid-write never leaves a torn settings file.
fn write_atomic(path: &Path, document: &SettingsDocument) -> Result<()> {
    let json = document.to_json().context("Failed to serialize settings")?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use peerchat_web_protocol::ColorScheme;

    fn sample_update() -> SettingsUpdate {
        SettingsUpdate {
            username: "Bob".to_string(),
            status: "around".to_string(),
            internal_server_port: "43000".to_string(),
            color_scheme: ColorScheme::from_values(std::array::from_fn(|i| format!("#{i:02x}"))),
        }
    }

    #[test]
    fn first_open_writes_default_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::open(path.clone()).unwrap();
        assert_eq!(store.document(), &SettingsDocument::initial());
        assert!(path.exists());

        // A second open reads the same document back.
        let again = SettingsStore::open(path).unwrap();
        assert_eq!(again.document(), store.document());
    }

    #[test]
    fn apply_update_persists_and_keeps_avatar() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = SettingsStore::open(path.clone()).unwrap();
        store.document.avatar = "me.png".to_string();

        let update = sample_update();
        let doc = store.apply_update(&update).unwrap();
        assert_eq!(doc.username, "Bob");
        assert_eq!(doc.avatar, "me.png");

        let reopened = SettingsStore::open(path).unwrap();
        assert_eq!(reopened.document().username, "Bob");
        assert_eq!(reopened.document().status, "around");
        assert_eq!(reopened.document().avatar, "me.png");
        assert_eq!(reopened.document().color_scheme, update.color_scheme);
    }

    #[test]
    fn oversized_username_rejected_without_touching_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = SettingsStore::open(path.clone()).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let mut update = sample_update();
        update.username = "q".repeat(17);
        let err = store.apply_update(&update).unwrap_err();
        assert!(matches!(err, StoreError::Rejected(UpdateError::UsernameTooLong)));

        assert_eq!(store.document(), &SettingsDocument::initial());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn failed_save_keeps_the_stored_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = SettingsStore::open(path.clone()).unwrap();

        // Occupy the temp path with a directory so the write cannot land.
        std::fs::create_dir(dir.path().join("settings.json.tmp")).unwrap();

        let err = store.apply_update(&sample_update()).unwrap_err();
        assert!(matches!(err, StoreError::Persist(_)));

        // Memory still matches what is on disk.
        assert_eq!(store.document(), &SettingsDocument::initial());
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(SettingsDocument::from_json(&raw).unwrap(), *store.document());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(SettingsStore::open(path).is_err());
    }
}
