//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::utils::paths;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Locale code of the selected UI language
    pub language: String,

    /// Check for a newer release on startup
    pub check_for_updates: bool,

    /// Install updates without asking (only honoured when update checks are on)
    pub silent_updates: bool,

    /// Auto number used when a preset is applied without an explicit seed
    pub default_auto_num: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: "en_US".to_string(),
            check_for_updates: true,
            silent_updates: false,
            default_auto_num: 1,
        }
    }
}

impl AppSettings {
    /// Load settings from a JSON file, falling back to defaults when it does not exist yet
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)
            .await
            .context("Failed to read settings file")?;

        serde_json::from_str(&json).context("Failed to deserialize settings")
    }

    /// Save settings as pretty JSON
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        let mut file = fs::File::create(path)
            .await
            .context("Failed to create settings file")?;
        file.write_all(json.as_bytes())
            .await
            .context("Failed to write settings")?;
        file.flush().await?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Silent updates only apply while update checks are enabled
    pub fn effective_silent_updates(&self) -> bool {
        self.check_for_updates && self.silent_updates
    }
}

/// Delete stored credentials and cached playlists under `data_dir`.
///
/// Presets and settings are kept. Returns `true` if anything was removed.
pub async fn clear_stored_data(data_dir: &Path) -> Result<bool> {
    let mut removed = false;

    let auth_dir = paths::auth_dir(data_dir);
    if auth_dir.exists() {
        fs::remove_dir_all(&auth_dir)
            .await
            .context("Failed to delete stored credentials")?;
        removed = true;
    }

    let playlists = paths::playlists_path(data_dir);
    if playlists.exists() {
        fs::remove_file(&playlists)
            .await
            .context("Failed to delete playlist cache")?;
        removed = true;
    }

    info!("Cleared stored data in {:?} (removed anything: {})", data_dir, removed);
    Ok(removed)
}
