//! Application data path resolution
//!
//! All persisted state lives under one per-user data directory so the tool
//! behaves the same regardless of the working directory it is launched from:
//!
//! - Linux: `$XDG_DATA_HOME/Rustuploader/` (usually `~/.local/share/Rustuploader/`)
//! - macOS: `~/Library/Application Support/Rustuploader/`
//! - Windows: `%APPDATA%\Rustuploader\`

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR_NAME: &str = "Rustuploader";

/// Get the application data directory, creating it if needed.
pub fn get_data_dir() -> PathBuf {
    let dir = dirs::data_dir()
        .map(|base| base.join(APP_DIR_NAME))
        .or_else(|| dirs::home_dir().map(|home| home.join(".rustuploader")))
        .unwrap_or_else(|| {
            warn!("Could not determine a data directory, using the temp dir");
            std::env::temp_dir().join(APP_DIR_NAME)
        });

    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("Failed to create data directory {:?}: {}", dir, e);
    }

    debug!("Data directory: {:?}", dir);
    dir
}

/// Directory holding the stored OAuth credentials.
pub fn auth_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("auth")
}

/// Path of the persisted [`AppSettings`](crate::utils::AppSettings).
pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

/// Path of the persisted preset list.
pub fn presets_path(data_dir: &Path) -> PathBuf {
    data_dir.join("presets.json")
}

/// Path of the cached playlist list.
pub fn playlists_path(data_dir: &Path) -> PathBuf {
    data_dir.join("playlists.json")
}
