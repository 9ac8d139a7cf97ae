//! JSON persistence for presets

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::preset::models::VideoPreset;
use crate::utils::{Result, UploaderError};

/// Presets stored as one JSON array on disk
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all presets; a missing file means no presets yet
    pub async fn load_all(&self) -> Result<Vec<VideoPreset>> {
        if !self.path.exists() {
            debug!("No preset file at {:?}", self.path);
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&json)?)
    }

    pub async fn save_all(&self, presets: &[VideoPreset]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(presets)?;
        let mut file = fs::File::create(&self.path).await?;
        file.write_all(json.as_bytes()).await?;
        file.flush().await?;

        debug!("Saved {} presets to {:?}", presets.len(), self.path);
        Ok(())
    }

    pub async fn get(&self, name: &str) -> Result<VideoPreset> {
        self.load_all()
            .await?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| UploaderError::PresetNotFound(name.to_string()))
    }

    /// Insert a preset, replacing any existing preset with the same name
    pub async fn upsert(&self, preset: VideoPreset) -> Result<()> {
        if preset.name.trim().is_empty() {
            return Err(UploaderError::InvalidPreset(
                "preset name must not be empty".to_string(),
            ));
        }

        let mut presets = self.load_all().await?;
        match presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => {
                info!("Adding preset '{}'", preset.name);
                presets.push(preset);
            }
        }
        self.save_all(&presets).await
    }

    /// Remove a preset by name, returning whether it existed
    pub async fn remove(&self, name: &str) -> Result<bool> {
        let mut presets = self.load_all().await?;
        let before = presets.len();
        presets.retain(|p| p.name != name);

        if presets.len() == before {
            return Ok(false);
        }
        self.save_all(&presets).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let store = PresetStore::new(temp.path().join("presets.json"));
        assert!(store.load_all().await.unwrap().is_empty());
        assert!(matches!(
            store.get("any").await,
            Err(UploaderError::PresetNotFound(name)) if name == "any"
        ));
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_name() {
        let temp = tempfile::tempdir().unwrap();
        let store = PresetStore::new(temp.path().join("presets.json"));

        let mut preset = VideoPreset::new("daily");
        preset.title = "first".into();
        store.upsert(preset.clone()).await.unwrap();
        store.upsert(VideoPreset::new("weekly")).await.unwrap();

        preset.title = "second".into();
        store.upsert(preset).await.unwrap();

        let all = store.load_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "daily");
        assert_eq!(all[0].title, "second");
    }

    #[tokio::test]
    async fn test_upsert_rejects_empty_name() {
        let temp = tempfile::tempdir().unwrap();
        let store = PresetStore::new(temp.path().join("presets.json"));
        let err = store.upsert(VideoPreset::new("  ")).await.unwrap_err();
        assert!(matches!(err, UploaderError::InvalidPreset(_)));
    }

    #[tokio::test]
    async fn test_remove() {
        let temp = tempfile::tempdir().unwrap();
        let store = PresetStore::new(temp.path().join("presets.json"));
        store.upsert(VideoPreset::new("gone")).await.unwrap();

        assert!(store.remove("gone").await.unwrap());
        assert!(!store.remove("gone").await.unwrap());
        assert!(store.load_all().await.unwrap().is_empty());
    }
}
