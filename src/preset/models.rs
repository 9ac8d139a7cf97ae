//! Presets and the per-video upload fields derived from them

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::youtube::VisibilityStatus;

/// A named, reusable template applied to one or more videos
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoPreset {
    pub name: String,
    /// Title template, may contain markers such as `$(autonum)`
    pub title: String,
    /// Description template, may contain markers such as `$(playlist)`
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque playlist identifier
    #[serde(default)]
    pub selected_playlist: Option<String>,
    #[serde(default)]
    pub visibility: VisibilityStatus,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub made_for_kids: bool,
}

impl VideoPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True if `marker` appears in the title, description or any tag
    pub fn contains_marker(&self, marker: &str) -> bool {
        self.title.contains(marker)
            || self.description.contains(marker)
            || self.tags.iter().any(|tag| tag.contains(marker))
    }
}

/// Fields of a single pending upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoUpload {
    pub video_file: PathBuf,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub visibility: VisibilityStatus,
    pub selected_playlist: Option<String>,
    pub category: Option<String>,
    pub made_for_kids: bool,
}

impl VideoUpload {
    /// Seed an upload from the preset templates, before any tag processing
    pub fn from_preset(preset: &VideoPreset, video_file: &Path) -> Self {
        Self {
            video_file: video_file.to_path_buf(),
            title: preset.title.clone(),
            description: preset.description.clone(),
            tags: preset.tags.clone(),
            visibility: preset.visibility,
            selected_playlist: preset.selected_playlist.clone(),
            category: preset.category.clone(),
            made_for_kids: preset.made_for_kids,
        }
    }
}
