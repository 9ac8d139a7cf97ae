//! `$(playlist)` substitution in descriptions

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::preset::VideoPreset;
use crate::tag_processing::traits::{TagProcessingError, TagProcessor};
use crate::youtube::PlaylistResolver;

pub const PLAYLIST_TAG: &str = "$(playlist)";

const NAME: &str = "Playlist TagProcessor";

#[derive(Debug, Clone, PartialEq, Eq)]
enum PlaylistState {
    Uninitialized,
    MarkerAbsent,
    MarkerFound { url: String },
}

/// Replaces `$(playlist)` in video descriptions with the URL of the
/// preset's selected playlist.
///
/// If the playlist cannot be resolved the marker is replaced with empty
/// text.
pub struct PlaylistTagProcessor {
    resolver: Arc<dyn PlaylistResolver>,
    state: PlaylistState,
}

impl PlaylistTagProcessor {
    pub fn new(resolver: Arc<dyn PlaylistResolver>) -> Self {
        Self {
            resolver,
            state: PlaylistState::Uninitialized,
        }
    }
}

impl TagProcessor for PlaylistTagProcessor {
    fn init(
        &mut self,
        preset: &VideoPreset,
        _initial_auto_num: u32,
    ) -> Result<(), TagProcessingError> {
        if self.state != PlaylistState::Uninitialized {
            return Err(TagProcessingError::AlreadyInitialized { processor: NAME });
        }

        if !preset.description.contains(PLAYLIST_TAG) {
            self.state = PlaylistState::MarkerAbsent;
            return Ok(());
        }

        let url = preset
            .selected_playlist
            .as_deref()
            .and_then(|id| self.resolver.resolve(id));

        let url = match url {
            Some(url) => url,
            None => {
                warn!(
                    "Preset '{}' uses {} but playlist {:?} could not be resolved",
                    preset.name, PLAYLIST_TAG, preset.selected_playlist
                );
                String::new()
            }
        };

        debug!("{} resolved playlist url {:?}", NAME, url);
        self.state = PlaylistState::MarkerFound { url };
        Ok(())
    }

    fn process_title(
        &mut self,
        current_title: &str,
        _video_file: &Path,
    ) -> Result<String, TagProcessingError> {
        match self.state {
            PlaylistState::Uninitialized => {
                Err(TagProcessingError::NotInitialized { processor: NAME })
            }
            _ => Ok(current_title.to_string()),
        }
    }

    fn process_description(
        &mut self,
        current_description: &str,
        _video_file: &Path,
    ) -> Result<String, TagProcessingError> {
        match &self.state {
            PlaylistState::Uninitialized => {
                Err(TagProcessingError::NotInitialized { processor: NAME })
            }
            PlaylistState::MarkerAbsent => Ok(current_description.to_string()),
            PlaylistState::MarkerFound { url } => {
                Ok(current_description.replace(PLAYLIST_TAG, url))
            }
        }
    }

    fn process_tags(
        &mut self,
        current_tags: Vec<String>,
        _video_file: &Path,
    ) -> Result<Vec<String>, TagProcessingError> {
        match self.state {
            PlaylistState::Uninitialized => {
                Err(TagProcessingError::NotInitialized { processor: NAME })
            }
            _ => Ok(current_tags),
        }
    }

    fn processor_name(&self) -> &'static str {
        NAME
    }
}
