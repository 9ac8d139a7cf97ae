//! `$(autonum)` substitution

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::preset::VideoPreset;
use crate::tag_processing::traits::{replace_in_tags, TagProcessingError, TagProcessor};

pub const AUTONUM_TAG: &str = "$(autonum)";

const NAME: &str = "AutoNum TagProcessor";

#[derive(Debug)]
enum AutoNumState {
    Uninitialized,
    MarkerAbsent,
    Numbering {
        /// `None` once `u32::MAX` has been handed out
        next: Option<u32>,
        assigned: HashMap<PathBuf, u32>,
    },
}

/// Replaces `$(autonum)` in titles, descriptions and tags with a running
/// number.
///
/// Numbers start at the seed passed to `init` and are handed out per video
/// file in the order files are first seen, so every field of one video
/// shares the same number.
pub struct AutoNumTagProcessor {
    state: AutoNumState,
}

impl Default for AutoNumTagProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoNumTagProcessor {
    pub fn new() -> Self {
        Self {
            state: AutoNumState::Uninitialized,
        }
    }

    /// Number for `video_file`, or `None` when there is nothing to replace
    fn number_for(&mut self, video_file: &Path) -> Result<Option<u32>, TagProcessingError> {
        match &mut self.state {
            AutoNumState::Uninitialized => {
                Err(TagProcessingError::NotInitialized { processor: NAME })
            }
            AutoNumState::MarkerAbsent => Ok(None),
            AutoNumState::Numbering { next, assigned } => {
                if let Some(number) = assigned.get(video_file) {
                    return Ok(Some(*number));
                }
                let number = next.ok_or(TagProcessingError::AutoNumOverflow { processor: NAME })?;
                *next = number.checked_add(1);
                assigned.insert(video_file.to_path_buf(), number);
                debug!("{} assigned {} to {:?}", NAME, number, video_file);
                Ok(Some(number))
            }
        }
    }

    fn replace_text(
        &mut self,
        text: &str,
        video_file: &Path,
    ) -> Result<String, TagProcessingError> {
        match self.number_for(video_file)? {
            Some(number) if text.contains(AUTONUM_TAG) => {
                Ok(text.replace(AUTONUM_TAG, &number.to_string()))
            }
            _ => Ok(text.to_string()),
        }
    }
}

impl TagProcessor for AutoNumTagProcessor {
    fn init(
        &mut self,
        preset: &VideoPreset,
        initial_auto_num: u32,
    ) -> Result<(), TagProcessingError> {
        if !matches!(self.state, AutoNumState::Uninitialized) {
            return Err(TagProcessingError::AlreadyInitialized { processor: NAME });
        }

        self.state = if preset.contains_marker(AUTONUM_TAG) {
            AutoNumState::Numbering {
                next: Some(initial_auto_num),
                assigned: HashMap::new(),
            }
        } else {
            AutoNumState::MarkerAbsent
        };
        Ok(())
    }

    fn process_title(
        &mut self,
        current_title: &str,
        video_file: &Path,
    ) -> Result<String, TagProcessingError> {
        self.replace_text(current_title, video_file)
    }

    fn process_description(
        &mut self,
        current_description: &str,
        video_file: &Path,
    ) -> Result<String, TagProcessingError> {
        self.replace_text(current_description, video_file)
    }

    fn process_tags(
        &mut self,
        current_tags: Vec<String>,
        video_file: &Path,
    ) -> Result<Vec<String>, TagProcessingError> {
        match self.number_for(video_file)? {
            Some(number) => Ok(replace_in_tags(current_tags, AUTONUM_TAG, &number.to_string())),
            None => Ok(current_tags),
        }
    }

    fn processor_name(&self) -> &'static str {
        NAME
    }
}
