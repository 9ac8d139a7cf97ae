//! `$(filename)` substitution

use std::path::Path;

use crate::preset::VideoPreset;
use crate::tag_processing::traits::{replace_in_tags, TagProcessingError, TagProcessor};

pub const FILENAME_TAG: &str = "$(filename)";

const NAME: &str = "FileName TagProcessor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileNameState {
    Uninitialized,
    MarkerAbsent,
    MarkerFound,
}

/// Replaces `$(filename)` with the video file's name minus its extension
pub struct FileNameTagProcessor {
    state: FileNameState,
}

impl Default for FileNameTagProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileNameTagProcessor {
    pub fn new() -> Self {
        Self {
            state: FileNameState::Uninitialized,
        }
    }

    fn check_initialized(&self) -> Result<bool, TagProcessingError> {
        match self.state {
            FileNameState::Uninitialized => {
                Err(TagProcessingError::NotInitialized { processor: NAME })
            }
            FileNameState::MarkerAbsent => Ok(false),
            FileNameState::MarkerFound => Ok(true),
        }
    }

    fn replace_text(&self, text: &str, video_file: &Path) -> Result<String, TagProcessingError> {
        if self.check_initialized()? && text.contains(FILENAME_TAG) {
            Ok(text.replace(FILENAME_TAG, &file_stem(video_file)))
        } else {
            Ok(text.to_string())
        }
    }
}

fn file_stem(video_file: &Path) -> String {
    video_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl TagProcessor for FileNameTagProcessor {
    fn init(
        &mut self,
        preset: &VideoPreset,
        _initial_auto_num: u32,
    ) -> Result<(), TagProcessingError> {
        if self.state != FileNameState::Uninitialized {
            return Err(TagProcessingError::AlreadyInitialized { processor: NAME });
        }

        self.state = if preset.contains_marker(FILENAME_TAG) {
            FileNameState::MarkerFound
        } else {
            FileNameState::MarkerAbsent
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
        if self.check_initialized()? {
            Ok(replace_in_tags(current_tags, FILENAME_TAG, &file_stem(video_file)))
        } else {
            Ok(current_tags)
        }
    }

    fn processor_name(&self) -> &'static str {
        NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized() -> FileNameTagProcessor {
        let mut processor = FileNameTagProcessor::new();
        let preset = VideoPreset {
            title: "$(filename)".into(),
            ..Default::default()
        };
        processor.init(&preset, 1).unwrap();
        processor
    }

    #[test]
    fn test_stem_replaces_marker() {
        let mut processor = initialized();
        assert_eq!(
            processor
                .process_title("$(filename) [HD]", Path::new("/videos/clip one.mp4"))
                .unwrap(),
            "clip one [HD]"
        );
    }

    #[test]
    fn test_tags_and_description() {
        let mut processor = initialized();
        let file = Path::new("/videos/boss.fight.mkv");
        assert_eq!(
            processor.process_description("From $(filename)", file).unwrap(),
            "From boss.fight"
        );
        assert_eq!(
            processor
                .process_tags(vec!["$(filename)".into(), "game".into()], file)
                .unwrap(),
            vec!["boss.fight".to_string(), "game".to_string()]
        );
    }

    #[test]
    fn test_path_without_stem_substitutes_empty() {
        let mut processor = initialized();
        assert_eq!(processor.process_title("[$(filename)]", Path::new("/")).unwrap(), "[]");
    }

    #[test]
    fn test_marker_absent_passes_through() {
        let mut processor = FileNameTagProcessor::new();
        processor.init(&VideoPreset::default(), 1).unwrap();
        assert_eq!(
            processor.process_title("$(filename)", Path::new("/v/a.mp4")).unwrap(),
            "$(filename)"
        );
    }

    #[test]
    fn test_process_before_init_fails() {
        let mut processor = FileNameTagProcessor::new();
        assert!(matches!(
            processor.process_description("x", Path::new("/v/a.mp4")),
            Err(TagProcessingError::NotInitialized { .. })
        ));
    }
}
