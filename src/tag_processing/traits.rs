use std::path::Path;
use thiserror::Error;

use crate::preset::VideoPreset;

/// Misuse of the [`TagProcessor`] lifecycle.
///
/// A missing marker or an unresolvable substitution is never an error; these
/// only signal calls made out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagProcessingError {
    #[error("{processor}: process called before init")]
    NotInitialized { processor: &'static str },

    #[error("{processor}: init called more than once")]
    AlreadyInitialized { processor: &'static str },

    #[error("{processor}: auto number would exceed {}", u32::MAX)]
    AutoNumOverflow { processor: &'static str },
}

/// Core trait for all tag processors
///
/// A tag processor owns one or more literal markers (for example
/// `$(playlist)`) and replaces them in a video's title, description and
/// tags. One instance serves one processing pass:
///
/// 1. [`init`](TagProcessor::init) is called exactly once with the preset
///    being applied. This is where the processor looks for its markers and
///    precomputes replacement values, so the process methods can return
///    early when nothing needs doing.
/// 2. The process methods are called per video in field order: title,
///    description, tags. Their input may already differ from the preset,
///    because processors earlier in the chain have run.
pub trait TagProcessor: Send {
    /// Prepares the processor for one pass; must run exactly once, before any process call
    fn init(&mut self, preset: &VideoPreset, initial_auto_num: u32)
        -> Result<(), TagProcessingError>;

    /// Returns `current_title` with this processor's markers replaced
    fn process_title(
        &mut self,
        current_title: &str,
        video_file: &Path,
    ) -> Result<String, TagProcessingError>;

    /// Returns `current_description` with this processor's markers replaced
    fn process_description(
        &mut self,
        current_description: &str,
        video_file: &Path,
    ) -> Result<String, TagProcessingError>;

    /// Returns `current_tags` with this processor's markers replaced in each tag
    fn process_tags(
        &mut self,
        current_tags: Vec<String>,
        video_file: &Path,
    ) -> Result<Vec<String>, TagProcessingError>;

    /// Stable, human readable name used for listings and logs
    fn processor_name(&self) -> &'static str;
}

/// Replace `marker` inside every tag, keeping order and length
pub(crate) fn replace_in_tags(tags: Vec<String>, marker: &str, value: &str) -> Vec<String> {
    tags.into_iter()
        .map(|tag| {
            if tag.contains(marker) {
                tag.replace(marker, value)
            } else {
                tag
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_in_tags_keeps_order() {
        let tags = vec!["a".to_string(), "$(m)-b".to_string(), "$(m)$(m)".to_string()];
        assert_eq!(
            replace_in_tags(tags, "$(m)", "x"),
            vec!["a".to_string(), "x-b".to_string(), "xx".to_string()]
        );
    }

    #[test]
    fn test_error_messages_name_processor() {
        let err = TagProcessingError::NotInitialized {
            processor: "Playlist TagProcessor",
        };
        assert_eq!(err.to_string(), "Playlist TagProcessor: process called before init");
    }
}
