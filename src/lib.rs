//! Rustuploader library

pub mod preset;
pub mod tag_processing;
pub mod utils;
pub mod youtube;

// Re-export main types for easier use
pub use preset::{PresetStore, VideoPreset, VideoUpload};
pub use tag_processing::{TagPipeline, TagProcessingError, TagProcessor};
pub use utils::{AppSettings, UploaderError};
pub use youtube::{Playlist, PlaylistCache, PlaylistResolver, VisibilityStatus};
