//! Marker substitution for preset fields
//!
//! Presets may contain literal markers such as `$(playlist)`. Before upload,
//! each video's title, description and tags run through a [`TagPipeline`]
//! of [`TagProcessor`]s that replace those markers.

pub mod autonum;
pub mod filename;
pub mod pipeline;
pub mod playlist;
pub mod traits;

pub use autonum::{AutoNumTagProcessor, AUTONUM_TAG};
pub use filename::{FileNameTagProcessor, FILENAME_TAG};
pub use pipeline::{apply_preset, TagPipeline};
pub use playlist::{PlaylistTagProcessor, PLAYLIST_TAG};
pub use traits::{TagProcessingError, TagProcessor};
