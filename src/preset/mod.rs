pub mod models;
pub mod store;

pub use models::{VideoPreset, VideoUpload};
pub use store::PresetStore;
