//! Utility modules for error handling, configuration and data paths

pub mod config;
pub mod error;
pub mod paths;

// Re-export for convenience
pub use config::{clear_stored_data, AppSettings};
pub use error::{Result, UploaderError};
pub use paths::get_data_dir;
