//! Data structures shared with the YouTube Data API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::UploaderError;

/// Video visibility as understood by the YouTube API.
///
/// Each variant carries the exact string the API expects in
/// `status.privacyStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityStatus {
    Public,
    #[default]
    Private,
    Unlisted,
}

impl VisibilityStatus {
    pub const ALL: [VisibilityStatus; 3] = [
        VisibilityStatus::Public,
        VisibilityStatus::Private,
        VisibilityStatus::Unlisted,
    ];

    /// Wire string sent to the API
    pub fn as_str(&self) -> &'static str {
        match self {
            VisibilityStatus::Public => "public",
            VisibilityStatus::Private => "private",
            VisibilityStatus::Unlisted => "unlisted",
        }
    }
}

impl fmt::Display for VisibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisibilityStatus {
    type Err = UploaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UploaderError::UnknownVisibility(s.to_string()))
    }
}

/// A playlist owned by the authenticated channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub privacy: Option<VisibilityStatus>,
}

impl Playlist {
    /// Public URL of the playlist
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/playlist?list={}", self.id)
    }
}
