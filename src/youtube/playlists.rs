//! Playlist lookup and refresh
//!
//! Tag processors only ever see [`PlaylistResolver`], a synchronous lookup that
//! must not touch the network. [`PlaylistCache`] implements it from memory and
//! is refreshed out-of-band from a [`PlaylistSource`], normally
//! [`YoutubePlaylistSource`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::utils::{paths, Result, UploaderError};
use crate::youtube::credentials;
use crate::youtube::models::{Playlist, VisibilityStatus};

/// Resolves a playlist identifier to its public URL
pub trait PlaylistResolver: Send + Sync {
    /// Returns `None` when the playlist is unknown
    fn resolve(&self, playlist_id: &str) -> Option<String>;
}

/// Anything that can list the channel's playlists
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn fetch_playlists(&self) -> Result<Vec<Playlist>>;
}

/// In-memory playlist cache, persisted as JSON between runs
#[derive(Debug, Default)]
pub struct PlaylistCache {
    playlists: RwLock<HashMap<String, Playlist>>,
    refreshed_at: RwLock<Option<DateTime<Utc>>>,
}

/// On-disk layout of the cache
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    refreshed_at: Option<DateTime<Utc>>,
    playlists: Vec<Playlist>,
}

impl PlaylistCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_playlists(playlists: Vec<Playlist>) -> Self {
        let cache = Self::new();
        cache.replace_all(playlists);
        cache
    }

    /// Replace the cached playlists wholesale
    pub fn replace_all(&self, playlists: Vec<Playlist>) {
        let map = playlists.into_iter().map(|p| (p.id.clone(), p)).collect();
        *self.playlists.write().unwrap_or_else(|e| e.into_inner()) = map;
    }

    /// All cached playlists, sorted by title
    pub fn playlists(&self) -> Vec<Playlist> {
        let guard = self.playlists.read().unwrap_or_else(|e| e.into_inner());
        let mut list: Vec<Playlist> = guard.values().cloned().collect();
        list.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        list
    }

    /// When the cache was last refreshed from a [`PlaylistSource`]
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        *self.refreshed_at.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.playlists.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load a cache from disk. A missing file yields an empty cache.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No playlist cache at {:?}", path);
            return Ok(Self::new());
        }

        let json = fs::read_to_string(path).await?;
        let file: CacheFile = serde_json::from_str(&json)?;
        debug!("Loaded {} cached playlists", file.playlists.len());

        let cache = Self::from_playlists(file.playlists);
        *cache.refreshed_at.write().unwrap_or_else(|e| e.into_inner()) = file.refreshed_at;
        Ok(cache)
    }

    /// Write the cache to disk as pretty JSON
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&CacheFile {
            refreshed_at: self.refreshed_at(),
            playlists: self.playlists(),
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(json.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Replace the cache contents with whatever `source` returns.
    ///
    /// On error the previous contents are kept.
    pub async fn refresh(&self, source: &dyn PlaylistSource) -> Result<usize> {
        let playlists = source.fetch_playlists().await?;
        let count = playlists.len();
        self.replace_all(playlists);
        *self.refreshed_at.write().unwrap_or_else(|e| e.into_inner()) = Some(Utc::now());
        info!("Playlist cache refreshed with {} playlists", count);
        Ok(count)
    }
}

impl PlaylistResolver for PlaylistCache {
    fn resolve(&self, playlist_id: &str) -> Option<String> {
        self.playlists
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(playlist_id)
            .map(Playlist::url)
    }
}

/// Refresh the playlist cache stored under `data_dir` from `source`.
///
/// When the access token is rejected the stored credential is discarded so
/// the next attempt re-authenticates; the cache file is left untouched.
pub async fn refresh_cached_playlists(
    data_dir: &Path,
    source: &dyn PlaylistSource,
) -> Result<PlaylistCache> {
    let path = paths::playlists_path(data_dir);
    let cache = PlaylistCache::load(&path).await?;

    match cache.refresh(source).await {
        Ok(count) => {
            cache.save(&path).await?;
            info!("Cached {} playlists in {:?}", count, path);
            Ok(cache)
        }
        Err(UploaderError::TokenExpired) => {
            warn!("Access token was rejected; discarding stored credential");
            credentials::invalidate_stored_credential(&paths::auth_dir(data_dir)).await?;
            Err(UploaderError::TokenExpired)
        }
        Err(e) => Err(e),
    }
}

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Lists the authenticated channel's playlists through the YouTube Data API
pub struct YoutubePlaylistSource {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl YoutubePlaylistSource {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, YOUTUBE_API_BASE)
    }

    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_page(&self, page_token: Option<&str>) -> Result<PlaylistListResponse> {
        let mut query = vec![
            ("part", "snippet,status"),
            ("mine", "true"),
            ("maxResults", "50"),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .client
            .get(format!("{}/playlists", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(UploaderError::TokenExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(UploaderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PlaylistSource for YoutubePlaylistSource {
    async fn fetch_playlists(&self) -> Result<Vec<Playlist>> {
        let mut playlists = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            playlists.extend(page.items.into_iter().map(Playlist::from));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Fetched {} playlists", playlists.len());
        Ok(playlists)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistListResponse {
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    id: String,
    snippet: PlaylistSnippet,
    #[serde(default)]
    status: Option<PlaylistStatus>,
}

#[derive(Debug, Deserialize)]
struct PlaylistSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistStatus {
    privacy_status: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl From<PlaylistItem> for Playlist {
    fn from(item: PlaylistItem) -> Self {
        let privacy = item.status.and_then(|s| match s.privacy_status.parse::<VisibilityStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                warn!("Playlist {} has {}", item.id, e);
                None
            }
        });

        Playlist {
            id: item.id,
            title: item.snippet.title,
            privacy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(id: &str, title: &str) -> Playlist {
        Playlist {
            id: id.to_string(),
            title: title.to_string(),
            privacy: Some(VisibilityStatus::Public),
        }
    }

    struct FixedSource(Vec<Playlist>);

    #[async_trait]
    impl PlaylistSource for FixedSource {
        async fn fetch_playlists(&self) -> Result<Vec<Playlist>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PlaylistSource for FailingSource {
        async fn fetch_playlists(&self) -> Result<Vec<Playlist>> {
            Err(UploaderError::TokenExpired)
        }
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let cache = PlaylistCache::from_playlists(vec![playlist("PLa", "A")]);
        assert_eq!(
            cache.resolve("PLa").as_deref(),
            Some("https://www.youtube.com/playlist?list=PLa")
        );
        assert_eq!(cache.resolve("PLmissing"), None);
    }

    #[test]
    fn test_playlists_sorted_by_title() {
        let cache = PlaylistCache::from_playlists(vec![
            playlist("2", "Zelda"),
            playlist("1", "Celeste"),
            playlist("3", "Mario"),
        ]);
        let titles: Vec<_> = cache.playlists().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["Celeste", "Mario", "Zelda"]);
    }

    #[tokio::test]
    async fn test_refresh_replaces_contents() {
        let cache = PlaylistCache::from_playlists(vec![playlist("old", "Old")]);
        let count = cache
            .refresh(&FixedSource(vec![playlist("new1", "N1"), playlist("new2", "N2")]))
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert!(cache.refreshed_at().is_some());
        assert!(cache.resolve("old").is_none());
        assert!(cache.resolve("new2").is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_contents() {
        let cache = PlaylistCache::from_playlists(vec![playlist("keep", "Keep")]);
        let err = cache.refresh(&FailingSource).await.unwrap_err();
        assert!(matches!(err, UploaderError::TokenExpired));
        assert_eq!(cache.len(), 1);
        assert!(cache.refreshed_at().is_none());
    }

    #[tokio::test]
    async fn test_refresh_cached_playlists_writes_cache() {
        let temp = tempfile::tempdir().unwrap();
        let source = FixedSource(vec![playlist("PL1", "One")]);

        let cache = refresh_cached_playlists(temp.path(), &source).await.unwrap();
        assert_eq!(cache.len(), 1);

        let reloaded = PlaylistCache::load(&paths::playlists_path(temp.path()))
            .await
            .unwrap();
        assert!(reloaded.resolve("PL1").is_some());
        assert!(reloaded.refreshed_at().is_some());
    }

    #[tokio::test]
    async fn test_rejected_token_discards_stored_credential() {
        let temp = tempfile::tempdir().unwrap();
        let auth = paths::auth_dir(temp.path());
        std::fs::create_dir_all(&auth).unwrap();
        std::fs::write(credentials::stored_credential_path(&auth), b"{}").unwrap();

        PlaylistCache::from_playlists(vec![playlist("keep", "Keep")])
            .save(&paths::playlists_path(temp.path()))
            .await
            .unwrap();

        let err = refresh_cached_playlists(temp.path(), &FailingSource)
            .await
            .unwrap_err();
        assert!(matches!(err, UploaderError::TokenExpired));
        assert!(!credentials::stored_credential_path(&auth).exists());

        let cache = PlaylistCache::load(&paths::playlists_path(temp.path()))
            .await
            .unwrap();
        assert!(cache.resolve("keep").is_some());
    }

    #[test]
    fn test_api_item_conversion() {
        let json = r#"{
            "nextPageToken": "abc",
            "items": [
                {
                    "id": "PL1",
                    "snippet": {"title": "Runs"},
                    "status": {"privacyStatus": "unlisted"}
                },
                {"id": "PL2", "snippet": {"title": "Other"}}
            ]
        }"#;
        let page: PlaylistListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));

        let playlists: Vec<Playlist> = page.items.into_iter().map(Playlist::from).collect();
        assert_eq!(playlists[0].privacy, Some(VisibilityStatus::Unlisted));
        assert_eq!(playlists[1].privacy, None);
        assert_eq!(playlists[1].title, "Other");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = YoutubePlaylistSource::with_base_url("token", "http://localhost:9000/");
        assert_eq!(source.base_url, "http://localhost:9000");
    }
}
