pub mod credentials;
pub mod models;
pub mod playlists;

pub use models::{Playlist, VisibilityStatus};
pub use playlists::{
    refresh_cached_playlists, PlaylistCache, PlaylistResolver, PlaylistSource,
    YoutubePlaylistSource,
};
