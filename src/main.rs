//! Rustuploader - preset-driven batch preparation of YouTube uploads
//!
//! Applies stored presets to video files, runs the tag processors over the
//! resulting titles, descriptions and tags, and keeps the local playlist
//! cache in sync with the channel.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustuploader::tag_processing::TagPipeline;
use rustuploader::utils::{self, paths, AppSettings};
use rustuploader::youtube::{refresh_cached_playlists, PlaylistCache, YoutubePlaylistSource};
use rustuploader::PresetStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Override the data directory (presets, settings, playlist cache)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the tag processors in the order they run
    Processors,
    /// List stored presets
    Presets,
    /// Apply a preset to video files and print the resulting uploads as JSON
    Apply {
        #[arg(long)]
        preset: String,
        /// First auto number (defaults to the configured value)
        #[arg(long)]
        auto_num: Option<u32>,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List cached playlists
    Playlists,
    /// Refresh the cached playlist list from YouTube
    RefreshPlaylists {
        /// OAuth access token with the youtube scope
        #[arg(long, env = "YOUTUBE_ACCESS_TOKEN")]
        token: String,
    },
    /// Delete stored credentials and cached playlists
    ClearData,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = args.data_dir.unwrap_or_else(utils::get_data_dir);

    match args.command {
        Command::Processors => {
            let pipeline = TagPipeline::with_defaults(Arc::new(PlaylistCache::new()));
            for name in pipeline.processor_names() {
                println!("{}", name);
            }
        }
        Command::Presets => {
            let store = PresetStore::new(paths::presets_path(&data_dir));
            let presets = store.load_all().await.context("Failed to load presets")?;
            if presets.is_empty() {
                println!("No presets stored in {:?}", store.path());
            }
            for preset in presets {
                println!(
                    "{}\t{}\t{}",
                    preset.name,
                    preset.visibility,
                    preset.selected_playlist.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Apply {
            preset,
            auto_num,
            files,
        } => {
            let settings = AppSettings::load(&paths::settings_path(&data_dir)).await?;
            let store = PresetStore::new(paths::presets_path(&data_dir));
            let preset = store.get(&preset).await?;
            let cache = PlaylistCache::load(&paths::playlists_path(&data_dir))
                .await
                .context("Failed to load playlist cache")?;

            let seed = auto_num.unwrap_or(settings.default_auto_num);
            let uploads = TagPipeline::with_defaults(Arc::new(cache))
                .apply_preset(&preset, &files, seed)
                .context("Failed to process preset tags")?;

            println!("{}", serde_json::to_string_pretty(&uploads)?);
        }
        Command::Playlists => {
            let cache = PlaylistCache::load(&paths::playlists_path(&data_dir)).await?;
            match cache.refreshed_at() {
                Some(at) => println!("Last refreshed {}", at.to_rfc3339()),
                None => println!("Playlist cache has never been refreshed"),
            }
            for playlist in cache.playlists() {
                println!("{}\t{}\t{}", playlist.id, playlist.title, playlist.url());
            }
        }
        Command::RefreshPlaylists { token } => {
            let source = YoutubePlaylistSource::new(token);
            let cache = refresh_cached_playlists(&data_dir, &source)
                .await
                .context("Failed to refresh playlists")?;
            println!("{} playlists cached", cache.len());
        }
        Command::ClearData => {
            if utils::clear_stored_data(&data_dir).await? {
                println!("Stored data cleared");
            } else {
                println!("Nothing to clear");
            }
        }
    }

    Ok(())
}
