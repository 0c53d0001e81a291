//! External collaborators
//!
//! Each trait wraps one external system the downloader delegates to:
//! - `AudioExtractor`: URL to local MP3 (yt-dlp)
//! - `VideoSearch`: free-text query to video URLs (yt-dlp ytsearch)
//! - `TrackLookup`: Spotify track id to title/artist (Spotify Web API)
//! - `SoundCloudDownloader`: SoundCloud URL to local file (scdl)

use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::models::{SearchHit, TrackMetadata};
use crate::error::FetchResult;

pub mod process;
pub mod soundcloud;
pub mod spotify;
pub mod youtube;

pub use soundcloud::Scdl;
pub use spotify::SpotifyClient;
pub use youtube::YtDlp;

#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Download and transcode `url`, returning the produced MP3.
    async fn extract(&self, url: &str) -> FetchResult<PathBuf>;
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Best matches first; an empty list means no results.
    async fn search(&self, query: &str) -> FetchResult<Vec<SearchHit>>;
}

#[async_trait]
pub trait TrackLookup: Send + Sync {
    async fn track(&self, track_id: &str) -> FetchResult<TrackMetadata>;
}

#[async_trait]
pub trait SoundCloudDownloader: Send + Sync {
    async fn download(&self, url: &str) -> FetchResult<PathBuf>;
}
