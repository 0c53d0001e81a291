use std::path::PathBuf;

use crate::core::classifier::Service;
use crate::error::FetchError;

pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Title and artist written into a produced file's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
}

impl TrackMetadata {
    /// Free-text query used to find the track on YouTube.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}

/// One video search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl SearchHit {
    pub fn from_id(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            url: format!("{}{}", YOUTUBE_WATCH_URL, id),
        }
    }
}

#[derive(Debug)]
pub enum TagOutcome {
    NotRequested,
    Tagged(TrackMetadata),
    /// The file was produced but tagging failed; the file stays in place.
    Failed(FetchError),
}

/// Successful result of a download routine.
#[derive(Debug)]
pub struct Download {
    pub service: Service,
    /// Produced audio file, or the output directory when the downloader
    /// does not reveal which file it wrote.
    pub path: PathBuf,
    pub tags: TagOutcome,
}

impl Download {
    pub fn untagged(service: Service, path: PathBuf) -> Self {
        Self {
            service,
            path,
            tags: TagOutcome::NotRequested,
        }
    }
}
