use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::classifier::Service;
use crate::core::files::Tagger;
use crate::core::models::{Download, SearchHit, TagOutcome};
use crate::core::services::spotify::extract_track_id;
use crate::core::services::{AudioExtractor, SoundCloudDownloader, TrackLookup, VideoSearch};
use crate::error::{FetchError, FetchResult};

/// Routes an input to exactly one download routine.
#[derive(Clone)]
pub struct Dispatcher {
    extractor: Arc<dyn AudioExtractor>,
    search: Arc<dyn VideoSearch>,
    lookup: Arc<dyn TrackLookup>,
    soundcloud: Arc<dyn SoundCloudDownloader>,
    tagger: Arc<dyn Tagger>,
}

impl Dispatcher {
    pub fn new(
        extractor: Arc<dyn AudioExtractor>,
        search: Arc<dyn VideoSearch>,
        lookup: Arc<dyn TrackLookup>,
        soundcloud: Arc<dyn SoundCloudDownloader>,
        tagger: Arc<dyn Tagger>,
    ) -> Self {
        Self {
            extractor,
            search,
            lookup,
            soundcloud,
            tagger,
        }
    }

    pub async fn dispatch(&self, input: &str) -> FetchResult<Download> {
        self.route(Service::classify(input), input).await
    }

    pub async fn route(&self, service: Service, input: &str) -> FetchResult<Download> {
        debug!("Dispatching {:?} input: {}", service, input);
        match service {
            Service::YouTube => self.download_youtube(input).await,
            Service::Spotify => self.download_spotify(input).await,
            Service::SoundCloud => self.download_soundcloud(input).await,
            Service::Unrecognized => self.search_and_download(input).await,
        }
    }

    pub async fn download_youtube(&self, url: &str) -> FetchResult<Download> {
        let path = self.extractor.extract(url).await?;
        Ok(Download::untagged(Service::YouTube, path))
    }

    /// Resolve the track on Spotify, fetch the best YouTube match, then tag it
    /// with the Spotify title and artist.
    pub async fn download_spotify(&self, url: &str) -> FetchResult<Download> {
        let track_id = extract_track_id(url)?;
        let metadata = self.lookup.track(&track_id).await?;
        info!("Spotify track: {} - {}", metadata.artist, metadata.title);

        let hit = self.first_hit(&metadata.search_query()).await?;
        let path = self.extractor.extract(&hit.url).await?;

        let tags = match self.tagger.tag(&path, &metadata) {
            Ok(()) => TagOutcome::Tagged(metadata),
            Err(e) => {
                warn!("Tagging failed for {}: {}", path.display(), e);
                TagOutcome::Failed(e)
            }
        };

        Ok(Download {
            service: Service::Spotify,
            path,
            tags,
        })
    }

    pub async fn download_soundcloud(&self, url: &str) -> FetchResult<Download> {
        let path = self.soundcloud.download(url).await?;
        Ok(Download::untagged(Service::SoundCloud, path))
    }

    /// Search the literal query and download the first hit.
    pub async fn search_and_download(&self, query: &str) -> FetchResult<Download> {
        let hit = self.first_hit(query).await?;
        let path = self.extractor.extract(&hit.url).await?;
        Ok(Download::untagged(Service::Unrecognized, path))
    }

    async fn first_hit(&self, query: &str) -> FetchResult<SearchHit> {
        let hits = self.search.search(query).await?;
        let hit = hits.into_iter().next().ok_or_else(|| FetchError::NoSearchResults {
            query: query.to_string(),
        })?;
        debug!("Best match for '{}': {} [{}] {}", query, hit.title, hit.id, hit.url);
        Ok(hit)
    }
}
