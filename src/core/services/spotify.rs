//! Spotify Web API client (client-credentials flow) for track metadata.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::models::TrackMetadata;
use crate::core::services::TrackLookup;
use crate::error::{FetchError, FetchResult};

/// Tokens are refreshed this long before Spotify says they expire.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize, Debug)]
struct TrackResponse {
    name: String,
    #[serde(default)]
    artists: Vec<ArtistResponse>,
}

#[derive(Deserialize, Debug)]
struct ArtistResponse {
    name: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now + chrono::Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS)
    }
}

#[derive(Debug, Clone)]
struct Credentials {
    client_id: String,
    client_secret: String,
}

pub struct SpotifyClient {
    client: reqwest::Client,
    api_url: String,
    accounts_url: String,
    credentials: Option<Credentials>,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(
        api_url: &str,
        accounts_url: &str,
        credentials: Option<(&str, &str)>,
    ) -> FetchResult<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("tunefetch/{}", version))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
            credentials: credentials.map(|(client_id, client_secret)| Credentials {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
            }),
            token: Mutex::new(None),
        })
    }

    pub fn from_config(config: &Config) -> FetchResult<Self> {
        Self::new(
            &config.spotify_api_url,
            &config.spotify_accounts_url,
            config.spotify_credentials(),
        )
    }

    async fn access_token(&self) -> FetchResult<String> {
        let credentials = self.credentials.as_ref().ok_or(FetchError::MissingCredentials)?;

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            debug!("Using cached Spotify access token");
            return Ok(token.access_token.clone());
        }

        info!("Requesting Spotify access token");
        let response = self
            .client
            .post(format!("{}/api/token", self.accounts_url))
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response.json().await?;
        let expires_at = Utc::now() + chrono::Duration::seconds(token.expires_in);
        debug!("Spotify token expires in {}s", token.expires_in);

        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at,
        });
        Ok(token.access_token)
    }
}

#[async_trait]
impl TrackLookup for SpotifyClient {
    async fn track(&self, track_id: &str) -> FetchResult<TrackMetadata> {
        let token = self.access_token().await?;

        debug!("Fetching Spotify track {}", track_id);
        let response = self
            .client
            .get(format!("{}/tracks/{}", self.api_url, track_id))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let track: TrackResponse = response.json().await?;
        track_metadata(track)
    }
}

/// Title plus the first listed artist.
fn track_metadata(track: TrackResponse) -> FetchResult<TrackMetadata> {
    let artist = track
        .artists
        .into_iter()
        .next()
        .map(|artist| artist.name)
        .ok_or_else(|| FetchError::InvalidResponse {
            reason: format!("track '{}' has no artists", track.name),
        })?;

    Ok(TrackMetadata {
        title: track.name,
        artist,
    })
}

/// Track id from a Spotify URL: the last path segment once the query string
/// and fragment are removed.
pub fn extract_track_id(url: &str) -> FetchResult<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let id = path.rsplit('/').next().unwrap_or(path);

    if id.is_empty() {
        return Err(FetchError::InvalidInput(format!("no Spotify track id in '{}'", url)));
    }
    Ok(id.to_string())
}
