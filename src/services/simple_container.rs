use std::sync::Arc;

use crate::config::Config;
use crate::core::files::Id3Tagger;
use crate::core::services::{Scdl, SpotifyClient, YtDlp};
use crate::core::Dispatcher;
use crate::error::FetchResult;

pub struct SimpleServices {
    config: Arc<Config>,
}

impl SimpleServices {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn create_ytdlp(&self) -> YtDlp {
        YtDlp::from_config(&self.config)
    }

    pub fn create_spotify_client(&self) -> FetchResult<SpotifyClient> {
        SpotifyClient::from_config(&self.config)
    }

    pub fn create_scdl(&self) -> Scdl {
        Scdl::from_config(&self.config)
    }

    /// Dispatcher backed by the real collaborators.
    pub fn create_dispatcher(&self) -> FetchResult<Dispatcher> {
        let ytdlp = Arc::new(self.create_ytdlp());
        Ok(Dispatcher::new(
            ytdlp.clone(),
            ytdlp,
            Arc::new(self.create_spotify_client()?),
            Arc::new(self.create_scdl()),
            Arc::new(Id3Tagger::new()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dispatcher_without_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let services = SimpleServices::new(Config {
            output_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        });

        assert!(services.create_dispatcher().is_ok());
        assert_eq!(services.config().output_dir(), dir.path());
        assert!(services.create_ytdlp().output_path("a/b").starts_with(dir.path()));
    }
}
