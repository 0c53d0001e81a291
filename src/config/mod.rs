use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::error::{ConfigError, FileSystemError, Result};

pub mod env;
pub mod validation;

use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const OUTPUT_DIR_NAME: &str = "MP3s";

pub const MIN_BITRATE_KBPS: u32 = 32;
pub const MAX_BITRATE_KBPS: u32 = 320;
pub const MAX_SEARCH_RESULTS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory that receives the produced MP3 files; `MP3s/` next to the
    /// executable when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// yt-dlp executable (name on PATH or full path)
    pub ytdlp_path: PathBuf,

    /// scdl executable (name on PATH or full path)
    pub scdl_path: PathBuf,

    /// MP3 encoding bitrate requested from yt-dlp
    pub audio_bitrate_kbps: u32,

    /// Number of video search results requested per query
    pub search_max_results: usize,

    /// Read from the file or environment, never written back
    #[serde(skip_serializing)]
    pub spotify_client_id: Option<String>,

    #[serde(skip_serializing)]
    pub spotify_client_secret: Option<String>,

    pub spotify_api_url: String,

    pub spotify_accounts_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            ytdlp_path: PathBuf::from("yt-dlp"),
            scdl_path: PathBuf::from("scdl"),
            audio_bitrate_kbps: 320,
            search_max_results: 1,
            spotify_client_id: None,
            spotify_client_secret: None,
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            spotify_accounts_url: DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string(),
        }
    }
}

/// `MP3s/` next to the running executable.
fn default_output_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(|dir| dir.join(OUTPUT_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(OUTPUT_DIR_NAME)),
        Err(e) => {
            warn!("Cannot locate executable ({}); using ./{} for output", e, OUTPUT_DIR_NAME);
            PathBuf::from(OUTPUT_DIR_NAME)
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Try to load .env file if it exists
        dotenvy::dotenv().ok();

        let config_file = if let Some(path) = config_path {
            PathBuf::from(path)
        } else {
            Self::default_config_path()?
        };

        let file_config = Self::from_file_or_default(&config_file)?;

        // Environment variables have the highest priority
        let mut config = file_config.clone();
        config.load_from_env()?;
        config.validate()?;

        if !config_file.exists() {
            file_config.write_default(&config_file)?;
        }

        Ok(config)
    }

    /// First-run config file, written before environment overrides apply.
    fn write_default(&self, config_file: &Path) -> Result<()> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        self.save(config_file)?;
        debug!("Wrote default config to {}", config_file.display());
        Ok(())
    }

    fn from_file_or_default(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_file)?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config from {}", config_file.display());
        Ok(config)
    }

    /// Load configuration from environment variables
    fn load_from_env(&mut self) -> Result<()> {
        if let Some(dir) = EnvParser::parse_path(EnvVars::OUTPUT_DIR)? {
            self.output_dir = Some(dir);
        }

        if let Some(path) = EnvParser::parse_path(EnvVars::YTDLP_PATH)? {
            self.ytdlp_path = path;
        }

        if let Some(path) = EnvParser::parse_path(EnvVars::SCDL_PATH)? {
            self.scdl_path = path;
        }

        if let Some(kbps) = EnvParser::parse_u32(EnvVars::AUDIO_BITRATE_KBPS, MIN_BITRATE_KBPS, MAX_BITRATE_KBPS)? {
            self.audio_bitrate_kbps = kbps;
        }

        if let Some(count) = EnvParser::parse_usize(EnvVars::SEARCH_MAX_RESULTS, 1, MAX_SEARCH_RESULTS)? {
            self.search_max_results = count;
        }

        if let Some(id) = EnvParser::parse_string(EnvVars::SPOTIFY_CLIENT_ID, None)? {
            self.spotify_client_id = Some(id);
        }

        if let Some(secret) = EnvParser::parse_string(EnvVars::SPOTIFY_CLIENT_SECRET, None)? {
            self.spotify_client_secret = Some(secret);
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::SPOTIFY_API_URL, None)? {
            self.spotify_api_url = url;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::SPOTIFY_ACCOUNTS_URL, None)? {
            self.spotify_accounts_url = url;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_output_dir(&self.output_dir())?;
        ConfigValidator::validate_executable(&self.ytdlp_path, "yt-dlp path")?;
        ConfigValidator::validate_executable(&self.scdl_path, "scdl path")?;
        ConfigValidator::validate_range(
            self.audio_bitrate_kbps,
            MIN_BITRATE_KBPS,
            MAX_BITRATE_KBPS,
            "audio bitrate (kbps)",
        )?;
        ConfigValidator::validate_range(self.search_max_results, 1, MAX_SEARCH_RESULTS, "search max results")?;
        ConfigValidator::validate_url(&self.spotify_api_url, "Spotify API")?;
        ConfigValidator::validate_url(&self.spotify_accounts_url, "Spotify accounts")?;
        Ok(())
    }

    /// Configured output directory, or `MP3s/` next to the running executable.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(default_output_dir)
    }

    /// Client id and secret, if both are configured.
    pub fn spotify_credentials(&self) -> Option<(&str, &str)> {
        match (&self.spotify_client_id, &self.spotify_client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Create the output directory once at startup.
    pub fn ensure_output_dir(&self) -> Result<()> {
        let output_dir = self.output_dir();
        fs::create_dir_all(&output_dir).map_err(|source| FileSystemError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("net", "tunefetch", "tunefetch")
            .ok_or(ConfigError::ProjectDirs)?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
