use std::env;
use std::path::PathBuf;
use crate::error::{Result, TuneFetchError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const OUTPUT_DIR: &'static str = "TUNEFETCH_OUTPUT_DIR";
    pub const YTDLP_PATH: &'static str = "TUNEFETCH_YTDLP_PATH";
    pub const SCDL_PATH: &'static str = "TUNEFETCH_SCDL_PATH";
    pub const AUDIO_BITRATE_KBPS: &'static str = "TUNEFETCH_AUDIO_BITRATE_KBPS";
    pub const SEARCH_MAX_RESULTS: &'static str = "TUNEFETCH_SEARCH_MAX_RESULTS";
    pub const SPOTIFY_CLIENT_ID: &'static str = "TUNEFETCH_SPOTIFY_CLIENT_ID";
    pub const SPOTIFY_CLIENT_SECRET: &'static str = "TUNEFETCH_SPOTIFY_CLIENT_SECRET";
    pub const SPOTIFY_API_URL: &'static str = "TUNEFETCH_SPOTIFY_API_URL";
    pub const SPOTIFY_ACCOUNTS_URL: &'static str = "TUNEFETCH_SPOTIFY_ACCOUNTS_URL";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string with validation
    pub fn parse_string(var_name: &str, validator: Option<fn(&str) -> Result<()>>) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                if let Some(validate_fn) = validator {
                    validate_fn(&trimmed)?;
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(TuneFetchError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    pub fn parse_path(var_name: &str) -> Result<Option<PathBuf>> {
        Ok(Self::parse_string(var_name, None)?.map(PathBuf::from))
    }

    /// Parse environment variable as u32 with range validation
    pub fn parse_u32(var_name: &str, min: u32, max: u32) -> Result<Option<u32>> {
        let Some(value_str) = Self::parse_string(var_name, None)? else {
            return Ok(None);
        };

        let value = value_str.parse::<u32>().map_err(|_| {
            TuneFetchError::Validation(format!(
                "Invalid number in {}: '{}'. Must be a positive integer",
                var_name, value_str
            ))
        })?;

        if value < min || value > max {
            return Err(TuneFetchError::Validation(format!(
                "Value in {} must be between {} and {}, got {}",
                var_name, min, max, value
            )));
        }

        Ok(Some(value))
    }

    /// Parse environment variable as usize with range validation
    pub fn parse_usize(var_name: &str, min: usize, max: usize) -> Result<Option<usize>> {
        let Some(value_str) = Self::parse_string(var_name, None)? else {
            return Ok(None);
        };

        let value = value_str.parse::<usize>().map_err(|_| {
            TuneFetchError::Validation(format!(
                "Invalid number in {}: '{}'. Must be a positive integer",
                var_name, value_str
            ))
        })?;

        if value < min || value > max {
            return Err(TuneFetchError::Validation(format!(
                "Value in {} must be between {} and {}, got {}",
                var_name, min, max, value
            )));
        }

        Ok(Some(value))
    }
}
