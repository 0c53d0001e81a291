use std::path::Path;
use url::Url;
use crate::error::{Result, TuneFetchError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            TuneFetchError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(TuneFetchError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }
        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(TuneFetchError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate an executable setting: either a bare program name resolved via
    /// PATH, or a path to an existing file.
    pub fn validate_executable(program: &Path, field_name: &str) -> Result<()> {
        if program.as_os_str().is_empty() {
            return Err(TuneFetchError::Validation(format!("{} must not be empty", field_name)));
        }

        let is_bare_name = program.components().count() == 1 && !program.is_absolute();
        if !is_bare_name && !program.is_file() {
            return Err(TuneFetchError::Validation(format!(
                "{} does not point to a file: {}",
                field_name,
                program.display()
            )));
        }
        Ok(())
    }

    /// The output directory must be a directory if it already exists.
    pub fn validate_output_dir(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(TuneFetchError::Validation("Output directory must not be empty".to_string()));
        }
        if path.exists() && !path.is_dir() {
            return Err(TuneFetchError::Validation(format!(
                "Output path exists but is not a directory: {}",
                path.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_url() {
        assert!(ConfigValidator::validate_url("https://api.spotify.com/v1", "Spotify API").is_ok());
        assert!(ConfigValidator::validate_url("not-a-url", "Spotify API").is_err());
        assert!(ConfigValidator::validate_url("ftp://example.com", "Spotify API").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(ConfigValidator::validate_range(320u32, 32u32, 320u32, "bitrate").is_ok());
        assert!(ConfigValidator::validate_range(321u32, 32u32, 320u32, "bitrate").is_err());
        assert!(ConfigValidator::validate_range(0usize, 1usize, 20usize, "results").is_err());
    }

    #[test]
    fn test_validate_executable() {
        assert!(ConfigValidator::validate_executable(&PathBuf::from("yt-dlp"), "yt-dlp").is_ok());
        assert!(ConfigValidator::validate_executable(&PathBuf::from(""), "yt-dlp").is_err());
        assert!(ConfigValidator::validate_executable(&PathBuf::from("/definitely/missing/scdl"), "scdl").is_err());
    }

    #[test]
    fn test_validate_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir.mp3");
        std::fs::write(&file, b"x").unwrap();

        assert!(ConfigValidator::validate_output_dir(dir.path()).is_ok());
        assert!(ConfigValidator::validate_output_dir(&dir.path().join("MP3s")).is_ok());
        assert!(ConfigValidator::validate_output_dir(&file).is_err());
    }
}
