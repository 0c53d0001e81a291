// SoundCloud downloads through the scdl executable

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::services::process::run_tool;
use crate::core::services::SoundCloudDownloader;
use crate::error::FetchResult;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "flac", "ogg", "opus", "wav", "aac"];

pub struct Scdl {
    program: PathBuf,
    output_dir: PathBuf,
}

impl Scdl {
    pub fn new(program: &Path, output_dir: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.scdl_path, &config.output_dir())
    }

    fn args(&self, url: &str) -> Vec<String> {
        vec![
            "-l".to_string(),
            url.to_string(),
            "--path".to_string(),
            self.output_dir.to_string_lossy().into_owned(),
        ]
    }
}

#[async_trait]
impl SoundCloudDownloader for Scdl {
    /// scdl names files itself, so the produced file is found by comparing
    /// the output directory before and after the run.
    async fn download(&self, url: &str) -> FetchResult<PathBuf> {
        let before = audio_files(&self.output_dir)?;

        info!("Downloading SoundCloud track: {}", url);
        run_tool(&self.program, &self.args(url)).await?;

        let after = audio_files(&self.output_dir)?;
        match single_new_file(&before, &after) {
            Some(path) => Ok(path),
            None => {
                debug!("Could not identify the file scdl wrote; reporting the output directory");
                Ok(self.output_dir.clone())
            }
        }
    }
}

fn audio_files(dir: &Path) -> FetchResult<BTreeSet<PathBuf>> {
    let mut files = BTreeSet::new();
    if !dir.exists() {
        return Ok(files);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_audio = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false);
        if is_audio && path.is_file() {
            files.insert(path);
        }
    }
    Ok(files)
}

fn single_new_file(before: &BTreeSet<PathBuf>, after: &BTreeSet<PathBuf>) -> Option<PathBuf> {
    let mut new_files = after.difference(before);
    match (new_files.next(), new_files.next()) {
        (Some(path), None) => Some(path.clone()),
        _ => None,
    }
}
