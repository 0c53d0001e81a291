use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::core::models::{Download, TagOutcome};
use crate::core::Service;
use crate::error::{FetchError, FetchResult, Result};
use crate::services::SimpleServices;
use crate::utils::progress::{ProgressMessages, ProgressUtils};

pub const PROMPT: &str = "🎵 Enter a URL or search query: ";

/// Run one fetch. Download failures are printed and are not errors of the
/// process; only startup faults and stdin failures propagate.
pub async fn execute(input: Option<String>, services: &SimpleServices) -> Result<()> {
    let input = match input {
        Some(input) => input.trim().to_string(),
        None => prompt_for_input()?,
    };

    if input.is_empty() {
        println!("❌ Nothing to fetch: enter a URL or a search query.");
        return Ok(());
    }

    let config = services.config();
    debug!("Output directory: {}", config.output_dir().display());

    let dispatcher = match services.create_dispatcher() {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            println!("❌ Could not prepare downloader: {}", e);
            return Ok(());
        }
    };

    let service = Service::classify(&input);
    info!("Recognized input as {}", service);

    let spinner = ProgressUtils::create_fetch_spinner(ProgressMessages::fetching(service, &input));
    let result = dispatcher.route(service, &input).await;
    spinner.finish_and_clear();

    for line in report(service, &result) {
        println!("{}", line);
    }

    Ok(())
}

fn prompt_for_input() -> Result<String> {
    print!("{}", PROMPT);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// User-facing lines describing the outcome of a routine.
pub fn report(service: Service, result: &FetchResult<Download>) -> Vec<String> {
    match result {
        Ok(download) => report_success(download),
        Err(e) => vec![report_failure(service, e)],
    }
}

fn report_success(download: &Download) -> Vec<String> {
    let path = download.path.display();
    let mut lines = match download.service {
        Service::SoundCloud => {
            if download.path.is_dir() {
                vec![format!("✅ Downloaded SoundCloud track to {}", path)]
            } else {
                vec![format!("✅ Downloaded SoundCloud track: {}", path)]
            }
        }
        _ => vec![format!("✅ Downloaded and converted: {}", path)],
    };

    match &download.tags {
        TagOutcome::NotRequested => {}
        TagOutcome::Tagged(metadata) => lines.push(format!(
            "✅ Tagged {} with Title: {}, Artist: {}",
            path, metadata.title, metadata.artist
        )),
        TagOutcome::Failed(e) => lines.push(format!("❌ Error tagging MP3: {}", e)),
    }

    lines
}

fn report_failure(service: Service, error: &FetchError) -> String {
    match (service, error) {
        (Service::Spotify, FetchError::NoSearchResults { .. }) => {
            "❌ No YouTube video found for the track.".to_string()
        }
        (Service::Unrecognized, FetchError::NoSearchResults { .. }) => {
            "❌ No results found for the query.".to_string()
        }
        (_, FetchError::ToolNotFound { tool }) => {
            format!("❌ Error: '{}' is not installed or not in PATH.", tool)
        }
        (Service::YouTube, e) => format!("❌ Error downloading YouTube audio: {}", e),
        (Service::Spotify, e) => format!("❌ Error downloading Spotify track: {}", e),
        (Service::SoundCloud, e) => format!("❌ Error downloading SoundCloud track: {}", e),
        (Service::Unrecognized, e) => format!("❌ Error searching and downloading: {}", e),
    }
}
