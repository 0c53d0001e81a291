//! YouTube extraction and search through the yt-dlp executable.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::files::sanitize_filename;
use crate::core::models::SearchHit;
use crate::core::services::process::{run_tool, tool_name};
use crate::core::services::{AudioExtractor, VideoSearch};
use crate::error::{FetchError, FetchResult};

const UNKNOWN_TITLE: &str = "Unknown";

/// Subset of `yt-dlp --dump-json` output for a single video.
#[derive(Deserialize, Debug)]
struct VideoInfo {
    title: Option<String>,
}

/// One line of `yt-dlp --flat-playlist --dump-json ytsearchN:...` output.
#[derive(Deserialize, Debug)]
struct FlatEntry {
    id: Option<String>,
    title: Option<String>,
    url: Option<String>,
    webpage_url: Option<String>,
}

#[derive(Clone)]
pub struct YtDlp {
    program: PathBuf,
    output_dir: PathBuf,
    bitrate_kbps: u32,
    max_results: usize,
}

impl YtDlp {
    pub fn new(program: &Path, output_dir: &Path, bitrate_kbps: u32, max_results: usize) -> Self {
        Self {
            program: program.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            bitrate_kbps,
            max_results: max_results.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.ytdlp_path,
            &config.output_dir(),
            config.audio_bitrate_kbps,
            config.search_max_results,
        )
    }

    fn probe_args(url: &str) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--no-download".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--".to_string(),
            url.to_string(),
        ]
    }

    /// Final path of the MP3 produced for a video titled `title`.
    pub fn output_path(&self, title: &str) -> PathBuf {
        self.output_dir.join(format!("{}.mp3", sanitize_filename(title)))
    }

    fn download_args(&self, url: &str, output_stem: &str) -> Vec<String> {
        let template = self.output_dir.join(format!("{}.%(ext)s", output_stem));
        vec![
            "-f".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            "mp3".to_string(),
            "--audio-quality".to_string(),
            format!("{}K", self.bitrate_kbps),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--output".to_string(),
            template.to_string_lossy().into_owned(),
            "--".to_string(),
            url.to_string(),
        ]
    }

    fn search_args(&self, query: &str) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--flat-playlist".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
            format!("ytsearch{}:{}", self.max_results, query),
        ]
    }

    async fn probe_title(&self, url: &str) -> FetchResult<String> {
        let output = run_tool(&self.program, &Self::probe_args(url)).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let title = parse_title(&stdout).map_err(|reason| FetchError::InvalidToolOutput {
            tool: tool_name(&self.program),
            reason,
        })?;
        Ok(title)
    }
}

#[async_trait]
impl AudioExtractor for YtDlp {
    async fn extract(&self, url: &str) -> FetchResult<PathBuf> {
        let title = self.probe_title(url).await?;
        info!("Extracting audio for: {}", title);

        let stem = sanitize_filename(&title);
        run_tool(&self.program, &self.download_args(url, &stem)).await?;

        let path = self.output_path(&title);
        if !path.is_file() {
            warn!("yt-dlp finished but {} is missing", path.display());
            return Err(FetchError::InvalidToolOutput {
                tool: tool_name(&self.program),
                reason: format!("expected output file {} was not created", path.display()),
            });
        }
        Ok(path)
    }
}

#[async_trait]
impl VideoSearch for YtDlp {
    async fn search(&self, query: &str) -> FetchResult<Vec<SearchHit>> {
        debug!("Searching YouTube for: {}", query);
        let output = run_tool(&self.program, &self.search_args(query)).await?;
        let hits = parse_search_output(&String::from_utf8_lossy(&output.stdout));
        debug!("Search returned {} result(s)", hits.len());
        Ok(hits)
    }
}

/// Title from a single-video JSON dump; a missing title becomes "Unknown".
fn parse_title(json: &str) -> Result<String, String> {
    let line = json
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| "empty metadata output".to_string())?;

    let info: VideoInfo = serde_json::from_str(line).map_err(|e| format!("invalid metadata JSON: {}", e))?;
    Ok(info
        .title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string()))
}

/// Search hits in result order; lines that are not usable entries are skipped.
fn parse_search_output(stdout: &str) -> Vec<SearchHit> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str::<FlatEntry>(line) {
            Ok(entry) => entry_to_hit(entry),
            Err(e) => {
                debug!("Skipping unparsable search line: {}", e);
                None
            }
        })
        .collect()
}

fn entry_to_hit(entry: FlatEntry) -> Option<SearchHit> {
    let title = entry.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let absolute_url = entry
        .webpage_url
        .or(entry.url)
        .filter(|url| url.starts_with("http://") || url.starts_with("https://"));

    match (entry.id, absolute_url) {
        (Some(id), Some(url)) => Some(SearchHit { id, title, url }),
        (Some(id), None) => Some(SearchHit::from_id(&id, &title)),
        (None, Some(url)) => Some(SearchHit {
            id: String::new(),
            title,
            url,
        }),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ytdlp(dir: &Path) -> YtDlp {
        YtDlp::new(Path::new("yt-dlp"), dir, 320, 1)
    }

    #[test]
    fn test_download_args_request_320k_mp3() {
        let dir = PathBuf::from("/music/MP3s");
        let args = ytdlp(&dir).download_args("https://youtu.be/abc", "Song Title");

        let quality = args.iter().position(|a| a == "--audio-quality").unwrap();
        assert_eq!(args[quality + 1], "320K");
        let format = args.iter().position(|a| a == "--audio-format").unwrap();
        assert_eq!(args[format + 1], "mp3");
        let output = args.iter().position(|a| a == "--output").unwrap();
        assert_eq!(
            PathBuf::from(&args[output + 1]),
            dir.join("Song Title.%(ext)s")
        );
        assert_eq!(args.last().map(String::as_str), Some("https://youtu.be/abc"));
    }

    #[test]
    fn test_option_like_input_stays_positional() {
        let input = "--exec=rm youtube.com";
        let dir = PathBuf::from("/music/MP3s");

        for args in [YtDlp::probe_args(input), ytdlp(&dir).download_args(input, "x")] {
            let n = args.len();
            assert_eq!(args[n - 2], "--");
            assert_eq!(args[n - 1], input);
        }
    }

    #[test]
    fn test_output_path_is_sanitized_mp3_in_output_dir() {
        let dir = PathBuf::from("/music/MP3s");
        let path = ytdlp(&dir).output_path("AC/DC: Thunderstruck");
        assert_eq!(path, dir.join("AC_DC_ Thunderstruck.mp3"));
    }

    #[test]
    fn test_search_args_use_literal_query() {
        let yt = YtDlp::new(Path::new("yt-dlp"), Path::new("out"), 320, 3);
        let args = yt.search_args("daft punk around the world");
        assert_eq!(args.last().map(String::as_str), Some("ytsearch3:daft punk around the world"));
    }

    #[test]
    fn test_max_results_never_zero() {
        let yt = YtDlp::new(Path::new("yt-dlp"), Path::new("out"), 320, 0);
        assert!(yt.search_args("q").last().unwrap().starts_with("ytsearch1:"));
    }

    #[test]
    fn test_parse_title() {
        assert_eq!(parse_title(r#"{"id":"abc","title":"Song"}"#).unwrap(), "Song");
        assert_eq!(parse_title(r#"{"id":"abc"}"#).unwrap(), "Unknown");
        assert_eq!(parse_title("\n{\"title\":\"  \"}\n").unwrap(), "Unknown");
        assert!(parse_title("").is_err());
        assert!(parse_title("ERROR: not json").is_err());
    }

    #[test]
    fn test_parse_search_output() {
        let stdout = concat!(
            r#"{"_type":"url","id":"dQw4w9WgXcQ","title":"Rick Astley - Never Gonna Give You Up","url":"https://www.youtube.com/watch?v=dQw4w9WgXcQ"}"#,
            "\n",
            r#"{"_type":"url","id":"yPYZpwSpKmA","title":"Together Forever"}"#,
            "\n",
            "garbage line\n",
            r#"{"_type":"url","title":"No id or url"}"#,
            "\n"
        );

        let hits = parse_search_output(stdout);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "dQw4w9WgXcQ");
        assert_eq!(hits[0].url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(hits[1].url, "https://www.youtube.com/watch?v=yPYZpwSpKmA");
    }

    #[test]
    fn test_parse_search_output_empty() {
        assert!(parse_search_output("").is_empty());
        assert!(parse_search_output("\n\n").is_empty());
    }

    /// Fake yt-dlp: answers the metadata dump and search with canned JSON and, for a
    /// download, creates the file named by `--output`.
    #[cfg(unix)]
    const FAKE_YTDLP: &str = r#"
echo "$@" >> "$(dirname "$0")/calls.log"
case " $* " in
  *" --no-download "*)
    echo '{"id":"abc","title":"AC/DC: Thunderstruck"}' ;;
  *" --flat-playlist "*)
    echo '{"_type":"url","id":"v4xZUr0BEfE","title":"AC/DC - Thunderstruck"}'
    echo '{"_type":"url","id":"pAgnJDJN4VA","title":"Back In Black"}' ;;
  *)
    while [ "$#" -gt 1 ]; do
      if [ "$1" = "--output" ]; then
        : > "$(echo "$2" | sed 's/%(ext)s/mp3/')"
      fi
      shift
    done ;;
esac
"#;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_reads_title_then_downloads_sanitized_mp3() {
        let bin = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let program = crate::core::services::process::write_script(bin.path(), "yt-dlp", FAKE_YTDLP);
        let yt = YtDlp::new(&program, out.path(), 320, 1);

        let path = yt.extract("https://youtu.be/v4xZUr0BEfE").await.unwrap();

        assert_eq!(path, out.path().join("AC_DC_ Thunderstruck.mp3"));
        assert!(path.is_file());

        let calls = std::fs::read_to_string(bin.path().join("calls.log")).unwrap();
        let calls: Vec<&str> = calls.lines().collect();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].contains("--no-download"));
        assert!(calls[1].contains("--audio-quality 320K"));
        assert!(calls[1].ends_with("-- https://youtu.be/v4xZUr0BEfE"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_fails_when_no_file_is_written() {
        let bin = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let program = crate::core::services::process::write_script(
            bin.path(),
            "yt-dlp",
            r#"case " $* " in *" --no-download "*) echo '{"title":"Silent"}' ;; esac"#,
        );
        let yt = YtDlp::new(&program, out.path(), 320, 1);

        let err = yt.extract("https://youtu.be/abc").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidToolOutput { ref tool, .. } if tool == "yt-dlp"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_search_returns_hits_in_order() {
        let bin = tempfile::tempdir().unwrap();
        let program = crate::core::services::process::write_script(bin.path(), "yt-dlp", FAKE_YTDLP);
        let yt = YtDlp::new(&program, bin.path(), 320, 2);

        let hits = yt.search("thunderstruck").await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://www.youtube.com/watch?v=v4xZUr0BEfE");
        assert_eq!(hits[1].title, "Back In Black");
        let calls = std::fs::read_to_string(bin.path().join("calls.log")).unwrap();
        assert!(calls.trim_end().ends_with("ytsearch2:thunderstruck"));
    }
}
