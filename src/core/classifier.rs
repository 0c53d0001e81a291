use std::fmt;

/// Source platform an input string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    YouTube,
    Spotify,
    SoundCloud,
    /// No known domain; the input is treated as a free-text search query.
    Unrecognized,
}

const YOUTUBE_DOMAINS: &[&str] = &["youtube.com", "youtu.be"];
const SPOTIFY_DOMAINS: &[&str] = &["spotify.com"];
const SOUNDCLOUD_DOMAINS: &[&str] = &["soundcloud.com"];

impl Service {
    /// Classify by literal substring match; first match wins.
    pub fn classify(input: &str) -> Self {
        let matches = |domains: &[&str]| domains.iter().any(|domain| input.contains(domain));

        if matches(YOUTUBE_DOMAINS) {
            Service::YouTube
        } else if matches(SPOTIFY_DOMAINS) {
            Service::Spotify
        } else if matches(SOUNDCLOUD_DOMAINS) {
            Service::SoundCloud
        } else {
            Service::Unrecognized
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::YouTube => "YouTube",
            Service::Spotify => "Spotify",
            Service::SoundCloud => "SoundCloud",
            Service::Unrecognized => "search",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_domains() {
        assert_eq!(Service::classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), Service::YouTube);
        assert_eq!(Service::classify("https://youtu.be/dQw4w9WgXcQ"), Service::YouTube);
        assert_eq!(Service::classify("https://music.youtube.com/watch?v=abc"), Service::YouTube);
    }

    #[test]
    fn test_spotify_and_soundcloud_domains() {
        assert_eq!(
            Service::classify("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=1"),
            Service::Spotify
        );
        assert_eq!(Service::classify("https://soundcloud.com/artist/track-name"), Service::SoundCloud);
    }

    #[test]
    fn test_substring_match_anywhere() {
        // Literal containment, not URL parsing
        assert_eq!(Service::classify("check this youtu.be/xyz out"), Service::YouTube);
        assert_eq!(Service::classify("spotify.com"), Service::Spotify);
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(Service::classify("some unmatched query text"), Service::Unrecognized);
        assert_eq!(Service::classify(""), Service::Unrecognized);
        assert_eq!(Service::classify("https://vimeo.com/12345"), Service::Unrecognized);
        assert_eq!(Service::classify("YOUTUBE.COM"), Service::Unrecognized);
    }

    #[test]
    fn test_youtube_checked_first() {
        assert_eq!(
            Service::classify("https://youtube.com/redirect?q=https://soundcloud.com/a/b"),
            Service::YouTube
        );
        assert_eq!(
            Service::classify("https://open.spotify.com/x?ref=soundcloud.com"),
            Service::Spotify
        );
    }
}
