/// Replace every character that is not alphanumeric, space, hyphen or
/// underscore with `_`. The mapping is one character to one character.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if is_allowed(c) { c } else { '_' })
        .collect()
}

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ' ' | '-' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_allowed_characters() {
        assert_eq!(sanitize_filename("Artist - Song_Name 2"), "Artist - Song_Name 2");
    }

    #[test]
    fn test_replaces_path_and_punctuation() {
        assert_eq!(sanitize_filename("AC/DC: Back in Black?"), "AC_DC_ Back in Black_");
        assert_eq!(sanitize_filename("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize_filename("a.b"), "a_b");
    }

    #[test]
    fn test_unicode_letters_survive() {
        assert_eq!(sanitize_filename("Björk — Jóga"), "Björk _ Jóga");
        assert_eq!(sanitize_filename("坂本龍一"), "坂本龍一");
    }

    #[test]
    fn test_output_alphabet_and_length() {
        let samples = [
            "",
            "plain",
            "tabs\tand\nnewlines",
            "emoji 🎵 title (Official Video) [HD]",
            "quotes \"'` and <angles> & pipes |",
            "ÅÄÖ ñ ß ø",
        ];

        for sample in samples {
            let sanitized = sanitize_filename(sample);
            assert_eq!(sanitized.chars().count(), sample.chars().count(), "length for {:?}", sample);
            assert!(
                sanitized.chars().all(is_allowed),
                "unexpected character in {:?}",
                sanitized
            );
        }
    }
}
