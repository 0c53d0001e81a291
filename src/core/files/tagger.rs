use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::read_from_path;
use lofty::tag::{Accessor, Tag};
use tracing::debug;

use crate::core::models::TrackMetadata;
use crate::error::{FetchError, FetchResult};

/// Writes title/artist into a produced audio file.
pub trait Tagger: Send + Sync {
    fn tag(&self, path: &Path, metadata: &TrackMetadata) -> FetchResult<()>;
}

/// Edits the file's primary tag (ID3v2 for MP3), creating it when absent.
/// Other frames already present in the tag are kept.
pub struct Id3Tagger;

impl Id3Tagger {
    pub fn new() -> Self {
        Id3Tagger
    }
}

impl Default for Id3Tagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger for Id3Tagger {
    fn tag(&self, path: &Path, metadata: &TrackMetadata) -> FetchResult<()> {
        let tagging_error = |source| FetchError::Tagging {
            path: path.to_path_buf(),
            source,
        };

        let mut tagged_file = read_from_path(path).map_err(tagging_error)?;

        if tagged_file.primary_tag().is_none() {
            let tag_type = tagged_file.primary_tag_type();
            debug!("No {:?} tag in {}, creating one", tag_type, path.display());
            tagged_file.insert_tag(Tag::new(tag_type));
        }

        let tag = tagged_file.primary_tag_mut().ok_or_else(|| {
            FetchError::InvalidInput(format!("{} does not accept a primary tag", path.display()))
        })?;
        apply_metadata(tag, metadata);

        tagged_file
            .save_to_path(path, WriteOptions::default())
            .map_err(tagging_error)?;

        debug!("Tagged {} as {} - {}", path.display(), metadata.artist, metadata.title);
        Ok(())
    }
}

fn apply_metadata(tag: &mut Tag, metadata: &TrackMetadata) {
    tag.set_title(metadata.title.clone());
    tag.set_artist(metadata.artist.clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::tag::TagType;

    fn metadata() -> TrackMetadata {
        TrackMetadata {
            title: "Teardrop".to_string(),
            artist: "Massive Attack".to_string(),
        }
    }

    #[test]
    fn test_apply_metadata_sets_title_and_artist() {
        let mut tag = Tag::new(TagType::Id3v2);
        apply_metadata(&mut tag, &metadata());

        assert_eq!(tag.title().as_deref(), Some("Teardrop"));
        assert_eq!(tag.artist().as_deref(), Some("Massive Attack"));
    }

    #[test]
    fn test_apply_metadata_overwrites_existing_values() {
        let mut tag = Tag::new(TagType::Id3v2);
        tag.set_title("Teardrop (Official Video)".to_string());
        tag.set_album("Mezzanine".to_string());
        apply_metadata(&mut tag, &metadata());

        assert_eq!(tag.title().as_deref(), Some("Teardrop"));
        assert_eq!(tag.album().as_deref(), Some("Mezzanine"));
    }

    #[test]
    fn test_missing_file_is_tagging_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.mp3");

        let err = Id3Tagger::new().tag(&path, &metadata()).unwrap_err();
        assert!(matches!(err, FetchError::Tagging { .. }));
    }

    #[test]
    fn test_unreadable_file_is_left_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let _ = Id3Tagger::new().tag(&path, &metadata());
        assert!(path.exists());
    }
}
