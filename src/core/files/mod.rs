//! File operations on produced audio
//!
//! - Filename sanitization for titles reported by the extractor
//! - ID3 tagging of downloaded MP3s

pub mod sanitize;
pub mod tagger;

pub use sanitize::sanitize_filename;
pub use tagger::{Id3Tagger, Tagger};
