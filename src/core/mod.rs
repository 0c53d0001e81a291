//! Core functionality modules
//!
//! - `classifier`: maps an input string to the service it belongs to
//! - `dispatcher`: runs the download routine for a classified input
//! - `services`: external collaborators (yt-dlp, Spotify Web API, scdl)
//! - `files`: filename sanitization and tagging of produced files
//! - `models`: data passed between the routines

pub mod classifier;
pub mod dispatcher;
pub mod files;
pub mod models;
pub mod services;

pub use classifier::Service;
pub use dispatcher::Dispatcher;
