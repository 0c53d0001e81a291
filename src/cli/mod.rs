//! Command Line Interface module
//!
//! A single operation: read one URL or search query and fetch it.

pub mod fetch;
