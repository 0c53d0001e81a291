//! Utility modules for common functionality
//!
//! - `logging`: Logging configuration and setup
//! - `progress`: Spinner shown while a download runs

pub mod logging;
pub mod progress;
