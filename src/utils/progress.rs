use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::core::Service;

/// Spinner shown while an external tool or API call runs
pub struct ProgressUtils;

impl ProgressUtils {
    pub fn create_fetch_spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("valid spinner template"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}

pub struct ProgressMessages;

impl ProgressMessages {
    pub fn fetching(service: Service, input: &str) -> String {
        match service {
            Service::Unrecognized => format!("🔍 Searching YouTube for: {}", input),
            _ => format!("⬇️  Fetching from {}: {}", service, input),
        }
    }
}
