//! Common test utilities

use pulsecheck::config::{CadenceMode, CheckerConfig};

/// Build a checker config suitable for fast integration tests
pub fn test_checker_config(urls: Vec<String>) -> CheckerConfig {
    CheckerConfig {
        urls,
        base_delay_secs: 1,
        backoff_coefficient: 2,
        max_delay_secs: 8,
        request_timeout_secs: 2,
        channel_capacity: 16,
        cadence: CadenceMode::Adaptive,
    }
}

/// Same config with a long base delay, for shutdown-latency tests
#[allow(dead_code)]
pub fn slow_checker_config(urls: Vec<String>) -> CheckerConfig {
    CheckerConfig {
        base_delay_secs: 30,
        max_delay_secs: 60,
        ..test_checker_config(urls)
    }
}
