//! Error types for the pulsecheck crate
//!
//! Probe-level failures are never errors here: they become
//! [`crate::models::Outcome::Failure`] values on the outcome channel.
//! The only fatal errors are configuration problems caught before any
//! supervisor is spawned.

use std::io;
use thiserror::Error;

/// Configuration and startup errors
///
/// All of these abort startup; none of them can occur once polling is
/// running.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The URL list was empty
    #[error("URL list must contain at least one entry")]
    NoUrls,

    /// A configured URL is not an absolute HTTP/HTTPS URL
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A duration field was zero
    #[error("{field} must be a positive duration")]
    NonPositiveDuration { field: &'static str },

    /// The backoff coefficient was below 1
    #[error("backoff_coefficient must be at least 1")]
    CoefficientTooSmall,

    /// The delay ceiling was below the base delay
    #[error("max_delay must be greater than or equal to base_delay")]
    MaxDelayBelowBase,

    /// The outcome channel capacity was zero
    #[error("channel_capacity must be greater than 0")]
    ZeroChannelCapacity,

    /// HTTP client construction failed
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Config file could not be parsed
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A required environment variable was missing
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// An environment variable held an unparseable value
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Result type alias for configuration/startup paths
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NoUrls;
        assert_eq!(err.to_string(), "URL list must contain at least one entry");

        let err = ConfigError::InvalidUrl {
            url: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.to_string().contains("not a url"));

        let err = ConfigError::NonPositiveDuration { field: "base_delay" };
        assert!(err.to_string().contains("base_delay"));
    }
}
