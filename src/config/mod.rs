//! Configuration management for pulsecheck
//!
//! Configuration is loaded once at startup, from a TOML file or from
//! environment variables, validated, and never mutated afterwards.
//! Durations are expressed in whole seconds in the file/environment and
//! exposed as [`Duration`] through accessor methods.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// How a supervisor paces its probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CadenceMode {
    /// Backoff-driven pacing: base delay, multiplied on failure, reset on
    /// success (the canonical mode)
    #[default]
    Adaptive,
    /// Token-bucket pacing: requests evenly spaced at the base rate,
    /// shared across all URLs; failures do not change the cadence
    Fixed,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Checker configuration
    pub checker: CheckerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Checker-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// URLs to monitor (each must be an absolute HTTP/HTTPS URL)
    pub urls: Vec<String>,

    /// Steady-state polling interval in seconds
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: u64,

    /// Multiplicative backoff factor applied after a failure
    #[serde(default = "default_backoff_coefficient")]
    pub backoff_coefficient: u32,

    /// Ceiling on the backed-off polling interval, in seconds
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Outcome channel capacity (bounds memory under a slow consumer)
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Pacing mode for the supervisors
    #[serde(default)]
    pub cadence: CadenceMode,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn default_base_delay_secs() -> u64 {
    15
}

fn default_backoff_coefficient() -> u32 {
    2
}

fn default_max_delay_secs() -> u64 {
    // 15 minutes
    900
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_channel_capacity() -> usize {
    64
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// `PULSECHECK_URLS` is required (comma-separated); everything else
    /// falls back to its default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let urls = std::env::var("PULSECHECK_URLS")
            .map_err(|_| ConfigError::MissingEnv("PULSECHECK_URLS"))?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base_delay_secs =
            parse_env("PULSECHECK_BASE_DELAY_SECS", default_base_delay_secs())?;
        let backoff_coefficient =
            parse_env("PULSECHECK_BACKOFF_COEFFICIENT", default_backoff_coefficient())?;
        let max_delay_secs = parse_env("PULSECHECK_MAX_DELAY_SECS", default_max_delay_secs())?;
        let request_timeout_secs =
            parse_env("PULSECHECK_REQUEST_TIMEOUT_SECS", default_request_timeout_secs())?;
        let channel_capacity =
            parse_env("PULSECHECK_CHANNEL_CAPACITY", default_channel_capacity())?;

        let cadence = match std::env::var("PULSECHECK_CADENCE").ok().as_deref() {
            None | Some("adaptive") => CadenceMode::Adaptive,
            Some("fixed") => CadenceMode::Fixed,
            Some(other) => {
                return Err(ConfigError::InvalidEnv {
                    name: "PULSECHECK_CADENCE",
                    value: other.to_string(),
                })
            }
        };

        let level =
            std::env::var("PULSECHECK_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let format =
            std::env::var("PULSECHECK_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            checker: CheckerConfig {
                urls,
                base_delay_secs,
                backoff_coefficient,
                max_delay_secs,
                request_timeout_secs,
                channel_capacity,
                cadence,
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checker.validate()
    }
}

impl CheckerConfig {
    /// Validate checker configuration values
    ///
    /// Called again by [`crate::checker::Checker::start`], so a caller
    /// constructing the struct by hand cannot bypass validation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.urls.is_empty() {
            return Err(ConfigError::NoUrls);
        }

        for raw in &self.urls {
            match url::Url::parse(raw) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => {
                    return Err(ConfigError::InvalidUrl {
                        url: raw.clone(),
                        reason: format!("unsupported scheme {:?}", parsed.scheme()),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidUrl {
                        url: raw.clone(),
                        reason: e.to_string(),
                    })
                }
            }
        }

        if self.base_delay_secs == 0 {
            return Err(ConfigError::NonPositiveDuration { field: "base_delay" });
        }

        if self.max_delay_secs == 0 {
            return Err(ConfigError::NonPositiveDuration { field: "max_delay" });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::NonPositiveDuration {
                field: "request_timeout",
            });
        }

        if self.backoff_coefficient < 1 {
            return Err(ConfigError::CoefficientTooSmall);
        }

        if self.max_delay_secs < self.base_delay_secs {
            return Err(ConfigError::MaxDelayBelowBase);
        }

        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }

        Ok(())
    }

    /// Get base delay as Duration
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        Duration::from_secs(self.base_delay_secs)
    }

    /// Get max delay as Duration
    #[must_use]
    pub fn max_delay(&self) -> Duration {
        Duration::from_secs(self.max_delay_secs)
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { name, value }),
        Err(_) => Ok(default),
    }
}
