//! Core data types for probe outcomes
//!
//! Every probe attempt produces exactly one [`Outcome`]: either a response
//! was received (any status code counts as a `Success`) or the request
//! failed at the transport level, in which case the failure is classified
//! into an [`ErrorClass`].

use std::fmt;
use std::time::Duration;

/// Classification of a failed probe
///
/// The class drives nothing inside the probe itself; it exists so that
/// consumers (and the backoff logic) can distinguish retry-worthy
/// conditions from permanent ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The per-request timeout fired before headers arrived
    Timeout,
    /// Transient network condition (connection refused/reset, DNS flake)
    Temporary,
    /// Anything else, including redirect-loop exhaustion and protocol errors
    Other,
}

impl ErrorClass {
    /// Short label used when no error detail is available
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "Timeout",
            Self::Temporary => "Temporary",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one probe attempt
///
/// The URL is always present. Latency is only meaningful on `Success`:
/// it is the wall-clock time from just before the request was issued to
/// the moment response headers were received.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A response was received, whatever its status code
    Success {
        url: String,
        status: u16,
        latency: Duration,
    },
    /// The request failed before a response could be received
    Failure {
        url: String,
        class: ErrorClass,
        detail: Option<String>,
    },
}

impl Outcome {
    /// The URL this outcome belongs to
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success {
                url,
                status,
                latency,
            } => write!(
                f,
                "URL: {url}, Response Time: {}ms, StatusCode: {status}",
                latency.as_millis()
            ),
            Self::Failure { url, class, detail } => {
                let message = detail.as_deref().unwrap_or_else(|| class.as_str());
                write!(f, "URL: {url}, Error: {message}")
            }
        }
    }
}
