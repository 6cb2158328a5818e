//! Single-shot HTTP probe
//!
//! One GET per call, redirects bounded at [`MAX_REDIRECTS`], no retries.
//! Every request-level failure becomes an [`Outcome::Failure`]; the probe
//! itself never returns an error once the client is built. Retry policy
//! lives entirely in the rate controller and supervisor.

use std::time::{Duration, Instant};

use reqwest::{redirect, Client};

use crate::error::ConfigError;
use crate::models::{ErrorClass, Outcome};

/// Maximum number of redirect hops followed before giving up
pub const MAX_REDIRECTS: usize = 10;

/// Stateless HTTP prober
///
/// Holds one configured [`Client`]; the client carries the per-request
/// timeout and the redirect limit, so `probe` needs nothing beyond the URL.
pub struct Prober {
    client: Client,
}

impl Prober {
    /// Create a prober with the given per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::HttpClient` if the client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("pulsecheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Issue one GET and classify the result
    ///
    /// Latency is measured from just before the request is issued to the
    /// moment response headers are received. Any received status code,
    /// 4xx and 5xx included, is a `Success` carrying that code.
    pub async fn probe(&self, url: &str) -> Outcome {
        let started = Instant::now();

        match self.client.get(url).send().await {
            Ok(response) => Outcome::Success {
                url: url.to_string(),
                status: response.status().as_u16(),
                latency: started.elapsed(),
            },
            Err(err) => {
                let class = classify(&err);
                let detail = if err.is_redirect() {
                    format!("stopped after {MAX_REDIRECTS} redirects")
                } else {
                    err.to_string()
                };

                Outcome::Failure {
                    url: url.to_string(),
                    class,
                    detail: Some(detail),
                }
            }
        }
    }
}

/// Classify a transport-level error
///
/// Timeout beats everything else; redirect-loop exhaustion and anything
/// unrecognized fall into `Other`. The source chain is walked for I/O
/// errors so that a connection reset surfacing below hyper still counts
/// as `Temporary`.
fn classify(err: &reqwest::Error) -> ErrorClass {
    if err.is_timeout() {
        return ErrorClass::Timeout;
    }

    if err.is_redirect() {
        return ErrorClass::Other;
    }

    if err.is_connect() {
        return ErrorClass::Temporary;
    }

    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
            return match io_err.kind() {
                std::io::ErrorKind::TimedOut => ErrorClass::Timeout,
                std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::ConnectionAborted
                | std::io::ErrorKind::ConnectionRefused
                | std::io::ErrorKind::BrokenPipe => ErrorClass::Temporary,
                _ => ErrorClass::Other,
            };
        }
        source = cause.source();
    }

    ErrorClass::Other
}
