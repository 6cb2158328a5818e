//! URL checker orchestration
//!
//! The [`Checker`] spawns one [`Supervisor`](supervisor) task per
//! configured URL. All supervisors share a single bounded outcome channel
//! (multi-producer, one consumer) and a single watch-based cancellation
//! signal; each owns its private rate state. Outcomes from different URLs
//! interleave arbitrarily; outcomes for one URL are strictly FIFO.
//!
//! The core never logs outcomes. The receiver returned by
//! [`Checker::start`] is the injected sink: whoever drains it decides
//! what to do with each outcome.

pub mod probe;
pub mod rate;
pub mod supervisor;

pub use probe::{Prober, MAX_REDIRECTS};
pub use rate::RateState;

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{Quota, RateLimiter};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::{CadenceMode, CheckerConfig};
use crate::error::ConfigError;
use crate::models::Outcome;
use supervisor::{Cadence, SharedLimiter, Supervisor};

/// Handle to a running set of URL supervisors
///
/// Dropping the handle without calling [`shutdown`](Checker::shutdown)
/// leaves the supervisors polling until the outcome receiver is dropped.
pub struct Checker {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl Checker {
    /// Validate the configuration and start one supervisor per URL
    ///
    /// Returns the checker handle and the receiving end of the shared
    /// outcome channel. The channel only closes after every supervisor
    /// has stopped, so a consumer can safely drain until `recv` yields
    /// `None` once `shutdown` has returned.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if validation fails or the HTTP client
    /// cannot be built; no task is spawned in that case.
    pub fn start(config: &CheckerConfig) -> Result<(Self, mpsc::Receiver<Outcome>), ConfigError> {
        config.validate()?;

        let prober = Arc::new(Prober::new(config.request_timeout())?);
        let (outcome_tx, outcome_rx) = mpsc::channel(config.channel_capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let limiter: Option<SharedLimiter> = match config.cadence {
            CadenceMode::Adaptive => None,
            CadenceMode::Fixed => {
                let quota = Quota::with_period(config.base_delay())
                    .ok_or(ConfigError::NonPositiveDuration { field: "base_delay" })?
                    .allow_burst(NonZeroU32::MIN);
                Some(Arc::new(RateLimiter::direct(quota)))
            }
        };

        let handles = config
            .urls
            .iter()
            .map(|url| {
                let cadence = match &limiter {
                    Some(limiter) => Cadence::Fixed(Arc::clone(limiter)),
                    None => Cadence::Adaptive(RateState::new(
                        config.base_delay(),
                        config.backoff_coefficient,
                        config.max_delay(),
                    )),
                };

                let supervisor = Supervisor {
                    url: url.clone(),
                    prober: Arc::clone(&prober),
                    cadence,
                    outcomes: outcome_tx.clone(),
                    shutdown: shutdown_rx.clone(),
                };

                tokio::spawn(supervisor.run())
            })
            .collect();

        // The supervisors hold the only senders; once they all stop the
        // channel closes and the consumer's recv() returns None.
        drop(outcome_tx);

        Ok((
            Self {
                shutdown: shutdown_tx,
                handles,
            },
            outcome_rx,
        ))
    }

    /// Number of supervisors still owned by this handle
    pub fn supervisor_count(&self) -> usize {
        self.handles.len()
    }

    /// Trigger cancellation and wait for every supervisor to stop
    ///
    /// The signal is broadcast once; supervisors mid-sleep wake
    /// immediately rather than sleeping out their backoff interval. An
    /// in-flight request runs to completion (or its own timeout) first.
    /// No outcome is emitted after this returns.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);

        for handle in self.handles.drain(..) {
            let _ = handle.await;
        }
    }
}
