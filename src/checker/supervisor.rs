//! Per-URL polling supervisor
//!
//! Each supervisor owns one URL's lifecycle: probe, advance the rate
//! state, emit the outcome, sleep, repeat. Cancellation is cooperative:
//! the shutdown watch channel is checked before every iteration, and both
//! the outcome send and the inter-probe sleep race against it, so
//! shutdown latency is bounded by one in-flight request rather than a
//! full backoff interval.

use std::sync::Arc;

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    RateLimiter,
};
use tokio::sync::{mpsc, watch};

use crate::checker::probe::Prober;
use crate::checker::rate::RateState;
use crate::models::Outcome;

/// Shared token-bucket limiter used in fixed-cadence mode
pub(crate) type SharedLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Pacing source for one supervisor
///
/// Exactly one of these drives the cadence; an adaptive supervisor never
/// constructs a limiter and a fixed supervisor never consults backoff
/// state.
pub(crate) enum Cadence {
    /// Backoff-driven: sleep for the current rate-state delay after each
    /// report
    Adaptive(RateState),
    /// Token-bucket: wait for a permit before each probe; the bucket is
    /// shared across all supervisors
    Fixed(SharedLimiter),
}

pub(crate) struct Supervisor {
    pub(crate) url: String,
    pub(crate) prober: Arc<Prober>,
    pub(crate) cadence: Cadence,
    pub(crate) outcomes: mpsc::Sender<Outcome>,
    pub(crate) shutdown: watch::Receiver<bool>,
}

impl Supervisor {
    /// Run the polling loop until cancelled
    ///
    /// Returning from this future is the supervisor's completion signal;
    /// the checker joins the task handle during shutdown.
    pub(crate) async fn run(mut self) {
        loop {
            if *self.shutdown.borrow() {
                break;
            }

            if let Cadence::Fixed(limiter) = &self.cadence {
                let limiter = Arc::clone(limiter);
                tokio::select! {
                    _ = limiter.until_ready() => {}
                    _ = self.shutdown.changed() => break,
                }
            }

            let outcome = self.prober.probe(&self.url).await;
            let success = outcome.is_success();

            if let Cadence::Adaptive(rate) = &mut self.cadence {
                rate.advance(success);
            }

            // A blocked send is intentional backpressure: a slow consumer
            // slows the supervisor instead of dropping outcomes.
            tokio::select! {
                sent = self.outcomes.send(outcome) => {
                    if sent.is_err() {
                        tracing::debug!(url = %self.url, "outcome channel closed, stopping");
                        break;
                    }
                }
                _ = self.shutdown.changed() => break,
            }

            if let Cadence::Adaptive(rate) = &self.cadence {
                let delay = rate.current();
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = self.shutdown.changed() => break,
                }
            }
        }

        tracing::debug!(url = %self.url, "stopped monitoring");
    }
}
