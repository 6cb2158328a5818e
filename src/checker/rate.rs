//! Adaptive-delay state for one URL
//!
//! Tracks the current polling delay and advances it on each outcome:
//! reset to the base delay on success, multiply by the backoff
//! coefficient (plus Gaussian jitter) on failure, clamped to
//! `[base, max]`. The state is private to one supervisor and needs no
//! synchronization.

use rand::distributions::Distribution;
use statrs::distribution::Normal;
use std::time::Duration;

/// Default jitter, as a fraction of the pre-jitter delay
const DEFAULT_JITTER_FRACTION: f64 = 0.1;

/// Per-URL backoff state
///
/// Invariant: `base <= current <= max` after every [`advance`] call
/// (when `base <= max`; a base at or above the ceiling collapses the
/// controller to a fixed cadence at the base delay).
///
/// [`advance`]: RateState::advance
#[derive(Debug, Clone)]
pub struct RateState {
    current: Duration,
    base: Duration,
    coefficient: u32,
    max: Duration,
    jitter_fraction: f64,
}

impl RateState {
    /// Create state starting at the base delay
    pub fn new(base: Duration, coefficient: u32, max: Duration) -> Self {
        Self {
            current: base,
            base,
            coefficient,
            max,
            jitter_fraction: DEFAULT_JITTER_FRACTION,
        }
    }

    /// Override the jitter fraction
    ///
    /// A fraction of 0 makes the delay sequence deterministic; tests rely
    /// on this.
    #[must_use]
    pub fn with_jitter_fraction(mut self, fraction: f64) -> Self {
        self.jitter_fraction = fraction;
        self
    }

    /// The delay the supervisor should sleep for next
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Advance the state with one outcome
    ///
    /// Success resets to the base delay regardless of prior value.
    /// Failure multiplies by the coefficient, adds zero-mean Gaussian
    /// jitter scaled by the jitter fraction of the pre-jitter magnitude,
    /// then clamps into `[base, max]` so jitter can never push the delay
    /// negative or below base.
    pub fn advance(&mut self, success: bool) {
        if success {
            self.current = self.base;
            return;
        }

        let raw = self.current.as_secs_f64() * f64::from(self.coefficient);
        let jittered = raw + self.jitter(raw);
        let clamped = jittered
            .min(self.max.as_secs_f64())
            .max(self.base.as_secs_f64());

        self.current = Duration::from_secs_f64(clamped);
    }

    /// Sample zero-mean Gaussian jitter with sigma proportional to the
    /// pre-jitter delay
    fn jitter(&self, magnitude: f64) -> f64 {
        let sigma = self.jitter_fraction * magnitude;
        if sigma <= 0.0 {
            return 0.0;
        }

        match Normal::new(0.0, sigma) {
            Ok(normal) => normal.sample(&mut rand::thread_rng()),
            Err(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jitterless(base: u64, coefficient: u32, max: u64) -> RateState {
        RateState::new(
            Duration::from_secs(base),
            coefficient,
            Duration::from_secs(max),
        )
        .with_jitter_fraction(0.0)
    }

    #[test]
    fn test_failure_sequence_reaches_and_holds_ceiling() {
        // coefficient=2, base=1s, max=8s: expect 1,2,4,8,8,...
        let mut state = jitterless(1, 2, 8);
        assert_eq!(state.current(), Duration::from_secs(1));

        let expected = [2, 4, 8, 8, 8];
        for secs in expected {
            state.advance(false);
            assert_eq!(state.current(), Duration::from_secs(secs));
        }
    }

    #[test]
    fn test_success_resets_to_base() {
        let mut state = jitterless(1, 2, 60);
        for _ in 0..5 {
            state.advance(false);
        }
        assert!(state.current() > Duration::from_secs(1));

        state.advance(true);
        assert_eq!(state.current(), Duration::from_secs(1));
    }

    #[test]
    fn test_bounds_hold_under_jitter() {
        let base = Duration::from_secs(1);
        let max = Duration::from_secs(30);
        let mut state = RateState::new(base, 2, max);

        for i in 0..1000 {
            // Mix failures with occasional successes
            state.advance(i % 7 == 0);
            assert!(state.current() >= base, "delay fell below base: {:?}", state.current());
            assert!(state.current() <= max, "delay exceeded max: {:?}", state.current());
        }
    }

    #[test]
    fn test_coefficient_one_without_jitter_holds_delay() {
        let mut state = jitterless(5, 1, 60);
        for _ in 0..10 {
            state.advance(false);
            assert_eq!(state.current(), Duration::from_secs(5));
        }
    }

    #[test]
    fn test_base_at_or_above_max_collapses_to_fixed_cadence() {
        let mut state = jitterless(10, 2, 10);
        for _ in 0..5 {
            state.advance(false);
            assert_eq!(state.current(), Duration::from_secs(10));
        }
    }

    #[test]
    fn test_jitter_stays_near_deterministic_value() {
        // One failure from base 10s with coefficient 2: pre-jitter delay is
        // 20s, sigma is 2s. Six sigma gives astronomically safe bounds.
        for _ in 0..100 {
            let mut state = RateState::new(Duration::from_secs(10), 2, Duration::from_secs(600));
            state.advance(false);
            let secs = state.current().as_secs_f64();
            assert!((8.0..=32.0).contains(&secs), "jittered delay out of range: {secs}");
        }
    }
}
