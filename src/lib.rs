//! pulsecheck - continuous HTTP URL prober
//!
//! Probes a fixed set of URLs over HTTP and reports each probe's outcome
//! while adapting its polling cadence to observed health: steady-state
//! polling at a configured interval, exponential backoff with jitter on
//! failures capped at a maximum delay, and reset to the base interval on
//! recovery.
//!
//! # Architecture
//!
//! - [`config`] - Configuration loading and validation
//! - [`checker`] - Orchestrator, per-URL supervisors, probe and backoff state
//! - [`models`] - Probe outcome types
//! - [`error`] - Configuration/startup errors
//!
//! # Example
//!
//! ```no_run
//! use pulsecheck::checker::Checker;
//! use pulsecheck::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let (checker, mut outcomes) = Checker::start(&config.checker)?;
//!
//!     let drain = tokio::spawn(async move {
//!         while let Some(outcome) = outcomes.recv().await {
//!             println!("{outcome}");
//!         }
//!     });
//!
//!     tokio::signal::ctrl_c().await?;
//!     checker.shutdown().await;
//!     drain.await?;
//!     Ok(())
//! }
//! ```

pub mod checker;
pub mod config;
pub mod error;
pub mod models;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::checker::{Checker, Prober, RateState};
    pub use crate::config::{CadenceMode, CheckerConfig, Config};
    pub use crate::error::ConfigError;
    pub use crate::models::{ErrorClass, Outcome};
}

// Direct re-exports for convenience
pub use models::{ErrorClass, Outcome};
