use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulsecheck::checker::Checker;
use pulsecheck::config::Config;
use pulsecheck::models::Outcome;

#[derive(Parser)]
#[command(
    name = "pulsecheck",
    version,
    about = "Continuous HTTP URL prober with adaptive backoff polling",
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file (falls back to PULSECHECK_* env vars)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging (overrides the configured log level)
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;

    let format = cli
        .log_format
        .as_deref()
        .unwrap_or(&config.logging.format);
    setup_tracing(format, &config.logging.level, cli.verbose)?;

    tracing::info!(
        urls = config.checker.urls.len(),
        cadence = ?config.checker.cadence,
        base_delay_secs = config.checker.base_delay_secs,
        "pulsecheck starting"
    );

    let (checker, mut outcomes) = Checker::start(&config.checker)?;

    // Drain the outcome channel: successes are informational, failures
    // are warnings. The channel closes once every supervisor has stopped.
    let drain = tokio::spawn(async move {
        while let Some(outcome) = outcomes.recv().await {
            match &outcome {
                Outcome::Success { .. } => tracing::info!("{outcome}"),
                Outcome::Failure { .. } => tracing::warn!("{outcome}"),
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down...");

    checker.shutdown().await;
    drain.await?;

    tracing::info!("shut down successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::new(filter_directives(level, verbose));

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Build the env-filter directives from the configured level, with
/// `--verbose` forcing debug
fn filter_directives(level: &str, verbose: bool) -> String {
    if verbose {
        String::from("pulsecheck=debug,info")
    } else {
        format!("pulsecheck={level},warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_feeds_filter() {
        assert_eq!(filter_directives("info", false), "pulsecheck=info,warn");
        assert_eq!(filter_directives("trace", false), "pulsecheck=trace,warn");
    }

    #[test]
    fn test_verbose_overrides_configured_level() {
        assert_eq!(filter_directives("error", true), "pulsecheck=debug,info");
    }
}
