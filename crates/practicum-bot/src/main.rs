//! Practicum homework watcher binary.
//!
//! Start the watcher with:
//! ```bash
//! PRACTICUM_TOKEN=xxx PRACTICUM_API_URL=xxx TELEGRAM_TOKEN=xxx \
//!   TELEGRAM_CHAT_ID=xxx cargo run -p practicum-bot
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use practicum_api::PracticumClient;
use practicum_bot::config::Settings;
use practicum_bot::logging;
use practicum_bot::notifier::TelegramNotifier;
use practicum_bot::watcher::{WatchState, Watcher, DEFAULT_POLL_PERIOD};
use tokio::sync::watch;
use tracing::{error, info};

/// Practicum homework watcher - homework review statuses as Telegram pings
#[derive(Parser, Debug)]
#[command(name = "practicum-bot")]
#[command(about = "Relay Practicum homework review statuses to a Telegram chat")]
struct Args {
    /// Seconds between polls of the homework-status endpoint
    #[arg(
        long,
        default_value_t = DEFAULT_POLL_PERIOD.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval: u64,

    /// Start from the current time instead of replaying the latest status
    #[arg(long)]
    from_now: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Populate the environment from .env before anything reads it.
    let _ = dotenvy::dotenv();

    logging::init(args.verbose)?;

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "refusing to start without required configuration");
            return Err(e.into());
        }
    };

    let client = PracticumClient::new(&settings.practicum_api_url, &settings.practicum_token)?;
    let notifier = TelegramNotifier::new(&settings)?;

    let watermark = if args.from_now { unix_now() } else { 0 };
    let watcher = Watcher::new(
        client,
        notifier,
        Duration::from_secs(args.interval),
        WatchState::starting_at(watermark),
    );

    info!(
        chat_id = settings.telegram_chat_id,
        interval_secs = args.interval,
        watermark,
        "starting practicum watcher"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(watcher.run(shutdown_rx));

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");

    shutdown_tx.send(true)?;
    handle.await?;

    Ok(())
}

/// Current Unix time in seconds.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_is_rejected_at_parse_time() {
        // tokio::time::interval panics on a zero period, so the CLI must
        // refuse the value before a watcher is ever built.
        let err = Args::try_parse_from(["practicum-bot", "--interval", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_interval_defaults_and_overrides() {
        let args = Args::try_parse_from(["practicum-bot"]).unwrap();
        assert_eq!(args.interval, DEFAULT_POLL_PERIOD.as_secs());
        assert!(!args.from_now);
        assert_eq!(args.verbose, 0);

        let args =
            Args::try_parse_from(["practicum-bot", "--interval", "10", "--from-now", "-vv"])
                .unwrap();
        assert_eq!(args.interval, 10);
        assert!(args.from_now);
        assert_eq!(args.verbose, 2);
    }
}
