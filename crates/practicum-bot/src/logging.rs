//! Logging bootstrap: console output always, a log file in production.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the deployment flavor.
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Log file appended to alongside console output in production.
pub const LOG_FILE: &str = "practicum-watch.log";

/// Installs the global subscriber.
///
/// `verbosity` comes from repeated `-v` flags. When `APP_ENV=production`
/// the same records are also appended to [`LOG_FILE`], without ANSI
/// escapes so the file stays grep-friendly.
pub fn init(verbosity: u8) -> io::Result<()> {
    let filter = EnvFilter::try_new(filter_directives(verbosity))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = if production() {
        let file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}

/// Filter directives for the given `-v` count.
///
/// Third-party chatter stays one level quieter than our own crates.
fn filter_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "practicum_bot=info,practicum_api=info",
        1 => "practicum_bot=debug,practicum_api=debug,teloxide=info,reqwest=info",
        2 => "practicum_bot=trace,practicum_api=trace,teloxide=debug,reqwest=debug",
        _ => "trace",
    }
}

/// True when `APP_ENV` asks for the production setup.
fn production() -> bool {
    std::env::var(APP_ENV_VAR).map(|v| v == "production").unwrap_or(false)
}
