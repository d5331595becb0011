//! Telegram watcher for Practicum homework review statuses.
//!
//! Every cycle the watcher asks the Practicum API for homework records
//! whose status changed since the last delivered update, renders the
//! newest change as a human-readable message and pushes it to one
//! Telegram chat. Failures never kill the loop: they are logged,
//! announced in the same chat once per distinct condition, and retried
//! on the next cycle.
//!
//! Required environment (a local `.env` file is honored):
//!
//! - `PRACTICUM_TOKEN`: OAuth token for the Practicum API
//! - `PRACTICUM_API_URL`: base URL of the API
//! - `TELEGRAM_TOKEN`: bot token issued by BotFather
//! - `TELEGRAM_CHAT_ID`: chat that receives the notifications
//!
//! The binary wires [`Watcher`] to the real client and notifier; the
//! pieces stay generic so tests can script the feed and observe
//! deliveries.

pub mod config;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod watcher;

pub use config::{ConfigError, Settings};
pub use error::{FailureSignature, Result, WatchError};
pub use notifier::{Notify, NotifyError, TelegramNotifier};
pub use watcher::{CycleReport, StatusSource, WatchState, Watcher, DEFAULT_POLL_PERIOD};
