//! Client for the Yandex Practicum homework review API.
//!
//! [`PracticumClient`] wraps a pooled HTTP client, attaches the OAuth
//! header and a request timeout, and maps transport and protocol failures
//! into [`ApiError`]. Successful responses come back as raw JSON; the
//! business shape lives in `practicum-models` and is enforced there.
//!
//! ```no_run
//! use practicum_api::PracticumClient;
//!
//! # async fn example() -> practicum_api::Result<()> {
//! let client = PracticumClient::new("https://practicum.example/api/", "oauth-token")?;
//! let body = client.homework_statuses(0).await?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use client::PracticumClient;
pub use error::{ApiError, Result};
