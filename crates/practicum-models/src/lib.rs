//! Data model for Practicum homework review statuses.
//!
//! The API client in `practicum-api` returns raw JSON bodies; this crate
//! owns the rules for turning them into typed values:
//!
//! - [`StatusPage`] validates the response container and wraps the record
//!   list together with the server clock.
//! - [`HomeworkRecord`] validates one element of the `homeworks` array and
//!   renders the notification text for it.
//! - [`HomeworkStatus`] is the closed set of review states and their
//!   human-readable verdicts.
//!
//! Validation is layered on purpose: container violations and record
//! violations produce distinct [`ValidationError`] variants so callers can
//! tell a malformed feed from a single bad record.

pub mod error;
pub mod homework;
pub mod page;

pub use error::{Result, ValidationError};
pub use homework::{HomeworkRecord, HomeworkStatus};
pub use page::StatusPage;
