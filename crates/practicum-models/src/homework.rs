//! Homework records and their human-readable verdicts.

use serde_json::Value;

use crate::error::{Result, ValidationError};

/// Review status of a submitted homework.
///
/// The set is closed: the API contract defines exactly these three states,
/// and anything else is a data error surfaced when the record is turned
/// into a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    /// The reviewer accepted the work.
    Approved,
    /// The work has been picked up for review.
    Reviewing,
    /// The reviewer returned the work with comments.
    Rejected,
}

impl HomeworkStatus {
    /// Parses a raw status string. Case-sensitive, no trimming.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }

    /// The verdict line shown to the user for this status.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Reviewed: the reviewer liked everything. Success!",
            Self::Reviewing => "Work has been taken up for review.",
            Self::Rejected => "Reviewed: the reviewer has comments.",
        }
    }
}

/// One submission's review state as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    /// Remote-assigned identifier; larger means newer.
    pub id: u64,

    /// Raw review status, validated against [`HomeworkStatus`] only when a
    /// notification is rendered.
    pub status: String,

    /// Human label of the submission.
    pub homework_name: String,

    /// Reviewer's comment, empty when none was left.
    pub reviewer_comment: String,

    /// Timestamp of the last status change, as formatted by the remote.
    pub date_updated: Option<String>,

    /// Lesson this homework belongs to.
    pub lesson_name: Option<String>,
}

impl HomeworkRecord {
    /// Builds a record from one element of the `homeworks` array.
    ///
    /// `id`, `status` and `homework_name` are required and must be
    /// non-empty; the remaining fields default when absent. `index` is the
    /// element's position, used to point at the offending record in errors.
    pub fn from_value(index: usize, value: &Value) -> Result<Self> {
        let id = value
            .get("id")
            .and_then(Value::as_u64)
            .ok_or(ValidationError::Record { index, field: "id" })?;

        let status = non_empty_str(value, "status").ok_or(ValidationError::Record {
            index,
            field: "status",
        })?;

        let homework_name =
            non_empty_str(value, "homework_name").ok_or(ValidationError::Record {
                index,
                field: "homework_name",
            })?;

        Ok(Self {
            id,
            status: status.to_string(),
            homework_name: homework_name.to_string(),
            reviewer_comment: value
                .get("reviewer_comment")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            date_updated: value
                .get("date_updated")
                .and_then(Value::as_str)
                .map(str::to_string),
            lesson_name: value
                .get("lesson_name")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Parses the status and renders the notification line for this record.
    ///
    /// Fails with [`ValidationError::UnknownStatus`] before anything is
    /// sent, so an unrecognized status never produces a half-formed
    /// message.
    pub fn status_line(&self) -> Result<String> {
        let status = HomeworkStatus::parse(&self.status)?;
        Ok(format!(
            "Status changed for submission \"{}\". {}",
            self.homework_name,
            status.verdict()
        ))
    }
}

/// Returns the field as a non-empty string, if it is one.
fn non_empty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
