//! Validated homework-status pages.
//!
//! The API client hands the decoded response body over untouched; this
//! module enforces the business shape in layers. Container checks run
//! first (object, `current_date`, `homeworks`), then every array element
//! is turned into a [`HomeworkRecord`] with its own field checks.

use serde_json::Value;

use crate::error::{Result, ValidationError};
use crate::homework::HomeworkRecord;

/// One successfully validated poll of the homework-status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPage {
    /// Homework records in the order the API returned them.
    pub homeworks: Vec<HomeworkRecord>,
    /// Remote clock at response time; becomes the next poll's lower bound.
    pub current_date: u64,
}

impl StatusPage {
    /// Validates a raw response body and converts it into a page.
    ///
    /// Checks run in a fixed order and fail on the first violation: the
    /// body must be an object, `current_date` a non-negative integer,
    /// `homeworks` an array of objects, and each element must satisfy
    /// [`HomeworkRecord::from_value`].
    pub fn from_value(raw: &Value) -> Result<Self> {
        let object = raw
            .as_object()
            .ok_or_else(|| ValidationError::NotAnObject(json_type_name(raw)))?;

        let current_date = match object.get("current_date") {
            None => return Err(ValidationError::MissingField("current_date")),
            Some(value) => value.as_u64().ok_or_else(|| ValidationError::InvalidField {
                field: "current_date",
                reason: format!("expected a non-negative integer, got {value}"),
            })?,
        };

        let elements = match object.get("homeworks") {
            None => return Err(ValidationError::MissingField("homeworks")),
            Some(value) => value.as_array().ok_or_else(|| ValidationError::InvalidField {
                field: "homeworks",
                reason: format!("expected an array, got {}", json_type_name(value)),
            })?,
        };

        let homeworks = elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                if !element.is_object() {
                    return Err(ValidationError::InvalidField {
                        field: "homeworks",
                        reason: format!("element #{index} is not an object"),
                    });
                }
                HomeworkRecord::from_value(index, element)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            homeworks,
            current_date,
        })
    }

    /// The record with the numerically largest id, if any.
    ///
    /// Ids grow with submission time, so this is the newest change on the
    /// page. Only that record is announced per cycle; older entries on the
    /// same page are dropped.
    pub fn latest(&self) -> Option<&HomeworkRecord> {
        self.homeworks.iter().max_by_key(|homework| homework.id)
    }

    /// True when the page carries no homework records.
    pub fn is_empty(&self) -> bool {
        self.homeworks.is_empty()
    }
}

/// Human name of a JSON value's type, for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
