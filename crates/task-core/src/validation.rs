//! Client-side form validation.
//!
//! The only invariant enforcement in the app; the REST backend remains the
//! source of truth. A validation failure means the request is never sent.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::{TaskCreate, TaskUpdate};

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 255;

/// A field-keyed validation message, rendered inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a creation payload against the current time.
///
/// `now` is passed in rather than read from the clock so the due-date rule
/// is testable.
pub fn validate_create(input: &TaskCreate, now: DateTime<Utc>) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_title(&input.title, &mut errors);
    check_due_date(input.due_date, now, &mut errors);
    check_notification(input.notification_time_before, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a partial-update payload; absent fields are not checked.
pub fn validate_update(input: &TaskUpdate, now: DateTime<Utc>) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Some(ref title) = input.title {
        check_title(title, &mut errors);
    }
    check_due_date(input.due_date, now, &mut errors);
    check_notification(input.notification_time_before, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) {
    if title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    } else if title.chars().count() > TITLE_MAX_LEN {
        errors.push(FieldError::new(
            "title",
            format!("Title must be {} characters or less", TITLE_MAX_LEN),
        ));
    }
}

fn check_due_date(due_date: Option<DateTime<Utc>>, now: DateTime<Utc>, errors: &mut Vec<FieldError>) {
    if let Some(due) = due_date {
        if due < now {
            errors.push(FieldError::new("due_date", "Due date must be in the future"));
        }
    }
}

fn check_notification(minutes: Option<i64>, errors: &mut Vec<FieldError>) {
    if let Some(minutes) = minutes {
        if minutes < 0 {
            errors.push(FieldError::new(
                "notification_time_before",
                "Notification time must be non-negative",
            ));
        }
    }
}
