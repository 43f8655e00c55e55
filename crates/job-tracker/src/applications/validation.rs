//! Field rules applied to inbound job application bodies before the service sees them.
//!
//! Decoding and validation are separate steps: the body is first read into a
//! [`JobApplicationPayload`] whose fields are all optional text, then
//! [`JobApplicationValidator`] checks every field independently and only builds a
//! [`NewJobApplication`] when no rule failed.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationStatus, NewJobApplication};

const MIN_TEXT_LEN: usize = 2;
const MAX_TEXT_LEN: usize = 100;

const FUTURE_DATE_MESSAGE: &str = "Date cannot be in the future";

/// Job application body as received on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobApplicationPayload {
    pub id: Option<i64>,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub status: Option<StatusInput>,
    pub date_applied: Option<String>,
}

/// Status as sent by the client: a name, or the zero-based position in
/// [`ApplicationStatus::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusInput {
    Name(String),
    Ordinal(i64),
}

impl From<&str> for StatusInput {
    fn from(value: &str) -> Self {
        StatusInput::Name(value.to_string())
    }
}

/// A single failed rule, keyed by the wire name of the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    fn new(field: &str, error: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            error: error.into(),
        }
    }
}

/// Every rule that failed for one payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} validation error(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Messages recorded against one field, in rule order.
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |error| error.field == field)
            .map(|error| error.error.as_str())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JobApplicationValidator;

impl JobApplicationValidator {
    pub fn new() -> Self {
        Self
    }

    /// Run every rule against the payload. `today` is the calendar date used for the
    /// future-date rule.
    pub fn validate(&self, payload: &JobApplicationPayload, today: NaiveDate) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_text(
            &mut errors,
            "companyName",
            "Company Name",
            payload.company_name.as_deref(),
        );
        check_text(
            &mut errors,
            "position",
            "Position",
            payload.position.as_deref(),
        );
        if let Err(error) = resolve_status(payload.status.as_ref()) {
            errors.push(error);
        }
        if let Err(error) = resolve_date(payload.date_applied.as_deref(), today) {
            errors.push(error);
        }
        errors
    }

    /// Validate and, when every rule passes, convert into a typed draft.
    pub fn into_draft(
        &self,
        payload: JobApplicationPayload,
        today: NaiveDate,
    ) -> Result<NewJobApplication, ValidationErrors> {
        let errors = self.validate(&payload, today);
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        let status = resolve_status(payload.status.as_ref())
            .map_err(|error| ValidationErrors(vec![error]))?;
        let date_applied = resolve_date(payload.date_applied.as_deref(), today)
            .map_err(|error| ValidationErrors(vec![error]))?;

        Ok(NewJobApplication {
            company_name: payload.company_name.unwrap_or_default(),
            position: payload.position.unwrap_or_default(),
            status,
            date_applied,
        })
    }
}

fn check_text(errors: &mut Vec<FieldError>, field: &str, label: &str, value: Option<&str>) {
    let Some(value) = value else {
        errors.push(FieldError::new(field, format!("{label} value is required")));
        return;
    };

    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} value is required")));
    }
    let len = value.chars().count();
    if len < MIN_TEXT_LEN {
        errors.push(FieldError::new(
            field,
            format!("{label} must be at least {MIN_TEXT_LEN} characters long."),
        ));
    }
    if len > MAX_TEXT_LEN {
        errors.push(FieldError::new(
            field,
            format!("{label} should not exceed {MAX_TEXT_LEN} characters."),
        ));
    }
}

fn status_message() -> String {
    let names: Vec<&str> = ApplicationStatus::ALL
        .iter()
        .map(|status| status.label())
        .collect();
    format!("Status must be one of the following: {}.", names.join(", "))
}

// An absent status falls back to `Applied`.
fn resolve_status(raw: Option<&StatusInput>) -> Result<ApplicationStatus, FieldError> {
    let resolved = match raw {
        None => return Ok(ApplicationStatus::default()),
        Some(StatusInput::Name(value)) => value.parse::<ApplicationStatus>().ok(),
        Some(StatusInput::Ordinal(position)) => usize::try_from(*position)
            .ok()
            .and_then(|index| ApplicationStatus::ALL.get(index).copied()),
    };
    resolved.ok_or_else(|| FieldError::new("status", status_message()))
}

fn resolve_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(FieldError::new("dateApplied", "Date Applied value is required"));
    }
    let date = parse_calendar_date(raw)
        .ok_or_else(|| FieldError::new("dateApplied", "Date Applied must be a valid date."))?;
    if date > today {
        return Err(FieldError::new("dateApplied", FUTURE_DATE_MESSAGE));
    }
    Ok(date)
}

/// Read a calendar date from `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive ISO
/// date-time. Time-of-day is discarded.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}
