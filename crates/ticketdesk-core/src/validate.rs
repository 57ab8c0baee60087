//! Field validation for ticket candidates.
//!
//! Each field has a pure validator returning either the normalized value or a
//! human-readable message. [`validate`] runs all of them and collects every
//! failure into [`FieldErrors`], so a form can highlight all bad fields at once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::{Priority, Status};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A validated ticket field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Description,
    Status,
    Priority,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from field to the message describing why it was rejected.
///
/// Serializes as a flat JSON object, e.g. `{"title": "Title is required"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Raw, unvalidated ticket fields as submitted by a form or command line.
///
/// `status` and `priority` are kept as text so malformed values can be
/// reported per field instead of failing the whole submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl TicketInput {
    pub fn new(title: impl Into<String>, status: Status) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: Some(status.as_str().to_string()),
            priority: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority.as_str().to_string());
        self
    }
}

/// Normalized fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub title: String,
    pub description: String,
    pub status: Status,
    /// `None` when the candidate did not specify a priority.
    pub priority: Option<Priority>,
}

/// Trim and bound-check a title.
pub fn validate_title(raw: &str) -> Result<String, String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title must be {MAX_TITLE_LEN} characters or less"));
    }
    Ok(title.to_string())
}

/// Trim and bound-check an optional description. Absent becomes empty.
pub fn validate_description(raw: Option<&str>) -> Result<String, String> {
    let description = raw.map(str::trim).unwrap_or_default();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "Description must be {MAX_DESCRIPTION_LEN} characters or less"
        ));
    }
    Ok(description.to_string())
}

/// Parse a required status.
pub fn validate_status(raw: Option<&str>) -> Result<Status, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Err("Status is required".to_string()),
        Some(value) => value
            .parse()
            .map_err(|_| "Status must be one of open, in_progress, closed".to_string()),
    }
}

/// Parse an optional priority. Blank is treated as absent.
pub fn validate_priority(raw: Option<&str>) -> Result<Option<Priority>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| "Priority must be one of low, medium, high".to_string()),
    }
}

/// Validate every field of `input`, collecting all failures.
pub fn validate(input: &TicketInput) -> Result<ValidatedFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = validate_title(&input.title)
        .map_err(|msg| errors.insert(Field::Title, msg))
        .ok();
    let description = validate_description(input.description.as_deref())
        .map_err(|msg| errors.insert(Field::Description, msg))
        .ok();
    let status = validate_status(input.status.as_deref())
        .map_err(|msg| errors.insert(Field::Status, msg))
        .ok();
    let priority = validate_priority(input.priority.as_deref())
        .map_err(|msg| errors.insert(Field::Priority, msg))
        .ok();

    match (title, description, status, priority) {
        (Some(title), Some(description), Some(status), Some(priority)) if errors.is_empty() => {
            Ok(ValidatedFields {
                title,
                description,
                status,
                priority,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> TicketInput {
        TicketInput::new(title, Status::Open)
    }

    #[test]
    fn accepts_title_of_exactly_max_len() {
        let title = "a".repeat(MAX_TITLE_LEN);
        let fields = validate(&input(&title)).expect("100 chars is allowed");
        assert_eq!(fields.title, title);
    }

    #[test]
    fn rejects_title_over_max_len() {
        let errors = validate(&input(&"a".repeat(MAX_TITLE_LEN + 1))).expect_err("101 chars");
        assert_eq!(
            errors.get(Field::Title),
            Some("Title must be 100 characters or less")
        );
    }

    #[test]
    fn rejects_empty_and_whitespace_title() {
        for title in ["", "   ", "\t\n"] {
            let errors = validate(&input(title)).expect_err("blank title");
            assert_eq!(errors.get(Field::Title), Some("Title is required"));
        }
    }

    #[test]
    fn title_length_counts_after_trimming() {
        let padded = format!("  {}  ", "b".repeat(MAX_TITLE_LEN));
        let fields = validate(&input(&padded)).expect("trimmed to 100");
        assert_eq!(fields.title.len(), MAX_TITLE_LEN);
    }

    #[test]
    fn title_length_counts_chars_not_bytes() {
        let title = "é".repeat(MAX_TITLE_LEN);
        assert!(validate(&input(&title)).is_ok());
    }

    #[test]
    fn description_is_optional_and_trimmed() {
        let fields = validate(&input("t")).expect("valid");
        assert_eq!(fields.description, "");

        let fields = validate(&input("t").description("  body  ")).expect("valid");
        assert_eq!(fields.description, "body");
    }

    #[test]
    fn description_over_limit_is_rejected() {
        let errors = validate(&input("t").description("x".repeat(MAX_DESCRIPTION_LEN + 1)))
            .expect_err("too long");
        assert!(errors.contains(Field::Description));
        assert!(validate(&input("t").description("x".repeat(MAX_DESCRIPTION_LEN))).is_ok());
    }

    #[test]
    fn missing_status_is_an_error() {
        let candidate = TicketInput {
            title: "t".into(),
            ..TicketInput::default()
        };
        let errors = validate(&candidate).expect_err("no status");
        assert_eq!(errors.get(Field::Status), Some("Status is required"));
    }

    #[test]
    fn malformed_status_and_priority_are_reported() {
        let candidate = TicketInput {
            title: "t".into(),
            description: None,
            status: Some("done".into()),
            priority: Some("urgent".into()),
        };
        let errors = validate(&candidate).expect_err("bad enums");
        assert!(errors.contains(Field::Status));
        assert!(errors.contains(Field::Priority));
        assert!(!errors.contains(Field::Title));
    }

    #[test]
    fn every_violated_field_is_collected() {
        let candidate = TicketInput {
            title: String::new(),
            description: Some("x".repeat(501)),
            status: None,
            priority: Some("nope".into()),
        };
        let errors = validate(&candidate).expect_err("all bad");
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn priority_absent_or_blank_is_none() {
        assert_eq!(validate_priority(None), Ok(None));
        assert_eq!(validate_priority(Some("  ")), Ok(None));
        assert_eq!(validate_priority(Some("HIGH")), Ok(Some(Priority::High)));
    }

    #[test]
    fn field_errors_serialize_as_flat_object() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Title, "Title is required");
        errors.insert(Field::Status, "Status is required");
        let json = serde_json::to_value(&errors).expect("serialize");
        assert_eq!(json["title"], "Title is required");
        assert_eq!(json["status"], "Status is required");
        assert_eq!(
            errors.to_string(),
            "title: Title is required; status: Status is required"
        );
    }
}
