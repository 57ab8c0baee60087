use std::fmt;

use crate::storage::StorageError;
use crate::validate::FieldErrors;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    TicketNotFound,
    AmbiguousId,
    ValidationFailed,
    InvalidEnumValue,
    InvalidStorageKey,
    SnapshotEncodeFailed,
    StorageReadFailed,
    StorageWriteFailed,
    LockContention,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::TicketNotFound => "E2001",
            Self::AmbiguousId => "E2004",
            Self::ValidationFailed => "E2002",
            Self::InvalidEnumValue => "E2003",
            Self::InvalidStorageKey => "E3001",
            Self::SnapshotEncodeFailed => "E3002",
            Self::StorageReadFailed => "E5001",
            Self::StorageWriteFailed => "E5002",
            Self::LockContention => "E5003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Project not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::TicketNotFound => "Ticket not found",
            Self::AmbiguousId => "Ambiguous ticket ID",
            Self::ValidationFailed => "Ticket fields failed validation",
            Self::InvalidEnumValue => "Invalid status/priority value",
            Self::InvalidStorageKey => "Invalid storage key",
            Self::SnapshotEncodeFailed => "Snapshot could not be encoded",
            Self::StorageReadFailed => "Storage read failed",
            Self::StorageWriteFailed => "Storage write failed",
            Self::LockContention => "Lock contention",
        }
    }

    /// Optional remediation hint that can be surfaced to users and scripts.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `td init` to initialize this directory."),
            Self::ConfigParseError => Some("Fix syntax in .tickets/config.toml and retry."),
            Self::TicketNotFound => Some("Run `td list` to see existing ticket IDs."),
            Self::AmbiguousId => Some("Use a longer ID prefix to disambiguate."),
            Self::ValidationFailed => Some("Correct the reported fields and retry."),
            Self::InvalidEnumValue => {
                Some("Use status open|in_progress|closed and priority low|medium|high.")
            }
            Self::InvalidStorageKey => {
                Some("Use a storage key made of letters, digits, '_', '-' or '.'.")
            }
            Self::SnapshotEncodeFailed => {
                Some("Retry once. If persistent, report a bug with logs.")
            }
            Self::StorageReadFailed => Some("Check read permissions on the .tickets directory."),
            Self::StorageWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other `td` process releases its lock."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors returned by [`crate::store::TicketStore`] mutations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// One or more candidate fields were rejected. Nothing was mutated.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// No ticket with this id exists in the collection.
    #[error("ticket not found: {id}")]
    NotFound { id: String },

    /// The snapshot could not be written. The in-memory collection was rolled back.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The collection could not be serialized.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::NotFound { .. } => ErrorCode::TicketNotFound,
            Self::Storage(err) => err.code(),
            Self::Encode(_) => ErrorCode::SnapshotEncodeFailed,
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }

    /// Field errors, when this is a validation failure.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::NotInitialized,
            ErrorCode::ConfigParseError,
            ErrorCode::TicketNotFound,
            ErrorCode::AmbiguousId,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidEnumValue,
            ErrorCode::InvalidStorageKey,
            ErrorCode::SnapshotEncodeFailed,
            ErrorCode::StorageReadFailed,
            ErrorCode::StorageWriteFailed,
            ErrorCode::LockContention,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::TicketNotFound.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn not_found_maps_to_ticket_not_found() {
        let err = StoreError::NotFound { id: "tk-abc".into() };
        assert_eq!(err.code(), ErrorCode::TicketNotFound);
        assert_eq!(err.to_string(), "ticket not found: tk-abc");
        assert!(err.field_errors().is_none());
    }
}
