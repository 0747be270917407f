//! # Design
//!
//! - One error enum per concern so callers can match on what they own.
//! - Constant messages; context lives in structured fields.
//! - Storage errors exist for store implementations; the poll absorbs them.

use thiserror::Error;

/// Result type for step navigation.
pub type WizardResult<T> = Result<T, WizardError>;

/// Result type for poll operations.
pub type PollResult<T> = Result<T, PollError>;

/// Result type for snapshot store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for widget configuration parsing and validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by the step navigator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The navigator was constructed without any steps.
    #[error("step sequence is empty")]
    NoSteps,
    /// Every step in the sequence is skip-marked.
    #[error("step sequence has no reachable step")]
    NoReachableStep,
    /// A jump targeted an index outside the sequence.
    #[error("step index out of range")]
    StepOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of steps in the sequence.
        len: usize,
    },
    /// A jump targeted a skip-marked step.
    #[error("step is skip-marked")]
    SkippedStep {
        /// Requested index.
        index: usize,
    },
}

/// Errors raised by the poll tally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    /// A vote named an option the poll does not carry.
    #[error("unknown poll option")]
    UnknownOption {
        /// Option identifier that failed lookup.
        option_id: String,
    },
}

/// Errors produced by snapshot store implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store is not available (private mode, no window, etc.).
    #[error("snapshot store unavailable")]
    Unavailable {
        /// Operation that was attempted.
        operation: &'static str,
        /// Backend detail when available.
        detail: Option<String>,
    },
    /// The backing store rejected a write (quota exceeded, etc.).
    #[error("snapshot store write rejected")]
    WriteRejected {
        /// Key being written.
        key: String,
        /// Backend detail when available.
        detail: Option<String>,
    },
    /// Snapshot JSON could not be encoded or decoded.
    #[error("snapshot serialization failure")]
    Serialization {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Errors raised when widget configuration is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field failed validation.
    #[error("invalid widget configuration")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
    /// Configuration JSON could not be parsed.
    #[error("widget configuration parse failure")]
    Parse {
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_stay_constant() {
        let err = WizardError::StepOutOfRange { index: 9, len: 3 };
        assert_eq!(err.to_string(), "step index out of range");
        let err = PollError::UnknownOption {
            option_id: "zzz".to_string(),
        };
        assert_eq!(err.to_string(), "unknown poll option");
    }

    #[test]
    fn serialization_error_exposes_source() {
        let source = serde_json::from_str::<u64>("nope").expect_err("invalid json");
        let err = StorageError::Serialization {
            operation: "decode",
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
