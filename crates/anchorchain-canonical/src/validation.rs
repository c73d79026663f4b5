use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a value matches the pattern but names no real instant or day.
    #[error("{field} ('{value}') is not a valid calendar value: {reason}")]
    InvalidCalendarValue {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// When a numeric setting exceeds its bounds.
    #[error("{field} ({value}) is out of bounds")]
    OutOfBounds {
        /// Field name that is out of bounds.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
