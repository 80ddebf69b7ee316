//! Error types for the Fitness RPG core

use thiserror::Error;

/// Errors produced by calculators, lookups and the validation layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Caller supplied a value that is malformed or outside the accepted range
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    /// The formula is undefined for the given inputs (log of a non-positive
    /// number, division by zero, non-finite result)
    #[error("{metric} is not computable: {reason}")]
    NotComputable {
        metric: &'static str,
        reason: String,
    },

    /// A category key that has no entry in the lookup tables
    #[error("Unrecognized {kind}: {value}")]
    UnrecognizedCategory { kind: &'static str, value: String },
}

impl CalcError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        CalcError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn not_computable(metric: &'static str, reason: impl Into<String>) -> Self {
        CalcError::NotComputable {
            metric,
            reason: reason.into(),
        }
    }

    pub fn unrecognized(kind: &'static str, value: impl Into<String>) -> Self {
        CalcError::UnrecognizedCategory {
            kind,
            value: value.into(),
        }
    }
}

impl From<validator::ValidationErrors> for CalcError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first offending field; field iteration order is not stable
        // so pick the alphabetically first one for deterministic messages.
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is out of range".to_string());
                CalcError::validation(field, message)
            }
            None => CalcError::validation("input", "is invalid"),
        }
    }
}

/// Result alias used throughout the core
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CalcError::not_computable("body fat", "waist must exceed neck");
        assert_eq!(err.to_string(), "body fat is not computable: waist must exceed neck");

        let err = CalcError::unrecognized("activity level", "couch_potato");
        assert_eq!(err.to_string(), "Unrecognized activity level: couch_potato");

        let err = CalcError::validation("age", "must be between 18 and 80");
        assert_eq!(err.to_string(), "Validation error on age: must be between 18 and 80");
    }
}
