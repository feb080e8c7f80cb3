//! Field-level validation with error accumulation.
//!
//! Form handlers validate every field before mutating state, collecting
//! all failures rather than stopping at the first one.

use crate::error::{PortalError, PortalResult};

/// Validation error with field context.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: ValidationCode,
}

/// Specific validation error codes for programmatic handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationCode {
    Required,
    InvalidFormat,
    OutOfRange,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({:?})", self.field, self.message, self.code)
    }
}

/// Validation result that can accumulate multiple errors.
#[derive(Clone, Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add_error(&mut self, field: &str, message: &str, code: ValidationCode) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
            code,
        });
    }

    /// Record a `Required` error when `value` is blank.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add_error(field, "field is required", ValidationCode::Required);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    pub fn into_result(self) -> PortalResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(PortalError::Validation(messages.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_valid() {
        assert!(ValidationResult::new().is_valid());
        assert!(ValidationResult::new().into_result().is_ok());
    }

    #[test]
    fn require_flags_blank_fields() {
        let mut result = ValidationResult::new();
        result.require("date", "");
        result.require("time", "  ");
        result.require("reason", "checkup");
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].field, "date");
        assert_eq!(result.errors[0].code, ValidationCode::Required);
    }

    #[test]
    fn into_result_joins_all_errors() {
        let mut result = ValidationResult::new();
        result.add_error("start", "field is required", ValidationCode::Required);
        result.add_error("duration", "must be positive", ValidationCode::OutOfRange);
        let err = result.into_result().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("start"));
        assert!(message.contains("duration"));
    }

    #[test]
    fn merge_accumulates() {
        let mut a = ValidationResult::new();
        a.require("date", "");
        let mut b = ValidationResult::new();
        b.require("time", "");
        a.merge(b);
        assert_eq!(a.errors.len(), 2);
    }
}
