//! Form validation.
//!
//! Validators return a list of [`FieldError`]s so callers can surface
//! messages inline, per field. An empty list means the form is valid.

pub mod address;
pub mod card;
pub mod luhn;

use std::fmt;

/// A validation failure on a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field identifier (form field name).
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
