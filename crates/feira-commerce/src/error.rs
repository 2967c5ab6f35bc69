//! Commerce error types.

use thiserror::Error;

use crate::validate::FieldError;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// A form failed field validation.
    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidForm(Vec<FieldError>),

    /// Order submission requires a non-empty cart.
    #[error("Cannot submit an order with an empty cart")]
    EmptyCart,

    /// A submission is already outstanding for this checkout.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// The checkout already settled; start a new one.
    #[error("Checkout already completed")]
    CheckoutFinished,

    /// Payment processing failed; the attempt may be retried.
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CommerceError {
    /// Field errors carried by an `InvalidForm`, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CommerceError::InvalidForm(errors) => errors,
            _ => &[],
        }
    }
}

impl From<feira_cache::CacheError> for CommerceError {
    fn from(e: feira_cache::CacheError) -> Self {
        CommerceError::StorageError(e.to_string())
    }
}
