//! Gateway error types.

use thiserror::Error;

/// Errors that can occur when calling an external collaborator.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The payment was declined by the processor.
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// The collaborator could not be reached.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The postal code is not in the directory.
    #[error("CEP not found: {0}")]
    CepNotFound(String),

    /// The postal code is not a valid CEP shape.
    #[error("Invalid CEP: {0}")]
    InvalidCep(String),
}
