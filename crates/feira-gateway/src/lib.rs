//! External collaborator ports for Feira.
//!
//! The checkout core talks to two external services: a payment
//! processor and a postal-code (CEP) directory. Both are modeled as
//! traits so the domain layer stays independent of any concrete
//! integration, with deterministic in-memory mocks for tests and the
//! reference session.
//!
//! # Example
//!
//! ```rust,ignore
//! use feira_gateway::{MockProcessor, PaymentProcessor, PaymentRequest, PaymentMethod};
//!
//! let processor = MockProcessor::new();
//! let receipt = processor.process(&PaymentRequest {
//!     token: "sub_abc123".to_string(),
//!     amount_cents: 26970,
//!     currency: "BRL".to_string(),
//!     method: PaymentMethod::Pix,
//!     card: None,
//! })?;
//! ```

mod cep;
mod error;
mod payment;
mod pix;

pub use cep::{normalize_cep, CepDirectory, CepRecord, MockCepDirectory};
pub use error::GatewayError;
pub use payment::{
    CardSummary, MockProcessor, PaymentMethod, PaymentProcessor, PaymentReceipt, PaymentRequest,
    PixPayload,
};
pub use pix::generate_pix_code;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CepDirectory, CepRecord, GatewayError, MockCepDirectory, MockProcessor, PaymentMethod,
        PaymentProcessor, PaymentReceipt, PaymentRequest, PixPayload,
    };
}
