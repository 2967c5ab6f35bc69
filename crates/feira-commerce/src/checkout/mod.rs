//! Checkout module.
//!
//! Contains the wizard state machine, the address and payment types,
//! and the session orchestrator that glues them to the cart store and
//! the external collaborators.

mod address;
mod flow;
mod orchestrator;
mod payment;

pub use address::Address;
pub use flow::{CheckoutFlow, CheckoutStep};
pub use orchestrator::{CheckoutSession, LookupTicket, OrderConfirmation};
pub use payment::{CardDetails, PaymentSelection};
