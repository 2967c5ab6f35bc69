//! Checkout wizard state machine.
//!
//! Three linear steps: address capture, payment capture, review.
//! Completion is an exit action performed by the orchestrator, not a
//! modeled state. Forward transitions are guarded on validated data;
//! backward transitions are always permitted and never clear data.

use serde::{Deserialize, Serialize};

use crate::checkout::{Address, PaymentSelection};
use crate::error::CommerceError;

/// Steps in the checkout wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Delivery address capture.
    Address,
    /// Payment method selection and detail capture.
    Payment,
    /// Read-only order review before submission.
    Review,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Address => "address",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Address => "Address",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Address => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
        }
    }
}

/// Checkout wizard state.
///
/// Holds only data that already passed validation; the orchestrator is
/// the sole writer. `advance` enforces the forward guards exhaustively,
/// so a flow at `Review` always carries a validated address and payment
/// selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    address: Option<Address>,
    payment: Option<PaymentSelection>,
}

impl CheckoutFlow {
    /// Create a flow at the address step.
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Address,
            address: None,
            payment: None,
        }
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Validated address, once the address step was passed.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Validated payment selection, once the payment step was passed.
    pub fn payment(&self) -> Option<&PaymentSelection> {
        self.payment.as_ref()
    }

    /// Store a validated address.
    pub(crate) fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Store a validated payment selection.
    pub(crate) fn set_payment(&mut self, payment: PaymentSelection) {
        self.payment = Some(payment);
    }

    /// Drop the stored payment selection.
    pub(crate) fn clear_payment(&mut self) {
        self.payment = None;
    }

    /// Check if the flow can advance to a step.
    pub fn can_advance_to(&self, step: CheckoutStep) -> bool {
        match step {
            CheckoutStep::Address => true,
            CheckoutStep::Payment => self.address.is_some(),
            CheckoutStep::Review => self.address.is_some() && self.payment.is_some(),
        }
    }

    /// Advance to the next step.
    ///
    /// Fails with `CheckoutIncomplete` when the guard for the next step
    /// is not satisfied, and with `InvalidTransition` at `Review` —
    /// submission is an action, not a step.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step {
            CheckoutStep::Address => CheckoutStep::Payment,
            CheckoutStep::Payment => CheckoutStep::Review,
            CheckoutStep::Review => {
                return Err(CommerceError::InvalidTransition {
                    from: "review".to_string(),
                    to: "none".to_string(),
                })
            }
        };

        if !self.can_advance_to(next) {
            return Err(CommerceError::CheckoutIncomplete(
                self.missing_for_step(next).join(", "),
            ));
        }

        self.step = next;
        tracing::debug!(step = next.as_str(), "checkout advanced");
        Ok(next)
    }

    /// Go back one step. Previously entered data is preserved.
    pub fn back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Address => {
                return Err(CommerceError::InvalidTransition {
                    from: "address".to_string(),
                    to: "none".to_string(),
                })
            }
            CheckoutStep::Payment => CheckoutStep::Address,
            CheckoutStep::Review => CheckoutStep::Payment,
        };

        self.step = prev;
        tracing::debug!(step = prev.as_str(), "checkout went back");
        Ok(prev)
    }

    /// Get what's missing to advance to a step.
    fn missing_for_step(&self, step: CheckoutStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            CheckoutStep::Address => {}
            CheckoutStep::Payment => {
                if self.address.is_none() {
                    missing.push("address");
                }
            }
            CheckoutStep::Review => {
                if self.address.is_none() {
                    missing.push("address");
                }
                if self.payment.is_none() {
                    missing.push("payment method");
                }
            }
        }
        missing
    }

    /// Check if the flow is ready for order submission.
    pub fn is_ready_to_submit(&self) -> bool {
        self.step == CheckoutStep::Review && self.address.is_some() && self.payment.is_some()
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}
