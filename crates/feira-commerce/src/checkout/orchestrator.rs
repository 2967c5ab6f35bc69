//! Checkout session orchestration.
//!
//! A [`CheckoutSession`] drives one checkout attempt over a
//! [`SessionCartStore`]: it validates each form, feeds the wizard
//! state machine, autofills the address draft from the CEP directory,
//! and performs the final submission against the payment processor.
//!
//! Each session owns a [`SubmissionToken`] used as the processor-side
//! idempotency key. The token is fixed for the whole session, so a
//! manual retry of a failed submission cannot double-charge.

use serde::{Deserialize, Serialize};

use feira_gateway::{
    CepDirectory, CepRecord, GatewayError, PaymentMethod, PaymentProcessor, PaymentRequest,
    PixPayload,
};

use crate::cart::SessionCartStore;
use crate::checkout::{Address, CardDetails, CheckoutFlow, CheckoutStep, PaymentSelection};
use crate::error::CommerceError;
use crate::ids::SubmissionToken;
use crate::money::Money;
use crate::validate;

/// Handle for one in-flight CEP lookup.
///
/// Tickets are issued in increasing order; only the result carrying the
/// most recently issued ticket is applied. A lookup that resolves after
/// the user edited the postal code again is stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LookupTicket(u64);

/// Result of a successful order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Submission token the payment settled under.
    pub token: SubmissionToken,
    /// Payment method used.
    pub method: PaymentMethod,
    /// Total charged.
    pub total: Money,
    /// Unix timestamp of settlement.
    pub paid_at: i64,
    /// PIX payload for the customer, when paid via PIX.
    pub pix: Option<PixPayload>,
}

/// One checkout attempt.
///
/// Created fresh per attempt and discarded after a successful
/// submission or on navigation away.
#[derive(Debug)]
pub struct CheckoutSession {
    flow: CheckoutFlow,
    draft_address: Address,
    draft_card: Option<CardDetails>,
    selected_method: PaymentMethod,
    token: SubmissionToken,
    in_flight: bool,
    finished: bool,
    latest_lookup: u64,
}

impl CheckoutSession {
    /// Start a checkout at the address step.
    pub fn new() -> Self {
        Self {
            flow: CheckoutFlow::new(),
            draft_address: Address::default(),
            draft_card: None,
            selected_method: PaymentMethod::Card,
            token: SubmissionToken::generate(),
            in_flight: false,
            finished: false,
            latest_lookup: 0,
        }
    }

    /// Current wizard step.
    pub fn step(&self) -> CheckoutStep {
        self.flow.step()
    }

    /// The wizard state.
    pub fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    /// The idempotency token for this attempt.
    pub fn token(&self) -> &SubmissionToken {
        &self.token
    }

    /// The address draft being edited (manual entry plus autofill).
    pub fn draft_address(&self) -> &Address {
        &self.draft_address
    }

    /// Card details captured by an earlier card submission, kept so the
    /// form can be prefilled after a method switch.
    pub fn draft_card(&self) -> Option<&CardDetails> {
        self.draft_card.as_ref()
    }

    /// The payment method currently selected.
    pub fn selected_method(&self) -> PaymentMethod {
        self.selected_method
    }

    /// Whether the session already settled an order.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Replace the address draft with manually entered fields.
    pub fn set_draft_address(&mut self, address: Address) {
        self.draft_address = address;
    }

    /// Record a new postal code and issue a lookup ticket for it.
    ///
    /// Issuing a new ticket invalidates any lookup still outstanding.
    pub fn begin_cep_lookup(&mut self, cep: impl Into<String>) -> LookupTicket {
        self.draft_address.cep = cep.into();
        self.latest_lookup += 1;
        LookupTicket(self.latest_lookup)
    }

    /// Fill the address draft from a resolved CEP record.
    ///
    /// Returns `false` (and applies nothing) when the ticket is stale.
    /// The street number and complement are never touched; the customer
    /// always enters those.
    pub fn apply_cep_result(&mut self, ticket: LookupTicket, record: &CepRecord) -> bool {
        if ticket.0 != self.latest_lookup {
            tracing::debug!(ticket = ticket.0, latest = self.latest_lookup, "dropping stale CEP result");
            return false;
        }
        self.draft_address.street = record.street.clone();
        self.draft_address.neighborhood = record.neighborhood.clone();
        self.draft_address.city = record.city.clone();
        self.draft_address.state = record.state.clone();
        true
    }

    /// Look up a CEP and autofill the draft in one call.
    ///
    /// Lookup failure is non-fatal: the draft keeps the entered postal
    /// code and the caller surfaces a dismissable notice while the
    /// customer falls back to manual entry.
    pub fn autofill_address(
        &mut self,
        directory: &dyn CepDirectory,
        cep: &str,
    ) -> Result<(), GatewayError> {
        let ticket = self.begin_cep_lookup(cep);
        let record = directory.lookup(cep)?;
        self.apply_cep_result(ticket, &record);
        Ok(())
    }

    /// Submit the address form.
    ///
    /// On validation failure returns `InvalidForm` with the per-field
    /// errors and the step does not change. On success stores the
    /// address and advances to the payment step.
    pub fn submit_address(&mut self, address: Address) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Address)?;

        let errors = validate::address::validate(&address);
        if !errors.is_empty() {
            return Err(CommerceError::InvalidForm(errors));
        }

        self.draft_address = address.clone();
        self.flow.set_address(address);
        self.flow.advance()
    }

    /// Switch the payment method without advancing.
    ///
    /// Card details captured earlier stay in the draft, so switching to
    /// PIX and back restores the validated card instead of forcing the
    /// customer to retype it. Selecting card before any details were
    /// captured leaves the review guard unsatisfied.
    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<(), CommerceError> {
        self.expect_step(CheckoutStep::Payment)?;
        self.selected_method = method;
        match method {
            PaymentMethod::Pix => self.flow.set_payment(PaymentSelection::Pix),
            PaymentMethod::Card => match self.draft_card.clone() {
                Some(card) => self.flow.set_payment(PaymentSelection::Card(card)),
                None => self.flow.clear_payment(),
            },
        }
        Ok(())
    }

    /// Submit the card form.
    ///
    /// On validation failure returns `InvalidForm` and the step does
    /// not change. On success stores the card selection and advances to
    /// review.
    pub fn submit_card(&mut self, card: CardDetails) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Payment)?;

        let errors = validate::card::validate(&card);
        if !errors.is_empty() {
            return Err(CommerceError::InvalidForm(errors));
        }

        self.draft_card = Some(card.clone());
        self.selected_method = PaymentMethod::Card;
        self.flow.set_payment(PaymentSelection::Card(card));
        self.flow.advance()
    }

    /// Choose PIX and advance to review.
    ///
    /// PIX needs no form data; its confirmation happens out-of-band.
    pub fn confirm_pix(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Payment)?;
        self.selected_method = PaymentMethod::Pix;
        self.flow.set_payment(PaymentSelection::Pix);
        self.flow.advance()
    }

    /// Go back one step, preserving all entered data.
    pub fn back(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.flow.back()
    }

    /// Re-advance after going back, without re-entering anything.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.flow.advance()
    }

    /// Submit the order.
    ///
    /// Only valid at the review step with a non-empty cart. On success
    /// the cart is cleared (persisted) and the session is finished; on
    /// payment failure the cart and the step are untouched and the same
    /// token is reused by the next attempt, so the processor can
    /// deduplicate.
    pub fn submit_order(
        &mut self,
        cart: &mut SessionCartStore,
        processor: &dyn PaymentProcessor,
    ) -> Result<OrderConfirmation, CommerceError> {
        if self.finished {
            return Err(CommerceError::CheckoutFinished);
        }
        if self.in_flight {
            return Err(CommerceError::SubmissionInFlight);
        }
        self.expect_step(CheckoutStep::Review)?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let payment = self
            .flow
            .payment()
            .cloned()
            .ok_or_else(|| CommerceError::CheckoutIncomplete("payment method".to_string()))?;
        let total = cart.total_price()?;

        let request = PaymentRequest {
            token: self.token.as_str().to_string(),
            amount_cents: total.amount_cents,
            currency: total.currency.code().to_string(),
            method: payment.method(),
            card: payment.card().map(|c| c.summary()),
        };

        tracing::info!(
            token = %self.token,
            amount_cents = request.amount_cents,
            method = %request.method,
            "submitting order"
        );

        self.in_flight = true;
        let result = processor.process(&request);
        self.in_flight = false;

        match result {
            Ok(receipt) => {
                cart.clear()?;
                self.finished = true;
                tracing::info!(token = %self.token, "order confirmed");
                Ok(OrderConfirmation {
                    token: self.token.clone(),
                    method: payment.method(),
                    total,
                    paid_at: receipt.paid_at,
                    pix: receipt.pix,
                })
            }
            Err(e) => {
                tracing::warn!(token = %self.token, error = %e, "payment failed, staying at review");
                Err(CommerceError::PaymentFailed(e.to_string()))
            }
        }
    }

    fn expect_step(&self, expected: CheckoutStep) -> Result<(), CommerceError> {
        if self.flow.step() != expected {
            return Err(CommerceError::InvalidTransition {
                from: self.flow.step().as_str().to_string(),
                to: expected.as_str().to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}
