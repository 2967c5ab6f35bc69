//! Payment processing port.
//!
//! The processor accepts a wire-shaped request (cents + currency code,
//! never domain types) keyed by a caller-generated submission token.
//! Processors must treat the token as an idempotency key: replaying a
//! token returns the original receipt instead of charging again.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::pix::generate_pix_code;
use crate::GatewayError;

/// Payment method on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit card.
    Card,
    /// PIX instant payment.
    Pix,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Pix => "pix",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit card",
            PaymentMethod::Pix => "PIX",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Card data forwarded to the processor.
///
/// Only the masked number travels here; the full PAN never leaves the
/// domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    /// Masked card number (e.g., "**** **** **** 1111").
    pub masked_number: String,
    /// Number of installments the charge is split into.
    pub installments: u32,
}

/// A payment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Caller-generated idempotency token for this checkout attempt.
    pub token: String,
    /// Amount in the smallest currency unit.
    pub amount_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Selected payment method.
    pub method: PaymentMethod,
    /// Card data, present when `method` is `Card`.
    pub card: Option<CardSummary>,
}

/// A PIX charge payload returned for PIX payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixPayload {
    /// Copy-and-paste PIX code the customer pays with.
    pub code: String,
}

/// A successful payment receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Token of the request this receipt settles.
    pub token: String,
    /// Amount charged, in the smallest currency unit.
    pub amount_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Method the payment settled through.
    pub method: PaymentMethod,
    /// Unix timestamp of settlement.
    pub paid_at: i64,
    /// PIX payload, present for PIX payments.
    pub pix: Option<PixPayload>,
}

/// Payment processing collaborator.
pub trait PaymentProcessor {
    /// Process a payment request.
    ///
    /// Implementations must be idempotent per `request.token`: a replay
    /// of an already-settled token returns the original receipt.
    fn process(&self, request: &PaymentRequest) -> Result<PaymentReceipt, GatewayError>;
}

/// Deterministic in-memory processor for tests and the reference session.
///
/// Settles every request unless failures are injected with
/// [`MockProcessor::with_failures`]. Replays by token.
///
/// # Example
///
/// ```rust,ignore
/// let processor = MockProcessor::new().with_failures(1);
/// assert!(processor.process(&request).is_err()); // injected failure
/// assert!(processor.process(&request).is_ok());  // retry settles
/// ```
#[derive(Debug, Default)]
pub struct MockProcessor {
    state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    receipts: HashMap<String, PaymentReceipt>,
    failures_remaining: u32,
    charges: u64,
}

impl MockProcessor {
    /// Create a processor that settles every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decline the next `count` unseen requests with `PaymentDeclined`.
    pub fn with_failures(self, count: u32) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.failures_remaining = count;
        }
        self
    }

    /// Number of actual charges performed (replays excluded).
    pub fn charge_count(&self) -> u64 {
        self.state.lock().map(|s| s.charges).unwrap_or(0)
    }
}

impl PaymentProcessor for MockProcessor {
    fn process(&self, request: &PaymentRequest) -> Result<PaymentReceipt, GatewayError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| GatewayError::ServiceUnavailable("processor lock poisoned".to_string()))?;

        if let Some(receipt) = state.receipts.get(&request.token) {
            tracing::info!(token = %request.token, "replaying settled payment");
            return Ok(receipt.clone());
        }

        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            tracing::warn!(token = %request.token, "injected payment failure");
            return Err(GatewayError::PaymentDeclined(
                "processor rejected the charge".to_string(),
            ));
        }

        let pix = match request.method {
            PaymentMethod::Pix => Some(PixPayload {
                code: generate_pix_code(),
            }),
            PaymentMethod::Card => None,
        };

        let receipt = PaymentReceipt {
            token: request.token.clone(),
            amount_cents: request.amount_cents,
            currency: request.currency.clone(),
            method: request.method,
            paid_at: current_timestamp(),
            pix,
        };

        state.charges += 1;
        state.receipts.insert(request.token.clone(), receipt.clone());
        tracing::info!(
            token = %request.token,
            amount_cents = request.amount_cents,
            method = %request.method,
            "payment settled"
        );
        Ok(receipt)
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_request(token: &str) -> PaymentRequest {
        PaymentRequest {
            token: token.to_string(),
            amount_cents: 26970,
            currency: "BRL".to_string(),
            method: PaymentMethod::Card,
            card: Some(CardSummary {
                masked_number: "**** **** **** 1111".to_string(),
                installments: 3,
            }),
        }
    }

    #[test]
    fn test_settles_card_request() {
        let processor = MockProcessor::new();
        let receipt = processor.process(&card_request("tok-1")).unwrap();
        assert_eq!(receipt.amount_cents, 26970);
        assert_eq!(receipt.method, PaymentMethod::Card);
        assert!(receipt.pix.is_none());
    }

    #[test]
    fn test_pix_request_carries_payload() {
        let processor = MockProcessor::new();
        let request = PaymentRequest {
            token: "tok-pix".to_string(),
            amount_cents: 8990,
            currency: "BRL".to_string(),
            method: PaymentMethod::Pix,
            card: None,
        };
        let receipt = processor.process(&request).unwrap();
        let pix = receipt.pix.unwrap();
        assert_eq!(pix.code.len(), 32);
    }

    #[test]
    fn test_replay_by_token_charges_once() {
        let processor = MockProcessor::new();
        let first = processor.process(&card_request("tok-1")).unwrap();
        let second = processor.process(&card_request("tok-1")).unwrap();
        assert_eq!(first, second);
        assert_eq!(processor.charge_count(), 1);
    }

    #[test]
    fn test_injected_failure_then_retry() {
        let processor = MockProcessor::new().with_failures(1);
        assert!(processor.process(&card_request("tok-1")).is_err());
        assert!(processor.process(&card_request("tok-1")).is_ok());
        assert_eq!(processor.charge_count(), 1);
    }

    #[test]
    fn test_distinct_tokens_charge_separately() {
        let processor = MockProcessor::new();
        processor.process(&card_request("tok-1")).unwrap();
        processor.process(&card_request("tok-2")).unwrap();
        assert_eq!(processor.charge_count(), 2);
    }
}
