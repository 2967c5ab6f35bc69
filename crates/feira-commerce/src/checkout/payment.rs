//! Payment selection types.

use serde::{Deserialize, Serialize};

use feira_gateway::{CardSummary, PaymentMethod};

/// Card details captured by the payment form.
///
/// Only validated instances reach a [`PaymentSelection`]; see
/// [`validate::card`](crate::validate::card) for the form rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Card number (digits, spaces allowed).
    pub card_number: String,
    /// Name as printed on the card.
    pub cardholder_name: String,
    /// Expiry in `MM/YY` form.
    pub expiry_date: String,
    /// Security code, 3 or 4 digits.
    pub cvv: String,
    /// Number of installments to split the charge into.
    pub installments: u32,
}

impl CardDetails {
    /// Mask the card number down to its last four digits.
    pub fn masked_number(&self) -> String {
        let digits: String = self.card_number.chars().filter(char::is_ascii_digit).collect();
        let last_four = &digits[digits.len().saturating_sub(4)..];
        format!("**** **** **** {last_four}")
    }

    /// The wire-level summary sent to the payment processor.
    ///
    /// The full PAN never leaves this crate.
    pub fn summary(&self) -> CardSummary {
        CardSummary {
            masked_number: self.masked_number(),
            installments: self.installments,
        }
    }
}

/// The payment method chosen at the payment step, with card details
/// when the method requires them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "details", rename_all = "lowercase")]
pub enum PaymentSelection {
    /// Credit card with captured details.
    Card(CardDetails),
    /// PIX; confirmation happens out-of-band, no form data needed.
    Pix,
}

impl PaymentSelection {
    /// The wire-level method of this selection.
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentSelection::Card(_) => PaymentMethod::Card,
            PaymentSelection::Pix => PaymentMethod::Pix,
        }
    }

    /// Card details, when the card method is selected.
    pub fn card(&self) -> Option<&CardDetails> {
        match self {
            PaymentSelection::Card(details) => Some(details),
            PaymentSelection::Pix => None,
        }
    }
}
