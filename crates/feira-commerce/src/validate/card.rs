//! Credit card form validation.

use chrono::Datelike;

use crate::checkout::CardDetails;
use crate::validate::{luhn, FieldError};

/// Maximum number of installments a charge may be split into.
pub const MAX_INSTALLMENTS: u32 = 12;

/// Parse an `MM/YY` expiry string into `(month, full_year)`.
pub fn parse_expiry(expiry: &str) -> Option<(u32, i32)> {
    let (month_part, year_part) = expiry.split_once('/')?;
    if month_part.len() != 2 || year_part.len() != 2 {
        return None;
    }
    let month: u32 = month_part.parse().ok()?;
    let year: i32 = year_part.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((month, 2000 + year))
}

/// Validate a card form against the current date.
pub fn validate(card: &CardDetails) -> Vec<FieldError> {
    let now = chrono::Utc::now();
    validate_at(card, now.year(), now.month())
}

/// Validate a card form as of the given year and month.
///
/// The expiry must be strictly in the future: a card printed with the
/// current month is rejected.
pub fn validate_at(card: &CardDetails, now_year: i32, now_month: u32) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !luhn::is_valid(&card.card_number) {
        errors.push(FieldError::new("card_number", "Invalid card number"));
    }

    let name = card.cardholder_name.trim();
    if name.chars().count() < 3 || !name.chars().all(|c| c.is_alphabetic() || c == ' ') {
        errors.push(FieldError::new(
            "cardholder_name",
            "Name must contain only letters",
        ));
    }

    match parse_expiry(&card.expiry_date) {
        None => errors.push(FieldError::new("expiry_date", "Invalid expiry date (MM/YY)")),
        Some((month, year)) => {
            if (year, month) <= (now_year, now_month) {
                errors.push(FieldError::new("expiry_date", "Card expired"));
            }
        }
    }

    if !(3..=4).contains(&card.cvv.len()) || !card.cvv.chars().all(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new("cvv", "Invalid CVV"));
    }

    if card.installments == 0 || card.installments > MAX_INSTALLMENTS {
        errors.push(FieldError::new(
            "installments",
            format!("Installments must be between 1 and {MAX_INSTALLMENTS}"),
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_card() -> CardDetails {
        CardDetails {
            card_number: "4111111111111111".to_string(),
            cardholder_name: "Maria Silva".to_string(),
            expiry_date: "12/39".to_string(),
            cvv: "123".to_string(),
            installments: 3,
        }
    }

    #[test]
    fn test_valid_card_passes() {
        assert!(validate_at(&valid_card(), 2026, 8).is_empty());
    }

    #[test]
    fn test_luhn_failure() {
        let mut card = valid_card();
        card.card_number = "4111111111111112".to_string();
        let errors = validate_at(&card, 2026, 8);
        assert_eq!(errors[0].field, "card_number");
    }

    #[test]
    fn test_expiry_must_be_strictly_future() {
        let mut card = valid_card();

        card.expiry_date = "08/26".to_string();
        let errors = validate_at(&card, 2026, 8);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "expiry_date");

        card.expiry_date = "09/26".to_string();
        assert!(validate_at(&card, 2026, 8).is_empty());

        card.expiry_date = "01/27".to_string();
        assert!(validate_at(&card, 2026, 12).is_empty());
    }

    #[test]
    fn test_expiry_shape() {
        assert_eq!(parse_expiry("12/39"), Some((12, 2039)));
        assert_eq!(parse_expiry("13/39"), None);
        assert_eq!(parse_expiry("00/39"), None);
        assert_eq!(parse_expiry("1/39"), None);
        assert_eq!(parse_expiry("12-39"), None);
        assert_eq!(parse_expiry("12/2039"), None);
    }

    #[test]
    fn test_cvv_length() {
        let mut card = valid_card();
        card.cvv = "12".to_string();
        assert!(!validate_at(&card, 2026, 8).is_empty());

        card.cvv = "1234".to_string();
        assert!(validate_at(&card, 2026, 8).is_empty());

        card.cvv = "12a".to_string();
        assert!(!validate_at(&card, 2026, 8).is_empty());
    }

    #[test]
    fn test_cardholder_name_alphabetic() {
        let mut card = valid_card();
        card.cardholder_name = "M4ria".to_string();
        let errors = validate_at(&card, 2026, 8);
        assert_eq!(errors[0].field, "cardholder_name");
    }

    #[test]
    fn test_installment_bounds() {
        let mut card = valid_card();
        card.installments = 0;
        assert!(!validate_at(&card, 2026, 8).is_empty());
        card.installments = 13;
        assert!(!validate_at(&card, 2026, 8).is_empty());
        card.installments = 12;
        assert!(validate_at(&card, 2026, 8).is_empty());
    }
}
