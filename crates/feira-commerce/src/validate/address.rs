//! Address form validation.

use crate::checkout::Address;
use crate::validate::FieldError;

/// Check that a CEP is eight digits (optionally separated) and not the
/// all-zero placeholder.
pub fn is_valid_cep(cep: &str) -> bool {
    let chars: Vec<char> = cep.chars().collect();
    let digits: String = match chars.len() {
        8 if chars.iter().all(char::is_ascii_digit) => chars.into_iter().collect(),
        9 if chars[5] == '-'
            && chars[..5].iter().all(char::is_ascii_digit)
            && chars[6..].iter().all(char::is_ascii_digit) =>
        {
            chars.into_iter().filter(char::is_ascii_digit).collect()
        }
        _ => return false,
    };
    // "00000-000" is a placeholder, not an assigned CEP.
    digits.chars().any(|c| c != '0')
}

/// Validate an address form.
///
/// Every field except `complement` is mandatory.
pub fn validate(address: &Address) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_valid_cep(&address.cep) {
        errors.push(FieldError::new("cep", "Invalid CEP"));
    }
    if address.street.trim().chars().count() < 3 {
        errors.push(FieldError::new("street", "Street is required"));
    }
    if address.number.trim().is_empty() {
        errors.push(FieldError::new("number", "Number is required"));
    }
    if address.neighborhood.trim().chars().count() < 2 {
        errors.push(FieldError::new("neighborhood", "Neighborhood is required"));
    }
    if address.city.trim().chars().count() < 2 {
        errors.push(FieldError::new("city", "City is required"));
    }
    if address.state.chars().count() != 2 || !address.state.chars().all(char::is_alphabetic) {
        errors.push(FieldError::new("state", "State must be a two-letter code"));
    }

    errors
}
