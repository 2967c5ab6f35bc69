//! Luhn (mod-10) card number checksum.

/// Check a card number with the Luhn algorithm.
///
/// Non-digit characters (spaces, dashes) are ignored. The digit count
/// must fall in the 13–19 range used by real card networks.
pub fn is_valid(card_number: &str) -> bool {
    let digits: Vec<u32> = card_number.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }

    let mut sum = 0;
    let mut double = false;

    // Walk the digits right to left, doubling every second one.
    for &d in digits.iter().rev() {
        let mut d = d;
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid_numbers() {
        assert!(is_valid("4111111111111111"));
        assert!(is_valid("5500005555555559"));
        assert!(is_valid("4111 1111 1111 1111"));
    }

    #[test]
    fn test_checksum_failure() {
        assert!(!is_valid("4111111111111112"));
    }

    #[test]
    fn test_length_bounds() {
        assert!(!is_valid("411111111111")); // 12 digits
        assert!(!is_valid("41111111111111111111")); // 20 digits
        assert!(!is_valid(""));
    }
}
