//! Postal address types.

use serde::{Deserialize, Serialize};

/// A Brazilian postal address.
///
/// All fields except `complement` are mandatory; see
/// [`validate::address`](crate::validate::address) for the form rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Postal code (CEP), with or without the separator.
    pub cep: String,
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// Apartment, suite, etc.
    pub complement: Option<String>,
    /// Neighborhood.
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// Two-letter state (UF) code.
    pub state: String,
}

impl Address {
    /// Format as a single display line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![format!("{}, {}", self.street, self.number)];
        if let Some(ref complement) = self.complement {
            parts.push(complement.clone());
        }
        parts.push(self.neighborhood.clone());
        parts.push(format!("{} - {}", self.city, self.state));
        parts.push(self.cep.clone());
        parts.join(", ")
    }

    /// Check that every mandatory field is non-empty.
    pub fn is_complete(&self) -> bool {
        !self.cep.is_empty()
            && !self.street.is_empty()
            && !self.number.is_empty()
            && !self.neighborhood.is_empty()
            && !self.city.is_empty()
            && !self.state.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_formatting() {
        let address = Address {
            cep: "01310-100".to_string(),
            street: "Avenida Paulista".to_string(),
            number: "1578".to_string(),
            complement: Some("Apto 42".to_string()),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        };
        let line = address.one_line();
        assert!(line.contains("Avenida Paulista, 1578"));
        assert!(line.contains("Apto 42"));
        assert!(line.contains("São Paulo - SP"));
    }

    #[test]
    fn test_default_is_incomplete() {
        assert!(!Address::default().is_complete());
    }
}
