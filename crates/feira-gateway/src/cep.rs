//! Postal-code (CEP) lookup port.
//!
//! A CEP is the Brazilian 8-digit postal code. The directory resolves a
//! CEP to the street-level fields used to autofill the address form.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::GatewayError;

/// A resolved CEP record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CepRecord {
    /// Normalized CEP digits (no separator).
    pub cep: String,
    /// Street name.
    pub street: String,
    /// Neighborhood.
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// Two-letter state (UF) code.
    pub state: String,
}

/// Postal-code lookup collaborator.
pub trait CepDirectory {
    /// Resolve a CEP to its address fields.
    ///
    /// Accepts `"01310-100"` or `"01310100"`. Returns
    /// [`GatewayError::InvalidCep`] for malformed input and
    /// [`GatewayError::CepNotFound`] for unknown codes.
    fn lookup(&self, cep: &str) -> Result<CepRecord, GatewayError>;
}

/// Strip the separator and validate the 8-digit shape.
pub fn normalize_cep(cep: &str) -> Result<String, GatewayError> {
    let digits: String = cep.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 8 {
        return Err(GatewayError::InvalidCep(cep.to_string()));
    }
    Ok(digits)
}

/// Canned in-memory directory for tests and the reference session.
///
/// # Example
///
/// ```rust,ignore
/// let directory = MockCepDirectory::new()
///     .with_record(CepRecord {
///         cep: "01310100".to_string(),
///         street: "Avenida Paulista".to_string(),
///         neighborhood: "Bela Vista".to_string(),
///         city: "São Paulo".to_string(),
///         state: "SP".to_string(),
///     });
/// let record = directory.lookup("01310-100")?;
/// ```
#[derive(Debug, Default)]
pub struct MockCepDirectory {
    records: HashMap<String, CepRecord>,
}

impl MockCepDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, keyed by its normalized CEP.
    pub fn with_record(mut self, record: CepRecord) -> Self {
        self.records.insert(record.cep.clone(), record);
        self
    }
}

impl CepDirectory for MockCepDirectory {
    fn lookup(&self, cep: &str) -> Result<CepRecord, GatewayError> {
        let digits = normalize_cep(cep)?;
        self.records
            .get(&digits)
            .cloned()
            .ok_or_else(|| GatewayError::CepNotFound(digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paulista() -> CepRecord {
        CepRecord {
            cep: "01310100".to_string(),
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        }
    }

    #[test]
    fn test_lookup_with_separator() {
        let directory = MockCepDirectory::new().with_record(paulista());
        let record = directory.lookup("01310-100").unwrap();
        assert_eq!(record.street, "Avenida Paulista");
        assert_eq!(record.state, "SP");
    }

    #[test]
    fn test_lookup_unknown_cep() {
        let directory = MockCepDirectory::new();
        let err = directory.lookup("99999999").unwrap_err();
        assert!(matches!(err, GatewayError::CepNotFound(_)));
    }

    #[test]
    fn test_lookup_malformed_cep() {
        let directory = MockCepDirectory::new().with_record(paulista());
        assert!(matches!(
            directory.lookup("1310-100"),
            Err(GatewayError::InvalidCep(_))
        ));
        assert!(matches!(
            directory.lookup("abcdefgh"),
            Err(GatewayError::InvalidCep(_))
        ));
    }
}
