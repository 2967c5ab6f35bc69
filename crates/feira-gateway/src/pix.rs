//! PIX payload generation.

use rand::Rng;

const PIX_CODE_LEN: usize = 32;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random copy-and-paste PIX code.
pub fn generate_pix_code() -> String {
    let mut rng = rand::thread_rng();
    (0..PIX_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shape() {
        let code = generate_pix_code();
        assert_eq!(code.len(), PIX_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_codes_differ() {
        assert_ne!(generate_pix_code(), generate_pix_code());
    }
}
