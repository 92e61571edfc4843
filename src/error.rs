//! Unified error types for key derivation and address encoding

use thiserror::Error;

/// Main error type for the library
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Checksum mismatch: expected {}, found {}", hex::encode(expected), hex::encode(found))]
    ChecksumMismatch { expected: [u8; 4], found: [u8; 4] },

    #[error("Arithmetic precondition violated: {0}")]
    ArithmeticPrecondition(String),

    #[error("Seed-derived key is outside the accepted range [n/1024, n)")]
    SeedDerivationOutOfRange,
}

impl From<hex::FromHexError> for KeyError {
    fn from(e: hex::FromHexError) -> Self {
        KeyError::InvalidInput(e.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, KeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_message_is_hex() {
        let err = KeyError::ChecksumMismatch {
            expected: [0xde, 0xad, 0xbe, 0xef],
            found: [0x00, 0x01, 0x02, 0x03],
        };
        assert_eq!(
            err.to_string(),
            "Checksum mismatch: expected deadbeef, found 00010203"
        );
    }

    #[test]
    fn test_from_hex_error() {
        let err: KeyError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, KeyError::InvalidInput(_)));
    }
}
