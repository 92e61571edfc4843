//! Base58 and Base58Check encoding/decoding
//! reference: https://en.bitcoin.it/wiki/Base58Check_encoding

use crate::error::{KeyError, Result};
use crate::hash::checksum;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of the version byte plus trailing checksum
const CHECK_OVERHEAD: usize = 1 + 4;

fn alphabet_inv(c: u8) -> Option<u8> {
    ALPHABET.iter().position(|&x| x == c).map(|i| i as u8)
}

/// Base58 encode bytes. Every leading zero byte becomes a leading '1'.
pub fn b58encode(bytes: &[u8]) -> String {
    let mut n = BigInt::from_bytes_be(Sign::Plus, bytes);
    let fifty_eight = BigInt::from(58);
    let mut chars = Vec::new();

    while !n.is_zero() {
        let (quotient, remainder) = n.div_rem(&fifty_eight);
        // remainder < 58
        let idx = remainder.to_usize().unwrap_or_default();
        chars.push(ALPHABET[idx]);
        n = quotient;
    }

    let num_leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();
    chars.extend(std::iter::repeat_n(ALPHABET[0], num_leading_zeros));

    chars.reverse();
    chars.into_iter().map(char::from).collect()
}

/// Base58 decode to bytes. Every leading '1' becomes a leading zero byte.
pub fn b58decode(s: &str) -> Result<Vec<u8>> {
    if s.is_empty() {
        return Err(KeyError::InvalidInput("empty base58 string".into()));
    }

    let fifty_eight = BigInt::from(58);
    let mut n = BigInt::zero();
    for c in s.bytes() {
        let val = alphabet_inv(c).ok_or_else(|| {
            KeyError::InvalidInput(format!("invalid base58 character {:?}", char::from(c)))
        })?;
        n = n * &fifty_eight + BigInt::from(val);
    }

    let num_leading_ones = s.bytes().take_while(|&c| c == ALPHABET[0]).count();
    let mut result = vec![0u8; num_leading_ones];
    if !n.is_zero() {
        result.extend(n.to_bytes_be().1);
    }
    Ok(result)
}

/// Base58 decode into exactly `len` big-endian bytes, left-padding with zeros
pub fn b58decode_fixed(s: &str, len: usize) -> Result<Vec<u8>> {
    let bytes = b58decode(s)?;
    if bytes.len() > len {
        return Err(KeyError::InvalidInput(format!(
            "base58 value decodes to {} bytes, expected {len}",
            bytes.len()
        )));
    }
    let mut padded = vec![0u8; len - bytes.len()];
    padded.extend(bytes);
    Ok(padded)
}

/// Encode version || payload || checksum, checksum over version || payload
pub fn b58check_encode(version: u8, payload: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(payload.len() + CHECK_OVERHEAD);
    bytes.push(version);
    bytes.extend_from_slice(payload);
    let check = checksum(&bytes);
    bytes.extend_from_slice(&check);
    b58encode(&bytes)
}

/// Verify the trailing 4-byte checksum of a decoded Base58Check buffer and
/// split it into (version, payload).
pub fn verify_checksum(bytes: &[u8]) -> Result<(u8, &[u8])> {
    if bytes.len() < CHECK_OVERHEAD {
        return Err(KeyError::InvalidInput(format!(
            "Base58Check data too short: {} bytes",
            bytes.len()
        )));
    }
    let (body, found) = bytes.split_at(bytes.len() - 4);
    let expected = checksum(body);
    if expected.as_slice() != found {
        let mut found_arr = [0u8; 4];
        found_arr.copy_from_slice(found);
        return Err(KeyError::ChecksumMismatch {
            expected,
            found: found_arr,
        });
    }
    Ok((body[0], &body[1..]))
}

/// Decode Base58Check text into (version, payload), rejecting a bad checksum
pub fn b58check_decode(s: &str) -> Result<(u8, Vec<u8>)> {
    let bytes = b58decode(s)?;
    let (version, payload) = verify_checksum(&bytes)?;
    Ok((version, payload.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b58_roundtrip() {
        let mut original = vec![0x00];
        original.extend(1..=20u8);
        original.extend([0xaa, 0xbb, 0xcc, 0xdd]);
        assert_eq!(original.len(), 25);

        let encoded = b58encode(&original);
        assert!(encoded.starts_with('1'));
        assert_eq!(b58decode(&encoded).unwrap(), original);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(b58encode(&[0u8; 25]), "1".repeat(25));
        assert_eq!(b58decode(&"1".repeat(25)).unwrap(), vec![0u8; 25]);
        assert_eq!(b58encode(&[0, 0, 1]), "112");
        assert_eq!(b58decode("112").unwrap(), vec![0, 0, 1]);
    }

    #[test]
    fn test_invalid_characters() {
        for bad in ["0", "O", "I", "l", "1F1Pn2y6pDb6-8E5n"] {
            assert!(matches!(b58decode(bad), Err(KeyError::InvalidInput(_))));
        }
        assert!(b58decode("").is_err());
    }

    #[test]
    fn test_decode_fixed() {
        assert_eq!(b58decode_fixed("2", 3).unwrap(), vec![0, 0, 1]);
        assert!(b58decode_fixed("zzzzzz", 2).is_err());
    }

    #[test]
    fn test_address_reencodes() {
        let addresses = [
            "1F1Pn2y6pDb68E5nYJJeba4TLg2U7B6KF1",
            "mopVkxp8UhXqRYbCYJsbeE1h1fiF64jcoH",
            "1KxtHemdM2RNDQYQQQeFr6vt5jd4LooL8E",
        ];
        for address in addresses {
            let bytes = b58decode_fixed(address, 25).unwrap();
            assert_eq!(b58encode(&bytes), address);
        }
    }

    #[test]
    fn test_check_roundtrip() {
        let payload = hex::decode("99a4c61750789253f69fd750ac0d021263373305").unwrap();
        let encoded = b58check_encode(0x00, &payload);
        assert_eq!(encoded, "1F1Pn2y6pDb68E5nYJJeba4TLg2U7B6KF1");

        let (version, decoded) = b58check_decode(&encoded).unwrap();
        assert_eq!(version, 0x00);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_check_rejects_corruption() {
        // last character altered
        let result = b58check_decode("1F1Pn2y6pDb68E5nYJJeba4TLg2U7B6KF2");
        assert!(matches!(result, Err(KeyError::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_check_too_short() {
        assert!(matches!(
            b58check_decode("1111"),
            Err(KeyError::InvalidInput(_))
        ));
    }
}
