//! Secret/public key pairs: random and seed-derived private keys, SEC
//! serialization of public keys and their HASH160 fingerprint

use crate::curves::{Point, scalar_mul};
use crate::error::{KeyError, Result};
use crate::hash::{hash160, sha256};
use crate::secp256k1::SECP256K1;
use crate::wallet;
use clap::ValueEnum;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::One;
use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Hash rounds applied to a seed when the caller does not choose a count
pub const DEFAULT_SEED_ROUNDS: u32 = 1 << 16;

/// Bitcoin network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Network {
    #[default]
    #[value(alias = "mainnet")]
    Main,
    #[value(alias = "testnet")]
    Test,
}

impl Network {
    /// Get version byte for addresses
    #[inline]
    pub const fn version_byte(self) -> u8 {
        match self {
            Network::Main => 0x00,
            Network::Test => 0x6f,
        }
    }

    /// Get version byte for WIF private keys
    #[inline]
    pub const fn wif_version_byte(self) -> u8 {
        match self {
            Network::Main => 0x80,
            Network::Test => 0xef,
        }
    }

    pub const fn from_wif_version_byte(version: u8) -> Option<Self> {
        match version {
            0x80 => Some(Network::Main),
            0xef => Some(Network::Test),
            _ => None,
        }
    }

    /// Get network name
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
        }
    }
}

impl TryFrom<&str> for Network {
    type Error = KeyError;

    fn try_from(s: &str) -> Result<Self> {
        match s {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            _ => Err(KeyError::InvalidInput(format!("Unknown network: {s}"))),
        }
    }
}

impl FromStr for Network {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        Network::try_from(s)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A secp256k1 secret scalar k with 1 <= k < n.
///
/// Stored as 32 big-endian bytes that are wiped when the key is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; 32],
}

impl PrivateKey {
    /// Wrap 32 big-endian bytes, rejecting scalars outside [1, n)
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self> {
        let key = PrivateKey { bytes };
        let k = key.scalar();
        if k < BigInt::one() || k >= *SECP256K1.order() {
            return Err(KeyError::InvalidInput(
                "private key scalar outside [1, n)".into(),
            ));
        }
        Ok(key)
    }

    pub fn from_scalar(k: &BigInt) -> Result<Self> {
        if k.sign() == Sign::Minus {
            return Err(KeyError::InvalidInput("private key scalar is negative".into()));
        }
        let (_, be) = k.to_bytes_be();
        if be.len() > 32 {
            return Err(KeyError::InvalidInput("private key scalar exceeds 256 bits".into()));
        }
        Self::from_bytes(bigint_to_32_bytes(k))
    }

    /// Parse a hex scalar, with or without a leading "0x"
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        let k = BigInt::parse_bytes(digits.as_bytes(), 16)
            .filter(|_| !digits.is_empty() && !digits.starts_with(['+', '-']))
            .ok_or_else(|| KeyError::InvalidInput(format!("invalid hex private key: {hex}")))?;
        Self::from_scalar(&k)
    }

    /// Uniformly random key: 256 random bits, resampled until they fall in [1, n)
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let key = Self::from_bytes(bytes);
            bytes.zeroize();
            if let Ok(key) = key {
                return key;
            }
        }
    }

    /// Deterministic key from a seed phrase.
    ///
    /// The UTF-8 bytes of `seed` are reversed and hashed with SHA-256 `rounds`
    /// times, each digest feeding the next round. The final digest is read as
    /// a big-endian integer and must lie in `[n/1024, n)`; anything else is
    /// [`KeyError::SeedDerivationOutOfRange`]. No retry is attempted since the
    /// same inputs always produce the same digest.
    ///
    /// This is not a hardened key-stretching function: the key is only as
    /// strong as the seed's entropy.
    pub fn from_seed(seed: &str, rounds: u32) -> Result<Self> {
        if rounds == 0 {
            return Err(KeyError::InvalidInput("seed rounds must be at least 1".into()));
        }

        let reversed: Zeroizing<Vec<u8>> = Zeroizing::new(seed.bytes().rev().collect());
        let mut digest = Zeroizing::new(sha256(&reversed));
        for _ in 1..rounds {
            *digest = sha256(&digest[..]);
        }

        let k = BigInt::from_bytes_be(Sign::Plus, &digest[..]);
        let n = SECP256K1.order();
        if k < n.div_floor(&BigInt::from(1024)) || k >= *n {
            return Err(KeyError::SeedDerivationOutOfRange);
        }
        Ok(PrivateKey { bytes: *digest })
    }

    /// The secret scalar k
    pub fn scalar(&self) -> BigInt {
        BigInt::from_bytes_be(Sign::Plus, &self.bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// 64 lowercase hex digits
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// k * G
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_private_key(self)
    }

    /// Wallet Import Format string for this key
    pub fn to_wif(&self, net: Network, compressed: bool) -> String {
        wallet::export_private_key(self, net, compressed)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// Public key - an affine point of the secp256k1 subgroup generated by G
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    x: BigInt,
    y: BigInt,
}

impl PublicKey {
    /// Wrap an existing point; the identity and points off secp256k1 are rejected.
    /// Coordinates are stored reduced modulo p.
    pub fn from_point(pt: &Point) -> Result<Self> {
        let (Some(x), Some(y), Some(curve)) = (pt.x(), pt.y(), pt.curve()) else {
            return Err(KeyError::InvalidInput(
                "the point at infinity is not a public key".into(),
            ));
        };
        if **curve != *SECP256K1.curve || !pt.is_on_curve() {
            return Err(KeyError::InvalidInput("point is not on secp256k1".into()));
        }
        Ok(PublicKey {
            x: x.mod_floor(&curve.p),
            y: y.mod_floor(&curve.p),
        })
    }

    /// Derive public key from secret key
    pub fn from_private_key(prvk: &PrivateKey) -> Self {
        let point = scalar_mul(&prvk.scalar(), &SECP256K1.g);
        match point {
            Point::Affine { x, y, .. } => PublicKey { x, y },
            // k is in [1, n) and G has prime order n
            Point::Infinity => unreachable!("k * G is never the identity for 1 <= k < n"),
        }
    }

    /// The key as a curve point
    pub fn point(&self) -> Point {
        Point::new(SECP256K1.curve.clone(), self.x.clone(), self.y.clone())
    }

    /// Decode from SEC binary format
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let Some(&prefix) = bytes.first() else {
            return Err(KeyError::InvalidInput("Empty public key".into()));
        };
        let curve = &SECP256K1.curve;

        let (x, y) = match prefix {
            // Uncompressed format
            4 => {
                if bytes.len() != 65 {
                    return Err(KeyError::InvalidInput(
                        "Invalid uncompressed public key length".into(),
                    ));
                }
                let x = BigInt::from_bytes_be(Sign::Plus, &bytes[1..33]);
                let y = BigInt::from_bytes_be(Sign::Plus, &bytes[33..65]);
                (x, y)
            }
            // Compressed format
            2 | 3 => {
                if bytes.len() != 33 {
                    return Err(KeyError::InvalidInput(
                        "Invalid compressed public key length".into(),
                    ));
                }
                let x = BigInt::from_bytes_be(Sign::Plus, &bytes[1..33]);
                let p = &curve.p;
                if x >= *p {
                    return Err(KeyError::InvalidInput("x coordinate exceeds field prime".into()));
                }

                // y = sqrt(x^3 + 7), p = 3 mod 4 so the root is y2^((p+1)/4)
                let y2 = (x.modpow(&BigInt::from(3), p) + &curve.b).mod_floor(p);
                let exp = (p + BigInt::one()) / BigInt::from(4);
                let mut y = y2.modpow(&exp, p);
                if (&y * &y).mod_floor(p) != y2 {
                    return Err(KeyError::InvalidInput("x is not on secp256k1".into()));
                }

                let want_even = prefix == 2;
                if y.is_even() != want_even {
                    y = p - &y;
                }
                (x, y)
            }
            _ => return Err(KeyError::InvalidInput("Invalid public key prefix".into())),
        };

        if x >= curve.p || y >= curve.p || !curve.contains(&x, &y) {
            return Err(KeyError::InvalidInput("point is not on secp256k1".into()));
        }
        Ok(PublicKey { x, y })
    }

    /// Encode to SEC format: 33 bytes compressed, 65 bytes uncompressed
    pub fn encode(&self, compressed: bool) -> Vec<u8> {
        let x_bytes = bigint_to_32_bytes(&self.x);

        if compressed {
            let prefix = if self.y.is_even() { 0x02 } else { 0x03 };
            let mut result = Vec::with_capacity(33);
            result.push(prefix);
            result.extend_from_slice(&x_bytes);
            result
        } else {
            let mut result = Vec::with_capacity(65);
            result.push(0x04);
            result.extend_from_slice(&x_bytes);
            result.extend_from_slice(&bigint_to_32_bytes(&self.y));
            result
        }
    }

    /// Encode and hash with HASH160
    pub fn encode_hash160(&self, compressed: bool) -> [u8; 20] {
        hash160(&self.encode(compressed))
    }

    /// Get Bitcoin address for a specific network
    pub fn address(&self, net: Network, compressed: bool) -> String {
        wallet::make_address(self, net, compressed)
    }

    /// Get x coordinate
    pub fn x(&self) -> &BigInt {
        &self.x
    }

    /// Get y coordinate
    pub fn y(&self) -> &BigInt {
        &self.y
    }
}

/// Generate a random (secret_key, public_key) pair
pub fn gen_key_pair() -> (PrivateKey, PublicKey) {
    let sk = PrivateKey::generate();
    let pk = sk.public_key();
    (sk, pk)
}

/// Convert a non-negative BigInt below 2^256 to a 32-byte big-endian array
pub(crate) fn bigint_to_32_bytes(n: &BigInt) -> [u8; 32] {
    let (_, bytes) = n.to_bytes_be();
    let mut result = [0u8; 32];
    let len = bytes.len().min(32);
    result[32 - len..].copy_from_slice(&bytes[bytes.len() - len..]);
    result
}
