//! Bitcoin key pairs and addresses
//!
//! secp256k1 point arithmetic, random and seed-derived private keys, SEC
//! public key encoding, Base58Check addresses and WIF private keys.

pub mod base58;
pub mod config;
pub mod curves;
pub mod error;
pub mod hash;
pub mod keys;
pub mod secp256k1;
pub mod wallet;

pub use error::{KeyError, Result};

pub use base58::{b58check_decode, b58check_encode, b58decode, b58encode};
pub use config::{Config, ConfigError};
pub use curves::{Curve, Point, mod_inv, scalar_mul};
pub use keys::{DEFAULT_SEED_ROUNDS, Network, PrivateKey, PublicKey, gen_key_pair};
pub use secp256k1::SECP256K1;
pub use wallet::{
    ImportedKey, KeyPairReport, address_network, address_to_public_key_hash, decode_address,
    describe_keypair, export_private_key, generate_keypair, import_private_key, make_address,
};
