//! Addresses and Wallet Import Format (WIF) strings: the Base58Check
//! assembly of public key hashes and private keys that callers hand out

use crate::base58::{b58check_decode, b58check_encode, b58decode_fixed, verify_checksum};
use crate::error::{KeyError, Result};
use crate::keys::{Network, PrivateKey, PublicKey, bigint_to_32_bytes};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// version (1) + HASH160 (20) + checksum (4)
pub const ADDRESS_LEN: usize = 25;

/// Trailing flag byte marking a WIF key whose public key is used compressed
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Base58Check P2PKH address of a public key
pub fn make_address(pubk: &PublicKey, net: Network, compressed: bool) -> String {
    let pkb_hash = pubk.encode_hash160(compressed);
    b58check_encode(net.version_byte(), &pkb_hash)
}

/// Extract the 20-byte public key hash from a Base58Check address
pub fn address_to_public_key_hash(b58check_address: &str) -> Result<[u8; 20]> {
    let bytes = b58decode_fixed(b58check_address, ADDRESS_LEN)?;
    let (_version, payload) = verify_checksum(&bytes)?;

    let mut pkb_hash = [0u8; 20];
    pkb_hash.copy_from_slice(payload);
    Ok(pkb_hash)
}

/// Network an address was issued for, judged by its version byte
pub fn address_network(b58check_address: &str) -> Result<Network> {
    let bytes = b58decode_fixed(b58check_address, ADDRESS_LEN)?;
    let (version, _) = verify_checksum(&bytes)?;
    match version {
        0x00 => Ok(Network::Main),
        0x6f => Ok(Network::Test),
        other => Err(KeyError::InvalidInput(format!(
            "unknown address version byte 0x{other:02x}"
        ))),
    }
}

/// Export a private key in WIF: version || 32-byte key [|| 0x01] || checksum
pub fn export_private_key(prvk: &PrivateKey, net: Network, compressed: bool) -> String {
    let mut payload = Vec::with_capacity(33);
    payload.extend_from_slice(prvk.as_bytes());
    if compressed {
        payload.push(WIF_COMPRESSED_FLAG);
    }
    let wif = b58check_encode(net.wif_version_byte(), &payload);
    payload.zeroize();
    wif
}

/// Private key recovered from a WIF string
#[derive(Debug)]
pub struct ImportedKey {
    pub key: PrivateKey,
    pub network: Network,
    pub compressed: bool,
}

/// Parse a WIF string, verifying checksum, version byte, length and flag byte
pub fn import_private_key(wif: &str) -> Result<ImportedKey> {
    let (version, mut payload) = b58check_decode(wif)?;

    let network = Network::from_wif_version_byte(version).ok_or_else(|| {
        KeyError::InvalidInput(format!("unknown WIF version byte 0x{version:02x}"))
    });
    let compressed = match payload.len() {
        32 => Ok(false),
        33 if payload[32] == WIF_COMPRESSED_FLAG => Ok(true),
        33 => Err(KeyError::InvalidInput("invalid WIF compression flag".into())),
        len => Err(KeyError::InvalidInput(format!(
            "invalid WIF payload length {len}"
        ))),
    };

    let result = match (network, compressed) {
        (Ok(network), Ok(compressed)) => {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(&payload[..32]);
            let key = PrivateKey::from_bytes(bytes);
            bytes.zeroize();
            key.map(|key| ImportedKey {
                key,
                network,
                compressed,
            })
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    };
    payload.zeroize();
    result
}

/// Everything a caller prints for a freshly generated key pair
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPairReport {
    pub private_key_hex: String,
    pub wif: String,
    pub public_key_x_hex: String,
    pub public_key_y_hex: String,
    pub address: String,
}

/// Describe an existing private key for the given network and encoding
pub fn describe_keypair(prvk: &PrivateKey, net: Network, compressed: bool) -> KeyPairReport {
    let pubk = prvk.public_key();
    KeyPairReport {
        private_key_hex: prvk.to_hex(),
        wif: export_private_key(prvk, net, compressed),
        public_key_x_hex: hex::encode(bigint_to_32_bytes(pubk.x())),
        public_key_y_hex: hex::encode(bigint_to_32_bytes(pubk.y())),
        address: make_address(&pubk, net, compressed),
    }
}

/// Generate a key pair, random when `seed` is `None` and seed-derived otherwise
pub fn generate_keypair(
    net: Network,
    compressed: bool,
    seed: Option<&str>,
    rounds: u32,
) -> Result<KeyPairReport> {
    let prvk = match seed {
        Some(seed) => PrivateKey::from_seed(seed, rounds)?,
        None => PrivateKey::generate(),
    };
    Ok(describe_keypair(&prvk, net, compressed))
}

/// Public key hash of an address, failing on a bad checksum
pub fn decode_address(address: &str) -> Result<[u8; 20]> {
    address_to_public_key_hash(address)
}
