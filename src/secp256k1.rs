//! secp256k1 parameters: http://www.oid-info.com/get/1.3.132.0.10

use crate::curves::{Curve, Point};
use num_bigint::BigInt;
use std::sync::{Arc, LazyLock};

const P: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";
const N: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";
const GX: &str = "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798";
const GY: &str = "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8";

/// The curve together with its base point G
#[derive(Debug, Clone)]
pub struct Secp256k1 {
    pub curve: Arc<Curve>,
    pub g: Point,
}

impl Secp256k1 {
    /// Order of G, valid private keys lie in [1, n)
    #[inline]
    pub fn order(&self) -> &BigInt {
        &self.curve.n
    }
}

fn constant(hex: &str) -> BigInt {
    BigInt::parse_bytes(hex.as_bytes(), 16).expect("curve constants are valid hex")
}

fn secp256k1() -> Secp256k1 {
    let curve = Arc::new(Curve::new(
        constant(P),
        BigInt::from(0),
        BigInt::from(7),
        constant(N),
    ));
    let g = Point::new(Arc::clone(&curve), constant(GX), constant(GY));
    Secp256k1 { curve, g }
}

/// Process-wide secp256k1 parameters, built once on first use
pub static SECP256K1: LazyLock<Secp256k1> = LazyLock::new(secp256k1);
