//! Prime field element over the BN254 scalar field.
//!
//! Every value handled by the accumulator lives in `[0, q)` where
//! `q = 0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001`.
//! The wrapper keeps that invariant at the type level: there is no way to
//! build a [`FieldElement`] holding a non-canonical integer.

use core::fmt;
use core::str::FromStr;

use ark_bn254::Fr;
use ark_ff::{BigInt, BigInteger, Field, MontFp, PrimeField};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of bytes in the canonical big-endian encoding.
pub const FIELD_ELEMENT_BYTES: usize = 32;

/// Field modulus `q` as 32 big-endian bytes.
pub const MODULUS_BE_BYTES: [u8; FIELD_ELEMENT_BYTES] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58,
    0x5d, 0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00,
    0x00, 0x01,
];

/// Errors surfaced when decoding field elements from external encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDeserializeError {
    /// The decoded integer is not strictly below the modulus.
    NonCanonical,
    /// The hex payload contained a non-hex character.
    InvalidHex,
    /// The payload did not decode to exactly 32 bytes.
    InvalidLength { got: usize },
}

impl fmt::Display for FieldDeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDeserializeError::NonCanonical => {
                write!(f, "field element deserialization failed: non-canonical input")
            }
            FieldDeserializeError::InvalidHex => {
                write!(f, "field element deserialization failed: invalid hex")
            }
            FieldDeserializeError::InvalidLength { got } => write!(
                f,
                "field element deserialization failed: expected {} bytes, got {}",
                FIELD_ELEMENT_BYTES, got
            ),
        }
    }
}

impl std::error::Error for FieldDeserializeError {}

/// Canonical element of the BN254 scalar field.
///
/// # Representation
///
/// * Internally the value is kept in Montgomery form by the `ark-ff` backend;
///   that detail never leaks through the API.
/// * External encodings are **big-endian**, 32 bytes wide, matching the
///   `uint256` layout consumed by on-chain verifiers.
/// * The `serde` form is a `0x`-prefixed lowercase hex string.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement(Fr);

impl FieldElement {
    /// Additive identity.
    pub const ZERO: FieldElement = FieldElement(MontFp!("0"));
    /// Multiplicative identity.
    pub const ONE: FieldElement = FieldElement(MontFp!("1"));

    /// Returns the additive identity.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the multiplicative identity.
    pub const fn one() -> Self {
        Self::ONE
    }

    /// Interprets `bytes` as a big-endian integer of any width and reduces it
    /// modulo `q`. This is the silent `input mod q` used by the compression.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    /// Decodes a canonical big-endian encoding, rejecting integers `>= q`.
    pub fn from_be_bytes(bytes: &[u8; FIELD_ELEMENT_BYTES]) -> Result<Self, FieldDeserializeError> {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let end = FIELD_ELEMENT_BYTES - i * 8;
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[end - 8..end]);
            *limb = u64::from_be_bytes(word);
        }
        Fr::from_bigint(BigInt::new(limbs))
            .map(Self)
            .ok_or(FieldDeserializeError::NonCanonical)
    }

    /// Decodes a canonical hex string (optionally `0x`-prefixed, exactly 64
    /// hex digits).
    pub fn from_hex(input: &str) -> Result<Self, FieldDeserializeError> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        let decoded = hex::decode(digits).map_err(|_| FieldDeserializeError::InvalidHex)?;
        let bytes: [u8; FIELD_ELEMENT_BYTES] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| FieldDeserializeError::InvalidLength { got: decoded.len() })?;
        Self::from_be_bytes(&bytes)
    }

    /// Canonical big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; FIELD_ELEMENT_BYTES] {
        let mut out = [0u8; FIELD_ELEMENT_BYTES];
        let bytes = self.0.into_bigint().to_bytes_be();
        out[FIELD_ELEMENT_BYTES - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    /// `0x`-prefixed, zero-padded lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_be_bytes()))
    }

    /// Returns `true` for the additive identity.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Raises the element to a 64-bit exponent.
    pub fn pow(&self, exponent: u64) -> Self {
        Self(self.0.pow([exponent]))
    }
}

/// Arithmetic contract for canonical field elements.
pub trait FieldElementOps: Sized {
    /// Adds two field elements.
    fn add(&self, rhs: &Self) -> Self;
    /// Subtracts `rhs` from `self`.
    fn sub(&self, rhs: &Self) -> Self;
    /// Additive inverse.
    fn neg(&self) -> Self;
    /// Multiplies two field elements.
    fn mul(&self, rhs: &Self) -> Self;
    /// Squares the element.
    fn square(&self) -> Self;
    /// Multiplicative inverse, `None` for zero.
    fn inv(&self) -> Option<Self>;
}

impl FieldElementOps for FieldElement {
    fn add(&self, rhs: &Self) -> Self {
        Self(self.0 + rhs.0)
    }

    fn sub(&self, rhs: &Self) -> Self {
        Self(self.0 - rhs.0)
    }

    fn neg(&self) -> Self {
        Self(-self.0)
    }

    fn mul(&self, rhs: &Self) -> Self {
        Self(self.0 * rhs.0)
    }

    fn square(&self) -> Self {
        Self(self.0.square())
    }

    fn inv(&self) -> Option<Self> {
        self.0.inverse().map(Self)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl From<Fr> for FieldElement {
    fn from(value: Fr) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for Fr {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_hex())
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for FieldElement {
    type Err = FieldDeserializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for FieldElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        Self::from_hex(&encoded).map_err(serde::de::Error::custom)
    }
}
