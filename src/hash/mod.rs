//! Keyed MiMC hashing over the BN254 scalar field.
//!
//! * [`config`] – parameter sets (seed, round count) and the public defaults.
//! * [`keccak`] – Keccak-256 and the chained round-constant stream.
//! * [`mimc`] – the `x^7` keyed permutation and the Miyaguchi–Preneel style
//!   multi-input compression built on it.
//!
//! The accumulator only uses the two-to-one compression with key zero, but
//! every entry point is usable standalone.

use core::fmt;

pub mod config;
pub mod keccak;
pub mod mimc;

pub use config::{
    MimcParameters, MIMC_EXPONENT, MIMC_MIN_ROUNDS, MIMC_PARAMETERS_V1_ID, MIMC_ROUNDS,
    MIMC_SEED, MIMC_SEED_LABEL,
};
pub use keccak::{keccak256, RoundConstants};
pub use mimc::{compress, compress_with, permute, permute_with, Mimc};

/// Errors emitted by the hashing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashError {
    /// A permutation parameter is outside its admissible range.
    InvalidParameter { reason: &'static str },
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::InvalidParameter { reason } => {
                write!(f, "invalid hash parameter: {}", reason)
            }
        }
    }
}

impl std::error::Error for HashError {}
