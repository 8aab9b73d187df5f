//! MiMC parameter definitions shared by the permutation and the accumulator.
//! Parameters are plain values; validation happens once when a [`Mimc`]
//! instance is built from them.
//!
//! [`Mimc`]: super::mimc::Mimc

use serde::{Deserialize, Serialize};

use super::keccak::keccak256;
use super::HashError;

/// Version identifier for the public MiMC parameter set.
pub const MIMC_PARAMETERS_V1_ID: &str = "mimc-bn254-e7-r91-keccak";

/// ASCII label whose Keccak-256 digest seeds the public round-constant chain.
pub const MIMC_SEED_LABEL: &[u8] = b"mimc";

/// `keccak256("mimc")`, the seed of the public parameter set.
pub const MIMC_SEED: [u8; 32] = [
    0xb6, 0xe4, 0x89, 0xe6, 0xb3, 0x72, 0x24, 0xa5, 0x0b, 0xeb, 0xfd, 0xdb, 0xe7, 0xd8, 0x9f,
    0xa8, 0xfd, 0xca, 0xa8, 0x43, 0x04, 0xa7, 0x0b, 0xd1, 0x3f, 0x79, 0xb5, 0xd9, 0xf7, 0x95,
    0x1e, 0x9e,
];

/// Number of rounds of the public parameter set.
pub const MIMC_ROUNDS: usize = 91;

/// Minimum round count for the targeted security level. The public set keeps
/// a margin above it.
pub const MIMC_MIN_ROUNDS: usize = 46;

/// Fixed S-box exponent.
pub const MIMC_EXPONENT: u64 = 7;

/// Keyed MiMC permutation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimcParameters {
    /// 32-byte seed; the first round constant is `keccak256(seed)`.
    pub seed: [u8; 32],
    /// Number of rounds, one round constant each.
    pub rounds: usize,
}

impl MimcParameters {
    /// Public parameters: seed `keccak256("mimc")`, 91 rounds.
    pub const DEFAULT: MimcParameters = MimcParameters::new(MIMC_SEED, MIMC_ROUNDS);

    pub const fn new(seed: [u8; 32], rounds: usize) -> Self {
        Self { seed, rounds }
    }

    /// Derives the seed by hashing an arbitrary label once.
    pub fn from_label(label: &[u8], rounds: usize) -> Self {
        Self::new(keccak256(label), rounds)
    }

    /// Rejects parameter sets the permutation cannot run with.
    pub fn validate(&self) -> Result<(), HashError> {
        if self.rounds < 1 {
            return Err(HashError::InvalidParameter {
                reason: "mimc requires at least one round",
            });
        }
        Ok(())
    }

    /// Whether the round count meets [`MIMC_MIN_ROUNDS`].
    pub fn meets_security_margin(&self) -> bool {
        self.rounds >= MIMC_MIN_ROUNDS
    }
}

impl Default for MimcParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}
