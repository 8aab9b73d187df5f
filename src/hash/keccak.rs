//! Keccak-256 helpers used to derive MiMC round constants.

use sha3::{Digest, Keccak256};

use crate::field::FieldElement;

/// Keccak-256 (the pre-standard padding used by the EVM), not SHA3-256.
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let digest = Keccak256::digest(input);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Chained round-constant stream: `c_0 = H(seed)`, `c_i = H(c_{i-1})`.
///
/// The chain runs over the raw 32-byte digests. Each yielded constant is the
/// digest read as a big-endian integer reduced modulo `q`. Constants are
/// regenerated on every permutation call, never cached.
#[derive(Debug, Clone)]
pub struct RoundConstants {
    state: [u8; 32],
    remaining: usize,
}

impl RoundConstants {
    pub fn new(seed: &[u8; 32], rounds: usize) -> Self {
        Self {
            state: *seed,
            remaining: rounds,
        }
    }
}

impl Iterator for RoundConstants {
    type Item = FieldElement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.state = keccak256(&self.state);
        Some(FieldElement::from_be_bytes_mod_order(&self.state))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RoundConstants {}
