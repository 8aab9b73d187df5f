//! MiMC-p/p keyed permutation with exponent 7 and its sequential compression.

use super::config::MimcParameters;
use super::keccak::RoundConstants;
use super::HashError;
use crate::field::FieldElement;
use crate::field::FieldElementOps;

/// Validated MiMC instance.
///
/// Holding a `Mimc` proves its parameters passed [`MimcParameters::validate`],
/// so the permutation and compression methods are infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mimc {
    params: MimcParameters,
}

impl Mimc {
    /// Builds an instance, rejecting zero-round parameter sets.
    pub fn new(params: MimcParameters) -> Result<Self, HashError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Instance over [`MimcParameters::DEFAULT`].
    pub const fn public() -> Self {
        Self {
            params: MimcParameters::DEFAULT,
        }
    }

    pub fn parameters(&self) -> &MimcParameters {
        &self.params
    }

    /// Keyed permutation.
    ///
    /// Each round computes `x <- (x + c_i + key)^7`; the key is added once
    /// more after the last round.
    pub fn permute(&self, x: FieldElement, key: FieldElement) -> FieldElement {
        let mut state = x;
        for constant in RoundConstants::new(&self.params.seed, self.params.rounds) {
            state = pow7(state.add(&constant).add(&key));
        }
        state.add(&key)
    }

    /// Sequential compression: `r <- r + input + permute(input, r)`, starting
    /// from `r = key`. An empty input slice returns the key.
    pub fn compress(&self, inputs: &[FieldElement], key: FieldElement) -> FieldElement {
        inputs.iter().fold(key, |acc, input| {
            acc.add(input).add(&self.permute(*input, acc))
        })
    }

    /// Two-to-one node compression used by the accumulator (key zero).
    pub fn compress_pair(&self, left: FieldElement, right: FieldElement) -> FieldElement {
        self.compress(&[left, right], FieldElement::ZERO)
    }
}

impl Default for Mimc {
    fn default() -> Self {
        Self::public()
    }
}

// x^7 as x^4 * x^2 * x
#[inline]
fn pow7(x: FieldElement) -> FieldElement {
    let x2 = x.square();
    let x4 = x2.square();
    x4.mul(&x2).mul(&x)
}

/// Permutation with the public seed and round count.
pub fn permute(x: FieldElement, key: FieldElement) -> FieldElement {
    Mimc::public().permute(x, key)
}

/// Permutation with an explicit seed and round count.
///
/// Fails with [`HashError::InvalidParameter`] when `rounds` is zero.
pub fn permute_with(
    x: FieldElement,
    key: FieldElement,
    seed: &[u8; 32],
    rounds: usize,
) -> Result<FieldElement, HashError> {
    Ok(Mimc::new(MimcParameters::new(*seed, rounds))?.permute(x, key))
}

/// Compression with the public parameters.
pub fn compress(inputs: &[FieldElement], key: FieldElement) -> FieldElement {
    Mimc::public().compress(inputs, key)
}

/// Compression with an explicit parameter set.
pub fn compress_with(
    inputs: &[FieldElement],
    key: FieldElement,
    params: &MimcParameters,
) -> Result<FieldElement, HashError> {
    Ok(Mimc::new(*params)?.compress(inputs, key))
}
