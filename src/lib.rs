//! Core library entry point for the `mimc-accumulator` crate.
//!
//! The crate maintains a commitment to an append-only sequence of BN254
//! scalar field elements. The pieces stack bottom-up:
//!
//! * [`field`] – canonical field elements modulo the BN254 scalar prime.
//! * [`hash`] – the keyed `x^7` MiMC permutation and its sequential
//!   compression, used as the two-to-one node hash.
//! * [`merkle`] – the frontier accumulator: single and batch insertion with
//!   `O(height)` retained state, insertion events, snapshots and a
//!   single-writer shared wrapper.
//!
//! ```
//! use mimc_accumulator::{FieldElement, FrontierAccumulator};
//!
//! let mut accumulator = FrontierAccumulator::<4>::new();
//! let root = accumulator.insert_leaf(FieldElement::from(1u64)).unwrap();
//! assert_eq!(accumulator.root(), root);
//! assert_eq!(accumulator.leaf_count(), 1);
//! ```

pub mod field;
pub mod hash;
pub mod merkle;

pub use field::{FieldElement, FieldElementOps, MODULUS_BE_BYTES};
pub use hash::{compress, permute, HashError, Mimc, MimcParameters};
pub use merkle::{
    Accumulator, AccumulatorError, AccumulatorEvent, AccumulatorSnapshot, EventSink,
    FrontierAccumulator, SharedAccumulator, DEFAULT_TREE_HEIGHT,
};

/// Result type used by accumulator operations.
pub type AccumulatorResult<T> = core::result::Result<T, AccumulatorError>;
