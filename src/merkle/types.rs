use crate::field::FieldElement;
use crate::hash::HashError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tree level at which inserting leaf `leaf_index` persists a new frontier
/// value: the number of trailing set bits of the index.
///
/// A leaf with `t` trailing ones is the last leaf of a complete subtree of
/// height `t`, and that subtree's root is a left child at level `t`.
#[inline]
pub fn leaf_slot(leaf_index: u64) -> u32 {
    leaf_index.trailing_ones()
}

/// Level-order node index of a leaf in a tree of the given height
/// (root at index `0`).
#[inline]
pub fn leaf_node_index(leaf_index: u64, height: usize) -> u64 {
    leaf_index + (1u64 << height) - 1
}

/// Even level-order indices are right children, odd ones left children.
#[inline]
pub fn is_right_child(node_index: u64) -> bool {
    node_index % 2 == 0
}

/// Parent of a non-root node in level-order numbering.
#[inline]
pub fn parent_index(node_index: u64) -> u64 {
    debug_assert!(node_index > 0, "the root has no parent");
    if is_right_child(node_index) {
        (node_index - 1) / 2
    } else {
        node_index / 2
    }
}

/// Persistable view of an accumulator's full state.
///
/// `frontier` always holds `height + 1` entries indexed by tree level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorSnapshot {
    pub height: u32,
    pub leaf_count: u64,
    pub frontier: Vec<FieldElement>,
    pub root: FieldElement,
}

/// Serialisation error domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerKind {
    Snapshot,
    Event,
}

/// Errors emitted by the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccumulatorError {
    /// No capacity is left for any further leaf. Nothing was modified.
    CapacityExceeded { leaf_count: u64, width: u64 },
    /// The hash parameters handed to the accumulator are unusable.
    InvalidParameter(HashError),
    /// A snapshot does not describe a state of this accumulator shape.
    InvalidSnapshot { reason: &'static str },
    Serialization(SerKind),
}

impl fmt::Display for AccumulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccumulatorError::CapacityExceeded { leaf_count, width } => write!(
                f,
                "accumulator is full: {} of {} leaves used",
                leaf_count, width
            ),
            AccumulatorError::InvalidParameter(err) => write!(f, "{}", err),
            AccumulatorError::InvalidSnapshot { reason } => {
                write!(f, "invalid snapshot: {}", reason)
            }
            AccumulatorError::Serialization(kind) => {
                write!(f, "serialisation error in {:?}", kind)
            }
        }
    }
}

impl std::error::Error for AccumulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccumulatorError::InvalidParameter(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HashError> for AccumulatorError {
    fn from(err: HashError) -> Self {
        AccumulatorError::InvalidParameter(err)
    }
}
