//! Append-only Merkle accumulator.
//!
//! The module fixes the following protocol knobs:
//!
//! * **Arity:** binary. Nodes are numbered in level order with the root at
//!   `0`; leaf `i` sits at node `i + 2^height - 1`. Even indices are right
//!   children.
//! * **Padding:** a left child without a right sibling is combined with the
//!   zero field element at every level. There are no precomputed
//!   empty-subtree digests.
//! * **Node hash:** `compress([left, right], 0)` from [`crate::hash`].
//! * **State:** only the frontier (`height + 1` values) and the leaf count are
//!   retained; see [`FrontierAccumulator`].
//!
//! Insertions publish [`AccumulatorEvent`]s to an [`EventSink`] so indexers can
//! rebuild the full tree elsewhere.

pub mod events;
mod frontier;
mod ser;
mod shared;
mod types;

pub use events::{
    AccumulatorEvent, DiscardEvents, EventSink, LeafInserted, LeavesInserted, RecordingSink,
    TracingSink,
};
pub use frontier::{empty_root, Accumulator, FrontierAccumulator, DEFAULT_TREE_HEIGHT};
pub use ser::{decode_event, decode_snapshot, encode_event, encode_snapshot};
pub use shared::SharedAccumulator;
pub use types::{
    is_right_child, leaf_node_index, leaf_slot, parent_index, AccumulatorError,
    AccumulatorSnapshot, SerKind,
};
