//! Append-only Merkle accumulator storing `O(height)` state.
//!
//! The full binary tree is never materialised. Every node is addressed by its
//! level-order index and only the frontier is kept. The frontier holds one
//! value per level: the most recent complete left subtree still waiting for
//! its right sibling. Missing right siblings are padded with the zero element
//! at every level.

use tracing::{debug, trace, warn};

use super::events::{AccumulatorEvent, DiscardEvents, EventSink, LeafInserted, LeavesInserted};
use super::types::{
    is_right_child, leaf_node_index, leaf_slot, parent_index, AccumulatorError,
    AccumulatorSnapshot,
};
use crate::field::FieldElement;
use crate::hash::{Mimc, MimcParameters};
use crate::AccumulatorResult;

/// Tree height of the reference deployment.
pub const DEFAULT_TREE_HEIGHT: usize = 32;

/// Accumulator with the reference height and events discarded.
pub type Accumulator = FrontierAccumulator<DEFAULT_TREE_HEIGHT>;

/// Frontier-compressed Merkle accumulator of fixed height `HEIGHT`.
///
/// Capacity is `2^HEIGHT` leaves. `HEIGHT` must lie in `1..=63`; other values
/// fail to compile once the accumulator is instantiated.
///
/// Insertions are read-modify-write over the frontier and leaf count. Callers
/// sharing one instance across threads must serialise them, see
/// [`SharedAccumulator`](super::shared::SharedAccumulator).
#[derive(Debug, Clone)]
pub struct FrontierAccumulator<const HEIGHT: usize, S: EventSink = DiscardEvents> {
    hasher: Mimc,
    leaf_count: u64,
    frontier: Vec<FieldElement>,
    root: FieldElement,
    sink: S,
}

impl<const HEIGHT: usize> FrontierAccumulator<HEIGHT, DiscardEvents> {
    /// Empty accumulator over the public MiMC parameters.
    pub fn new() -> Self {
        Self::with_sink(DiscardEvents)
    }
}

impl<const HEIGHT: usize> Default for FrontierAccumulator<HEIGHT, DiscardEvents> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const HEIGHT: usize, S: EventSink> FrontierAccumulator<HEIGHT, S> {
    /// Tree height, checked at compile time.
    pub const TREE_HEIGHT: usize = {
        assert!(HEIGHT >= 1 && HEIGHT <= 63, "tree height must be within 1..=63");
        HEIGHT
    };

    /// Maximum number of leaves.
    pub const WIDTH: u64 = 1u64 << Self::TREE_HEIGHT;

    /// Empty accumulator publishing to `sink`.
    pub fn with_sink(sink: S) -> Self {
        Self::from_parts(Mimc::public(), sink)
    }

    /// Empty accumulator over custom MiMC parameters.
    pub fn with_parameters(params: MimcParameters, sink: S) -> AccumulatorResult<Self> {
        let hasher = Mimc::new(params)?;
        Ok(Self::from_parts(hasher, sink))
    }

    /// Restores an accumulator from a snapshot taken with the same height.
    ///
    /// The parameters must be those the snapshot was produced with; they are
    /// not recorded in the snapshot itself.
    pub fn from_snapshot(
        snapshot: AccumulatorSnapshot,
        params: MimcParameters,
        sink: S,
    ) -> AccumulatorResult<Self> {
        let hasher = Mimc::new(params)?;
        if snapshot.height as usize != Self::TREE_HEIGHT {
            return Err(AccumulatorError::InvalidSnapshot {
                reason: "tree height mismatch",
            });
        }
        if snapshot.frontier.len() != Self::TREE_HEIGHT + 1 {
            return Err(AccumulatorError::InvalidSnapshot {
                reason: "frontier length must be height + 1",
            });
        }
        if snapshot.leaf_count > Self::WIDTH {
            return Err(AccumulatorError::InvalidSnapshot {
                reason: "leaf count exceeds tree width",
            });
        }
        if snapshot.leaf_count == 0 && snapshot.root != empty_root(&hasher, Self::TREE_HEIGHT) {
            return Err(AccumulatorError::InvalidSnapshot {
                reason: "empty snapshot carries a non-empty root",
            });
        }
        Ok(Self {
            hasher,
            leaf_count: snapshot.leaf_count,
            frontier: snapshot.frontier,
            root: snapshot.root,
            sink,
        })
    }

    fn from_parts(hasher: Mimc, sink: S) -> Self {
        let root = empty_root(&hasher, Self::TREE_HEIGHT);
        Self {
            hasher,
            leaf_count: 0,
            frontier: vec![FieldElement::ZERO; Self::TREE_HEIGHT + 1],
            root,
            sink,
        }
    }

    pub fn height(&self) -> usize {
        Self::TREE_HEIGHT
    }

    pub fn width(&self) -> u64 {
        Self::WIDTH
    }

    /// Number of leaves inserted so far.
    pub fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    /// Number of leaves that can still be inserted.
    pub fn remaining(&self) -> u64 {
        Self::WIDTH - self.leaf_count
    }

    pub fn is_full(&self) -> bool {
        self.leaf_count == Self::WIDTH
    }

    /// Frontier values indexed by level, `height + 1` entries.
    pub fn frontier(&self) -> &[FieldElement] {
        &self.frontier
    }

    /// Root after the latest insertion, or the all-padding root when empty.
    pub fn root(&self) -> FieldElement {
        self.root
    }

    pub fn parameters(&self) -> &MimcParameters {
        self.hasher.parameters()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn snapshot(&self) -> AccumulatorSnapshot {
        AccumulatorSnapshot {
            height: Self::TREE_HEIGHT as u32,
            leaf_count: self.leaf_count,
            frontier: self.frontier.clone(),
            root: self.root,
        }
    }

    /// Appends one leaf and returns the new root.
    ///
    /// Fails with [`AccumulatorError::CapacityExceeded`] when the tree is
    /// full, leaving the state untouched.
    pub fn insert_leaf(&mut self, value: FieldElement) -> AccumulatorResult<FieldElement> {
        self.ensure_capacity()?;

        let leaf_index = self.leaf_count;
        let slot = leaf_slot(leaf_index) as usize;
        let mut node_index = leaf_node_index(leaf_index, Self::TREE_HEIGHT);
        let mut node_value = value;

        for level in 0..Self::TREE_HEIGHT {
            if level == slot {
                self.frontier[slot] = node_value;
            }
            node_value = self.merge(node_index, node_value, level);
            node_index = parent_index(node_index);
        }
        // The last leaf of a full tree lands in the top slot, as in the batch path.
        if slot == Self::TREE_HEIGHT {
            self.frontier[slot] = node_value;
        }

        self.leaf_count += 1;
        self.root = node_value;
        debug!(leaf_index, slot, root = %node_value, "leaf inserted");

        self.sink.publish(AccumulatorEvent::LeafInserted(LeafInserted {
            leaf_index,
            value,
            root: node_value,
        }));
        Ok(node_value)
    }

    /// Appends a batch of leaves and returns the new root.
    ///
    /// Leaves beyond the remaining capacity are dropped silently; only the
    /// accepted prefix is committed and reported. Fails with
    /// [`AccumulatorError::CapacityExceeded`] only when no capacity is left
    /// at all. An empty batch returns the current root without publishing.
    pub fn insert_leaves(
        &mut self,
        values: &[FieldElement],
    ) -> AccumulatorResult<FieldElement> {
        self.ensure_capacity()?;

        let remaining = self.remaining();
        let accepted_len =
            usize::try_from(remaining).map_or(values.len(), |cap| cap.min(values.len()));
        let accepted = &values[..accepted_len];
        if accepted.len() < values.len() {
            debug!(
                offered = values.len(),
                accepted = accepted.len(),
                "truncating batch to remaining capacity"
            );
        }
        if accepted.is_empty() {
            return Ok(self.root);
        }

        let first_leaf_index = self.leaf_count;
        let mut node_index = 0u64;
        let mut node_value = FieldElement::ZERO;
        let mut slot = 0usize;

        for (offset, &value) in accepted.iter().enumerate() {
            let leaf_index = first_leaf_index + offset as u64;
            node_index = leaf_node_index(leaf_index, Self::TREE_HEIGHT);
            node_value = value;
            slot = leaf_slot(leaf_index) as usize;

            if slot == 0 {
                self.frontier[0] = node_value;
                continue;
            }
            // Every level below `slot` holds a right child, so each step
            // consumes the stored left sibling.
            for level in 1..=slot {
                node_value = self.merge(node_index, node_value, level - 1);
                node_index = parent_index(node_index);
            }
            self.frontier[slot] = node_value;
            trace!(leaf_index, slot, "frontier updated");
        }

        // Finish the path of the last accepted leaf up to the root.
        for level in slot + 1..=Self::TREE_HEIGHT {
            node_value = self.merge(node_index, node_value, level - 1);
            node_index = parent_index(node_index);
        }

        self.leaf_count += accepted.len() as u64;
        self.root = node_value;
        debug!(
            first_leaf_index,
            accepted = accepted.len(),
            root = %node_value,
            "leaves inserted"
        );

        self.sink.publish(AccumulatorEvent::LeavesInserted(LeavesInserted {
            first_leaf_index,
            values: accepted.to_vec(),
            root: node_value,
        }));
        Ok(node_value)
    }

    fn ensure_capacity(&self) -> AccumulatorResult<()> {
        if self.is_full() {
            warn!(
                leaf_count = self.leaf_count,
                width = Self::WIDTH,
                "insertion rejected: accumulator is full"
            );
            return Err(AccumulatorError::CapacityExceeded {
                leaf_count: self.leaf_count,
                width: Self::WIDTH,
            });
        }
        Ok(())
    }

    /// Combines the node at `node_index` with its sibling. A right child takes
    /// the stored left sibling at `sibling_level`; a left child is padded with
    /// zero.
    fn merge(
        &self,
        node_index: u64,
        node_value: FieldElement,
        sibling_level: usize,
    ) -> FieldElement {
        if is_right_child(node_index) {
            self.hasher.compress_pair(self.frontier[sibling_level], node_value)
        } else {
            self.hasher.compress_pair(node_value, FieldElement::ZERO)
        }
    }
}

/// Root of a tree with no leaves: zero padded up through every level.
pub fn empty_root(hasher: &Mimc, height: usize) -> FieldElement {
    (0..height).fold(FieldElement::ZERO, |node, _| {
        hasher.compress_pair(node, FieldElement::ZERO)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::MIMC_SEED;
    use crate::merkle::events::RecordingSink;

    // Few rounds keep the exhaustive cases fast; the algorithm is independent
    // of the round count.
    fn fast_params() -> MimcParameters {
        MimcParameters::new(MIMC_SEED, 3)
    }

    fn leaves(count: u64) -> Vec<FieldElement> {
        (0..count).map(|i| FieldElement::from(i * 7 + 3)).collect()
    }

    fn fast<const H: usize>() -> FrontierAccumulator<H, RecordingSink> {
        FrontierAccumulator::with_parameters(fast_params(), RecordingSink::new()).unwrap()
    }

    /// Root recomputed from all leaves, level by level, zero padded.
    fn naive_root(hasher: &Mimc, height: usize, leaves: &[FieldElement]) -> FieldElement {
        let mut level: Vec<FieldElement> = leaves.to_vec();
        for _ in 0..height {
            level = level
                .chunks(2)
                .map(|pair| {
                    let right = pair.get(1).copied().unwrap_or(FieldElement::ZERO);
                    hasher.compress_pair(pair[0], right)
                })
                .collect();
            if level.is_empty() {
                level.push(hasher.compress_pair(FieldElement::ZERO, FieldElement::ZERO));
            }
        }
        level[0]
    }

    #[test]
    fn height_and_width_constants() {
        let acc = FrontierAccumulator::<5>::new();
        assert_eq!(acc.height(), 5);
        assert_eq!(acc.width(), 32);
        assert_eq!(acc.frontier().len(), 6);
        assert_eq!(Accumulator::WIDTH, 1u64 << 32);
    }

    #[test]
    fn single_insertions_match_naive_tree() {
        let mut acc = fast::<4>();
        let hasher = Mimc::new(fast_params()).unwrap();
        let values = leaves(16);
        for (i, value) in values.iter().enumerate() {
            let root = acc.insert_leaf(*value).unwrap();
            assert_eq!(root, naive_root(&hasher, 4, &values[..=i]), "after leaf {i}");
            assert_eq!(acc.root(), root);
        }
    }

    #[test]
    fn empty_root_matches_naive_tree() {
        let acc = fast::<3>();
        let hasher = Mimc::new(fast_params()).unwrap();
        assert_eq!(acc.root(), naive_root(&hasher, 3, &[]));
        assert_eq!(acc.root(), empty_root(&hasher, 3));
    }

    #[test]
    fn every_batch_split_matches_single_path() {
        let values = leaves(8);
        let mut single = fast::<3>();
        let expected: Vec<FieldElement> = values
            .iter()
            .map(|v| single.insert_leaf(*v).unwrap())
            .collect();

        for split in 0..=values.len() {
            let mut batched = fast::<3>();
            let first = batched.insert_leaves(&values[..split]).unwrap();
            if split > 0 {
                assert_eq!(first, expected[split - 1], "split {split}");
            }
            if split < values.len() {
                let second = batched.insert_leaves(&values[split..]).unwrap();
                assert_eq!(second, expected[values.len() - 1], "split {split}");
            }
            assert_eq!(batched.frontier(), single.frontier(), "split {split}");
            assert_eq!(batched.leaf_count(), 8);
        }
    }

    #[test]
    fn full_accumulator_rejects_without_mutation() {
        let mut acc = fast::<2>();
        acc.insert_leaves(&leaves(4)).unwrap();
        let before = acc.snapshot();
        let events_before = acc.sink().len();

        let err = acc.insert_leaf(FieldElement::ONE).unwrap_err();
        assert_eq!(
            err,
            AccumulatorError::CapacityExceeded {
                leaf_count: 4,
                width: 4
            }
        );
        assert!(matches!(
            acc.insert_leaves(&leaves(2)),
            Err(AccumulatorError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            acc.insert_leaves(&[]),
            Err(AccumulatorError::CapacityExceeded { .. })
        ));
        assert_eq!(acc.snapshot(), before);
        assert_eq!(acc.sink().len(), events_before);
    }

    #[test]
    fn filling_leaf_records_root_in_top_slot() {
        let values = leaves(8);
        let mut single = fast::<3>();
        for value in &values {
            single.insert_leaf(*value).unwrap();
        }
        assert!(single.is_full());
        assert_eq!(single.frontier()[3], single.root());

        let mut batched = fast::<3>();
        batched.insert_leaves(&values).unwrap();
        assert_eq!(batched.frontier()[3], batched.root());
        assert_eq!(batched.snapshot(), single.snapshot());
    }

    #[test]
    fn oversized_batch_is_truncated() {
        let mut acc = fast::<2>();
        acc.insert_leaf(FieldElement::from(100u64)).unwrap();
        let offered = leaves(10);
        let root = acc.insert_leaves(&offered).unwrap();
        assert_eq!(acc.leaf_count(), 4);
        assert!(acc.is_full());

        let mut reference = fast::<2>();
        reference.insert_leaf(FieldElement::from(100u64)).unwrap();
        for value in &offered[..3] {
            reference.insert_leaf(*value).unwrap();
        }
        assert_eq!(root, reference.root());

        match acc.sink().last() {
            Some(AccumulatorEvent::LeavesInserted(event)) => {
                assert_eq!(event.first_leaf_index, 1);
                assert_eq!(event.values, offered[..3].to_vec());
                assert_eq!(event.root, root);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut acc = fast::<3>();
        acc.insert_leaf(FieldElement::from(5u64)).unwrap();
        let before = acc.snapshot();
        assert_eq!(acc.insert_leaves(&[]).unwrap(), before.root);
        assert_eq!(acc.snapshot(), before);
        assert_eq!(acc.sink().len(), 1);
    }

    #[test]
    fn single_insert_event_carries_old_leaf_count() {
        let mut acc = fast::<3>();
        acc.insert_leaf(FieldElement::from(1u64)).unwrap();
        let root = acc.insert_leaf(FieldElement::from(2u64)).unwrap();
        assert_eq!(
            acc.sink().last(),
            Some(&AccumulatorEvent::LeafInserted(LeafInserted {
                leaf_index: 1,
                value: FieldElement::from(2u64),
                root,
            }))
        );
    }

    #[test]
    fn frontier_holds_completed_left_subtrees() {
        let mut acc = fast::<3>();
        let hasher = Mimc::new(fast_params()).unwrap();
        let values = leaves(3);
        acc.insert_leaves(&values).unwrap();
        // Leaf 2 is a pending left child; leaves 0 and 1 form a complete
        // level-one left subtree.
        assert_eq!(acc.frontier()[0], values[2]);
        assert_eq!(acc.frontier()[1], hasher.compress_pair(values[0], values[1]));
    }

    #[test]
    fn snapshot_restore_continues_identically() {
        let values = leaves(6);
        let mut original = fast::<3>();
        original.insert_leaves(&values[..3]).unwrap();

        let mut restored = FrontierAccumulator::<3, RecordingSink>::from_snapshot(
            original.snapshot(),
            fast_params(),
            RecordingSink::new(),
        )
        .unwrap();
        assert_eq!(
            restored.insert_leaves(&values[3..]).unwrap(),
            original.insert_leaves(&values[3..]).unwrap()
        );
    }

    #[test]
    fn snapshot_validation() {
        let snapshot = fast::<3>().snapshot();
        let restore = |snapshot: AccumulatorSnapshot| {
            FrontierAccumulator::<3>::from_snapshot(snapshot, fast_params(), DiscardEvents)
        };

        let mut wrong_height = snapshot.clone();
        wrong_height.height = 4;
        assert!(matches!(
            restore(wrong_height),
            Err(AccumulatorError::InvalidSnapshot { .. })
        ));

        let mut short = snapshot.clone();
        short.frontier.pop();
        assert!(restore(short).is_err());

        let mut overfull = snapshot.clone();
        overfull.leaf_count = 9;
        assert!(restore(overfull).is_err());

        let mut forged = snapshot.clone();
        forged.root = FieldElement::ONE;
        assert!(restore(forged).is_err());

        assert!(restore(snapshot).is_ok());
    }

    #[test]
    fn zero_round_parameters_rejected() {
        let err = FrontierAccumulator::<3>::with_parameters(
            MimcParameters::new(MIMC_SEED, 0),
            DiscardEvents,
        )
        .unwrap_err();
        assert!(matches!(err, AccumulatorError::InvalidParameter(_)));
    }

    #[test]
    fn height_one_tree() {
        let mut acc = fast::<1>();
        let hasher = Mimc::new(fast_params()).unwrap();
        let a = FieldElement::from(11u64);
        let b = FieldElement::from(12u64);
        assert_eq!(
            acc.insert_leaf(a).unwrap(),
            hasher.compress_pair(a, FieldElement::ZERO)
        );
        assert_eq!(acc.insert_leaf(b).unwrap(), hasher.compress_pair(a, b));
        assert!(acc.is_full());
    }
}
