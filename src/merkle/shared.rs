//! Thread-safe single-writer wrapper around [`FrontierAccumulator`].
//!
//! Insertions take one mutex for their whole read-modify-write, so concurrent
//! writers are serialised. After each successful insertion an immutable
//! [`AccumulatorSnapshot`] is published; readers clone its `Arc` and never
//! wait on a running insertion.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::events::{DiscardEvents, EventSink};
use super::frontier::FrontierAccumulator;
use super::types::AccumulatorSnapshot;
use crate::field::FieldElement;
use crate::AccumulatorResult;

pub struct SharedAccumulator<const HEIGHT: usize, S: EventSink = DiscardEvents> {
    writer: Mutex<FrontierAccumulator<HEIGHT, S>>,
    published: RwLock<Arc<AccumulatorSnapshot>>,
}

impl<const HEIGHT: usize, S: EventSink> SharedAccumulator<HEIGHT, S> {
    pub fn new(accumulator: FrontierAccumulator<HEIGHT, S>) -> Self {
        let published = RwLock::new(Arc::new(accumulator.snapshot()));
        Self {
            writer: Mutex::new(accumulator),
            published,
        }
    }

    pub fn insert_leaf(&self, value: FieldElement) -> AccumulatorResult<FieldElement> {
        let mut accumulator = self.writer.lock();
        let root = accumulator.insert_leaf(value)?;
        self.publish(&accumulator);
        Ok(root)
    }

    pub fn insert_leaves(&self, values: &[FieldElement]) -> AccumulatorResult<FieldElement> {
        let mut accumulator = self.writer.lock();
        let root = accumulator.insert_leaves(values)?;
        self.publish(&accumulator);
        Ok(root)
    }

    /// Latest published state.
    pub fn latest(&self) -> Arc<AccumulatorSnapshot> {
        Arc::clone(&self.published.read())
    }

    pub fn root(&self) -> FieldElement {
        self.published.read().root
    }

    pub fn leaf_count(&self) -> u64 {
        self.published.read().leaf_count
    }

    /// Runs `f` with exclusive access to the sink, e.g. to drain recorded
    /// events.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(self.writer.lock().sink_mut())
    }

    pub fn into_inner(self) -> FrontierAccumulator<HEIGHT, S> {
        self.writer.into_inner()
    }

    // Called with the writer lock held so snapshots are published in
    // insertion order.
    fn publish(&self, accumulator: &FrontierAccumulator<HEIGHT, S>) {
        *self.published.write() = Arc::new(accumulator.snapshot());
    }
}

impl<const HEIGHT: usize> Default for SharedAccumulator<HEIGHT, DiscardEvents> {
    fn default() -> Self {
        Self::new(FrontierAccumulator::new())
    }
}
