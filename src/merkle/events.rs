//! Insertion notifications for off-chain indexers.
//!
//! The accumulator writes every successful insertion to an [`EventSink`]. The
//! sink is a pure output channel: nothing published there feeds back into
//! accumulator state, and the roots returned by the insert calls do not
//! depend on it.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::field::FieldElement;

/// Emitted after a single-leaf insertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafInserted {
    pub leaf_index: u64,
    pub value: FieldElement,
    pub root: FieldElement,
}

/// Emitted after a batch insertion. `values` holds only the accepted
/// (possibly truncated) prefix of the submitted batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavesInserted {
    pub first_leaf_index: u64,
    pub values: Vec<FieldElement>,
    pub root: FieldElement,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AccumulatorEvent {
    LeafInserted(LeafInserted),
    LeavesInserted(LeavesInserted),
}

impl AccumulatorEvent {
    /// Root after the insertion that produced this event.
    pub fn root(&self) -> FieldElement {
        match self {
            AccumulatorEvent::LeafInserted(event) => event.root,
            AccumulatorEvent::LeavesInserted(event) => event.root,
        }
    }

    /// Index of the first leaf the event covers.
    pub fn first_leaf_index(&self) -> u64 {
        match self {
            AccumulatorEvent::LeafInserted(event) => event.leaf_index,
            AccumulatorEvent::LeavesInserted(event) => event.first_leaf_index,
        }
    }

    /// Leaf values covered by the event, in insertion order.
    pub fn values(&self) -> &[FieldElement] {
        match self {
            AccumulatorEvent::LeafInserted(event) => core::slice::from_ref(&event.value),
            AccumulatorEvent::LeavesInserted(event) => &event.values,
        }
    }
}

/// Write-only output channel for insertion notifications.
pub trait EventSink {
    fn publish(&mut self, event: AccumulatorEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscardEvents;

impl EventSink for DiscardEvents {
    fn publish(&mut self, _event: AccumulatorEvent) {}
}

/// Keeps every event in memory, in publication order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    events: Vec<AccumulatorEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AccumulatorEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&AccumulatorEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drains the recorded events.
    pub fn take(&mut self) -> Vec<AccumulatorEvent> {
        core::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn publish(&mut self, event: AccumulatorEvent) {
        self.events.push(event);
    }
}

/// Logs every event at `info` level with structured fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&mut self, event: AccumulatorEvent) {
        match &event {
            AccumulatorEvent::LeafInserted(inserted) => info!(
                leaf_index = inserted.leaf_index,
                value = %inserted.value,
                root = %inserted.root,
                "leaf inserted"
            ),
            AccumulatorEvent::LeavesInserted(inserted) => info!(
                first_leaf_index = inserted.first_leaf_index,
                count = inserted.values.len(),
                root = %inserted.root,
                "leaves inserted"
            ),
        }
    }
}

/// Any closure taking events by value is a sink, e.g. one forwarding into a
/// channel.
impl<F> EventSink for F
where
    F: FnMut(AccumulatorEvent),
{
    fn publish(&mut self, event: AccumulatorEvent) {
        self(event)
    }
}
