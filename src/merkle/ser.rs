//! JSON encodings for snapshots and events.
//!
//! Field elements are written as `0x`-prefixed 32-byte hex strings so the
//! output can be consumed by EVM-side tooling unchanged. Decoding rejects
//! non-canonical field elements.

use super::events::AccumulatorEvent;
use super::types::{AccumulatorError, AccumulatorSnapshot, SerKind};

pub fn encode_snapshot(snapshot: &AccumulatorSnapshot) -> Result<Vec<u8>, AccumulatorError> {
    serde_json::to_vec(snapshot).map_err(|_| AccumulatorError::Serialization(SerKind::Snapshot))
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<AccumulatorSnapshot, AccumulatorError> {
    serde_json::from_slice(bytes).map_err(|_| AccumulatorError::Serialization(SerKind::Snapshot))
}

pub fn encode_event(event: &AccumulatorEvent) -> Result<Vec<u8>, AccumulatorError> {
    serde_json::to_vec(event).map_err(|_| AccumulatorError::Serialization(SerKind::Event))
}

pub fn decode_event(bytes: &[u8]) -> Result<AccumulatorEvent, AccumulatorError> {
    serde_json::from_slice(bytes).map_err(|_| AccumulatorError::Serialization(SerKind::Event))
}
