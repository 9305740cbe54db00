//! Append-only event log.
//!
//! Sequence numbers start at 0 and equal the record's index, so range
//! queries are slices.

use std::ops::Range;

use dadi_types::{AuctionEvent, EventKind, EventRecord, ResourceId, Result, Timestamp};

/// Ordered audit trail of everything the registry emitted.
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its sequence number.
    pub fn append(&mut self, recorded_at: Timestamp, event: AuctionEvent) -> u64 {
        let sequence = self.records.len() as u64;
        tracing::trace!(
            sequence,
            kind = %event.kind(),
            resource = %event.resource_id().short(),
            "Event appended"
        );
        self.records.push(EventRecord {
            sequence,
            recorded_at,
            event,
        });
        sequence
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    /// Every event concerning one resource, oldest first.
    pub fn for_resource(&self, resource_id: ResourceId) -> impl Iterator<Item = &EventRecord> {
        self.records
            .iter()
            .filter(move |r| r.event.resource_id() == resource_id)
    }

    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter(move |r| r.event.kind() == kind)
    }

    /// Records with `range.start <= sequence < range.end`, clamped to the log.
    #[must_use]
    pub fn range(&self, range: Range<u64>) -> &[EventRecord] {
        let len = self.records.len();
        let clamp = |seq: u64| usize::try_from(seq).map_or(len, |i| i.min(len));
        let start = clamp(range.start);
        let end = clamp(range.end).max(start);
        &self.records[start..end]
    }

    #[must_use]
    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Export the whole trail as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }
}
