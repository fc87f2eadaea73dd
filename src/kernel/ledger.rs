use std::collections::VecDeque;

use super::record::IntentRecord;

/// Default ledger capacity.
pub const MAX_EVENTS: usize = 200;

/// Default number of records surfaced in a memory snapshot.
pub const RECENT_LIMIT: usize = 5;

/// Bounded, insertion-ordered history of accepted intents.
///
/// Insertion order is acceptance order. The ledger does not enforce
/// timestamp ordering itself; the core appends under one lock with a
/// single clock read per call, which is enough.
#[derive(Debug)]
pub struct VolitionLedger {
    events: VecDeque<IntentRecord>,
    capacity: usize,
}

impl VolitionLedger {
    pub fn new() -> Self {
        Self::with_capacity(MAX_EVENTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append as newest. At capacity the oldest record is evicted first,
    /// so the size never exceeds `capacity` and append stays O(1).
    pub fn append(&mut self, record: IntentRecord) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(record);
    }

    /// Up to `limit` records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<IntentRecord> {
        self.events.iter().rev().take(limit).cloned().collect()
    }

    /// The most recently appended record for `user_id`, if any.
    pub fn last_for_user(&self, user_id: &str) -> Option<&IntentRecord> {
        self.events.iter().rev().find(|record| record.user_id == user_id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for VolitionLedger {
    fn default() -> Self {
        Self::new()
    }
}
