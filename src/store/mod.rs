// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Storage contract for the record table and the event log.
//!
//! The kernel never talks to a database directly. It is handed an
//! [`AnswerStore`] and drives every mutation through a [`StoreTx`]:
//!
//! ```text
//! begin() -> reads -> writes -> commit()
//!                      |
//!                      +-- error: tx dropped, nothing persisted
//! ```
//!
//! # Invariants
//! - A transaction that is dropped without `commit` leaves no trace.
//! - Row ids grow monotonically; "most recent" means highest id.
//! - Neither table ever loses a row.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::KernelResult;
use crate::types::{AnswerFilter, AnswerRecord, EventEntry, EventType};

/// Read access shared by stores and open transactions.
pub trait AnswerReader {
    /// Most recent answer row matching `filter`.
    fn find_answer(&self, filter: &AnswerFilter<'_>) -> KernelResult<Option<AnswerRecord>>;

    /// Every answer row for `key`, oldest first.
    fn answers_for(&self, key: &str) -> KernelResult<Vec<AnswerRecord>>;

    /// Every event for `key`, in insertion order.
    fn events_for(&self, key: &str) -> KernelResult<Vec<EventEntry>>;
}

/// An open unit of work. Dropping it without calling [`StoreTx::commit`]
/// rolls back.
pub trait StoreTx: AnswerReader {
    /// Append a new active answer row.
    fn insert_answer(&mut self, key: &str, value: &str) -> KernelResult<AnswerRecord>;

    /// Flip the activity flag of an existing row.
    fn set_active(&mut self, id: i64, active: bool) -> KernelResult<()>;

    /// Append an event log entry.
    fn append_event(&mut self, kind: EventType, key: &str) -> KernelResult<EventEntry>;

    fn commit(self) -> KernelResult<()>
    where
        Self: Sized;
}

/// A durable home for answers and events.
pub trait AnswerStore: AnswerReader {
    type Tx<'a>: StoreTx
    where
        Self: 'a;

    fn begin(&mut self) -> KernelResult<Self::Tx<'_>>;
}

/// Wall clock in milliseconds since the epoch.
pub fn now_ms() -> i64 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    now.as_millis() as i64
}
