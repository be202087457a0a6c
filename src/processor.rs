// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Command Processor - the only place answers change.
//!
//! Each command runs in its own store transaction:
//! ```text
//! begin
//! ↓
//! lookup (validate against current rows)
//! ↓
//! record mutation (insert row | flip active)
//! ↓
//! event append
//! ↓
//! commit
//! ```
//! Any error before `commit` drops the transaction, so a log entry never
//! exists without its record mutation and vice versa.
//!
//! # Per-key transitions
//! - NONE -> ACTIVE (create)
//! - ACTIVE -> ACTIVE' (update, new row)
//! - ACTIVE -> INACTIVE (delete)
//! - INACTIVE -> ACTIVE (create)

use crate::command::Command;
use crate::error::{KernelError, KernelResult};
use crate::kernel::AnswerKernel;
use crate::store::{AnswerStore, StoreTx};
use crate::types::{AnswerFilter, EventEntry, EventType};

impl<S: AnswerStore> AnswerKernel<S> {
    /// Validate `command` against the store and apply it atomically.
    ///
    /// Returns the event log entry that was appended.
    pub fn process(&mut self, command: &Command) -> KernelResult<EventEntry> {
        let mut tx = self.store.begin()?;

        let entry = match command {
            Command::Create { key, value } => apply_create(&mut tx, key, value)?,
            Command::Update { key, value } => apply_update(&mut tx, key, value)?,
            Command::Delete { key, value } => apply_delete(&mut tx, key, value)?,
        };

        tx.commit()?;
        Ok(entry)
    }
}

/// Uniqueness is checked on (key, value, active), not on key alone: the
/// same key may hold several active values.
fn apply_create<T: StoreTx>(tx: &mut T, key: &str, value: &str) -> KernelResult<EventEntry> {
    let filter = AnswerFilter::key(key).value(value).active();
    if tx.find_answer(&filter)?.is_some() {
        return Err(KernelError::DuplicateKeyValue);
    }

    tx.insert_answer(key, value)?;
    tx.append_event(EventType::Create, key)
}

/// The previous active row is left active. Readers resolve the key by
/// taking the most recent active row.
fn apply_update<T: StoreTx>(tx: &mut T, key: &str, value: &str) -> KernelResult<EventEntry> {
    tx.find_answer(&AnswerFilter::key(key).active())?
        .ok_or(KernelError::NotFound)?;

    tx.insert_answer(key, value)?;
    tx.append_event(EventType::Update, key)
}

/// Targets the most recent row holding (key, value), so a value that was
/// deleted and created again can be deleted again.
fn apply_delete<T: StoreTx>(tx: &mut T, key: &str, value: &str) -> KernelResult<EventEntry> {
    let row = tx
        .find_answer(&AnswerFilter::key(key).value(value))?
        .ok_or(KernelError::NotFound)?;
    if !row.active {
        return Err(KernelError::AlreadyDeleted);
    }

    tx.set_active(row.id, false)?;
    tx.append_event(EventType::Delete, key)
}
