// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! In-memory store.
//!
//! Transactions work on a full copy of the tables and swap it in on commit,
//! so an abandoned transaction is simply discarded.

use crate::error::{KernelError, KernelResult};
use crate::store::{now_ms, AnswerReader, AnswerStore, StoreTx};
use crate::types::{AnswerFilter, AnswerRecord, EventEntry, EventType};

#[derive(Clone, Debug, Default)]
struct Tables {
    answers: Vec<AnswerRecord>,
    events: Vec<EventEntry>,
}

impl Tables {
    fn find_answer(&self, filter: &AnswerFilter<'_>) -> Option<AnswerRecord> {
        self.answers.iter().rev().find(|r| filter.matches(r)).cloned()
    }

    fn answers_for(&self, key: &str) -> Vec<AnswerRecord> {
        self.answers.iter().filter(|r| r.key == key).cloned().collect()
    }

    fn events_for(&self, key: &str) -> Vec<EventEntry> {
        self.events.iter().filter(|e| e.key == key).cloned().collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Tables,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.tables.answers
    }

    pub fn events(&self) -> &[EventEntry] {
        &self.tables.events
    }
}

impl AnswerReader for MemoryStore {
    fn find_answer(&self, filter: &AnswerFilter<'_>) -> KernelResult<Option<AnswerRecord>> {
        Ok(self.tables.find_answer(filter))
    }

    fn answers_for(&self, key: &str) -> KernelResult<Vec<AnswerRecord>> {
        Ok(self.tables.answers_for(key))
    }

    fn events_for(&self, key: &str) -> KernelResult<Vec<EventEntry>> {
        Ok(self.tables.events_for(key))
    }
}

impl AnswerStore for MemoryStore {
    type Tx<'a> = MemoryTx<'a>;

    fn begin(&mut self) -> KernelResult<MemoryTx<'_>> {
        let working = self.tables.clone();
        Ok(MemoryTx {
            target: &mut self.tables,
            working,
        })
    }
}

pub struct MemoryTx<'a> {
    target: &'a mut Tables,
    working: Tables,
}

impl AnswerReader for MemoryTx<'_> {
    fn find_answer(&self, filter: &AnswerFilter<'_>) -> KernelResult<Option<AnswerRecord>> {
        Ok(self.working.find_answer(filter))
    }

    fn answers_for(&self, key: &str) -> KernelResult<Vec<AnswerRecord>> {
        Ok(self.working.answers_for(key))
    }

    fn events_for(&self, key: &str) -> KernelResult<Vec<EventEntry>> {
        Ok(self.working.events_for(key))
    }
}

impl StoreTx for MemoryTx<'_> {
    fn insert_answer(&mut self, key: &str, value: &str) -> KernelResult<AnswerRecord> {
        let now = now_ms();
        let record = AnswerRecord {
            id: self.working.answers.len() as i64 + 1,
            key: key.to_string(),
            value: value.to_string(),
            active: true,
            created_at_ms: now,
            updated_at_ms: now,
        };
        self.working.answers.push(record.clone());
        Ok(record)
    }

    fn set_active(&mut self, id: i64, active: bool) -> KernelResult<()> {
        let row = self
            .working
            .answers
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(KernelError::NotFound)?;
        row.active = active;
        row.updated_at_ms = now_ms();
        Ok(())
    }

    fn append_event(&mut self, kind: EventType, key: &str) -> KernelResult<EventEntry> {
        let entry = EventEntry {
            id: self.working.events.len() as i64 + 1,
            kind,
            key: key.to_string(),
            created_at_ms: now_ms(),
        };
        self.working.events.push(entry.clone());
        Ok(entry)
    }

    fn commit(self) -> KernelResult<()> {
        *self.target = self.working;
        Ok(())
    }
}
