// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Row types shared by the record store and the event log.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KernelError;

/// The three accepted command kinds. Also the `type` column of the event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Create,
    Update,
    Delete,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Create => "create",
            EventType::Update => "update",
            EventType::Delete => "delete",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(EventType::Create),
            "update" => Ok(EventType::Update),
            "delete" => Ok(EventType::Delete),
            other => Err(KernelError::UnsupportedCommand(other.to_string())),
        }
    }
}

/// One version of the value bound to a key.
///
/// Rows are never removed. `id` is assigned by the store and grows
/// monotonically, so the highest `id` among rows sharing a key is the
/// most recent one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: i64,
    pub key: String,
    pub value: String,
    pub active: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// Immutable record of an accepted command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub key: String,
    pub created_at_ms: i64,
}

/// Row lookup used by both the processor and the query side.
///
/// `None` leaves a column unconstrained. Stores return the most recent
/// matching row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerFilter<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
    pub active: Option<bool>,
}

impl<'a> AnswerFilter<'a> {
    pub fn key(key: &'a str) -> Self {
        Self { key, value: None, active: None }
    }

    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    pub fn active(mut self) -> Self {
        self.active = Some(true);
        self
    }

    pub fn matches(&self, record: &AnswerRecord) -> bool {
        record.key == self.key
            && self.value.map_or(true, |v| record.value == v)
            && self.active.map_or(true, |a| record.active == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: &str, active: bool) -> AnswerRecord {
        AnswerRecord {
            id: 1,
            key: "key1".into(),
            value: value.into(),
            active,
            created_at_ms: 0,
            updated_at_ms: 0,
        }
    }

    #[test]
    fn test_event_type_parse() {
        assert_eq!("create".parse::<EventType>().unwrap(), EventType::Create);
        assert_eq!("delete".parse::<EventType>().unwrap(), EventType::Delete);
        assert_eq!(
            "upsert".parse::<EventType>(),
            Err(KernelError::UnsupportedCommand("upsert".into()))
        );
    }

    #[test]
    fn test_event_entry_json_shape() {
        let entry = EventEntry {
            id: 7,
            kind: EventType::Update,
            key: "key1".into(),
            created_at_ms: 42,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "update");
        assert_eq!(json["key"], "key1");
    }

    #[test]
    fn test_filter_matching() {
        let live = record("value1", true);
        let dead = record("value1", false);

        assert!(AnswerFilter::key("key1").matches(&dead));
        assert!(AnswerFilter::key("key1").active().matches(&live));
        assert!(!AnswerFilter::key("key1").active().matches(&dead));
        assert!(!AnswerFilter::key("key1").value("value2").matches(&live));
        assert!(!AnswerFilter::key("key2").matches(&live));
    }
}
