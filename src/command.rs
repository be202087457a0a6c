// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Command definitions and boundary parsing.

use std::collections::HashMap;

use crate::error::{KernelError, KernelResult};
use crate::types::EventType;

/// A client request against a single key.
///
/// Parsed once at the transport boundary; business logic never sees the
/// raw payload map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Create {
        key: String,
        value: String,
    },
    Update {
        key: String,
        value: String,
    },
    Delete {
        key: String,
        value: String,
    },
}

impl Command {
    /// Build a command from its wire parts: a type tag and a flat data map.
    pub fn from_parts(kind: &str, data: &HashMap<String, String>) -> KernelResult<Self> {
        let kind: EventType = kind.parse()?;

        let key = match data.get("key") {
            Some(k) if !k.is_empty() => k.clone(),
            Some(_) => return Err(KernelError::Validation("key must not be empty".into())),
            None => return Err(KernelError::Validation("missing field `key`".into())),
        };
        let value = data.get("value").cloned();

        match kind {
            EventType::Create => Ok(Command::Create {
                key,
                value: value.ok_or_else(missing_value)?,
            }),
            EventType::Update => Ok(Command::Update {
                key,
                value: value.ok_or_else(missing_value)?,
            }),
            EventType::Delete => Ok(Command::Delete {
                key,
                value: value.ok_or_else(missing_value)?,
            }),
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Command::Create { .. } => EventType::Create,
            Command::Update { .. } => EventType::Update,
            Command::Delete { .. } => EventType::Delete,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Command::Create { key, .. } | Command::Update { key, .. } | Command::Delete { key, .. } => key,
        }
    }
}

fn missing_value() -> KernelError {
    KernelError::Validation("missing field `value`".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parse_create() {
        let cmd = Command::from_parts("create", &data(&[("key", "key1"), ("value", "value1")])).unwrap();
        assert_eq!(
            cmd,
            Command::Create { key: "key1".into(), value: "value1".into() }
        );
        assert_eq!(cmd.event_type(), EventType::Create);
        assert_eq!(cmd.key(), "key1");
    }

    #[test]
    fn test_parse_delete_requires_value() {
        let cmd = Command::from_parts("delete", &data(&[("key", "key1"), ("value", "value1")])).unwrap();
        assert_eq!(cmd, Command::Delete { key: "key1".into(), value: "value1".into() });

        assert!(matches!(
            Command::from_parts("delete", &data(&[("key", "key1")])),
            Err(KernelError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Command::from_parts("create", &data(&[("value", "v")])),
            Err(KernelError::Validation(_))
        ));
        assert!(matches!(
            Command::from_parts("update", &data(&[("key", "")])),
            Err(KernelError::Validation(_))
        ));
        assert!(matches!(
            Command::from_parts("update", &data(&[("key", "key1")])),
            Err(KernelError::Validation(_))
        ));
        assert_eq!(
            Command::from_parts("rename", &data(&[("key", "key1")])),
            Err(KernelError::UnsupportedCommand("rename".into()))
        );
    }
}
