use std::collections::HashMap;
use std::path::Path;

use answer_kernel::{Command, EventEntry};

use crate::engine::open_or_create;

/// Apply one command directly to the database, exactly as the node would.
pub fn run(db: &Path, kind: &str, key: &str, value: Option<String>) -> anyhow::Result<EventEntry> {
    let mut data = HashMap::new();
    data.insert("key".to_string(), key.to_string());
    if let Some(value) = value {
        data.insert("value".to_string(), value);
    }

    let command = Command::from_parts(kind, &data)?;
    let mut kernel = open_or_create(db)?;
    let entry = kernel.process(&command)?;

    println!("Accepted: {} {:?} (event #{})", entry.kind, entry.key, entry.id);
    Ok(entry)
}
