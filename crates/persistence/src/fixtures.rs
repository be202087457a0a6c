use crate::error::{PersistenceError, Result};
use crate::sqlite::SqliteStore;
use answer_kernel::{AnswerKernel, Command};

use std::fs;
use std::path::{Path, PathBuf};

/// Database file name used by the node and the CLI when only a directory is given.
pub const DB_FILE: &str = "events.db";

/// Build a database under `dir` holding a small but complete history:
///
/// - `key1`: create, update, delete of the first version
/// - `key2`: create twice with different values (two active rows)
/// - `key3`: create then delete (no live answer)
pub fn generate_test_scenario(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let db_path = dir.join(DB_FILE);
    let mut kernel = AnswerKernel::new(SqliteStore::open(&db_path)?);

    let script = [
        Command::Create { key: "key1".into(), value: "value1".into() },
        Command::Update { key: "key1".into(), value: "value2".into() },
        Command::Delete { key: "key1".into(), value: "value1".into() },
        Command::Create { key: "key2".into(), value: "red".into() },
        Command::Create { key: "key2".into(), value: "blue".into() },
        Command::Create { key: "key3".into(), value: "gone".into() },
        Command::Delete { key: "key3".into(), value: "gone".into() },
    ];
    for cmd in &script {
        kernel
            .process(cmd)
            .map_err(|e| PersistenceError::InvalidFormat(format!("fixture command {:?}: {}", cmd, e)))?;
    }

    Ok(db_path)
}
