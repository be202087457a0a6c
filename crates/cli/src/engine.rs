use anyhow::{bail, Context, Result};
use std::path::Path;

use answer_kernel::AnswerKernel;
use answer_persistence::SqliteStore;

/// Open an existing database for inspection. Never creates one.
pub fn open_existing(db: &Path) -> Result<AnswerKernel<SqliteStore>> {
    if !db.exists() {
        bail!("No database at {:?}", db);
    }
    open_or_create(db)
}

pub fn open_or_create(db: &Path) -> Result<AnswerKernel<SqliteStore>> {
    let store = SqliteStore::open(db).with_context(|| format!("Failed to open database {:?}", db))?;
    Ok(AnswerKernel::new(store))
}

/// Render a millisecond timestamp as RFC 3339.
pub fn format_ts(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .unwrap_or_default()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
