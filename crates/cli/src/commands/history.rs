use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::Path;

use crate::engine::{format_ts, open_existing};

pub fn run(db: &Path, key: &str) -> anyhow::Result<()> {
    let kernel = open_existing(db)?;
    let events = kernel.history(key)?;

    if events.is_empty() {
        println!("\nNo events recorded for {:?}\n", key);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Timestamp", "Type"]);

    for event in &events {
        table.add_row(vec![
            event.id.to_string(),
            format_ts(event.created_at_ms),
            event.kind.to_string(),
        ]);
    }

    println!("\nEvent Timeline for {:?} ({} events)\n", key, events.len());
    println!("{table}\n");
    Ok(())
}
