use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::Path;

use answer_kernel::AnswerRecord;

use crate::engine::{format_ts, open_existing};

pub fn run(db: &Path, key: &str) -> anyhow::Result<Vec<AnswerRecord>> {
    let kernel = open_existing(db)?;
    let rows = kernel.versions(key)?;

    if rows.is_empty() {
        println!("\nNo rows stored for {:?}\n", key);
        return Ok(rows);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Value", "Active", "Created", "Updated"]);

    for row in &rows {
        table.add_row(vec![
            row.id.to_string(),
            row.value.clone(),
            if row.active { "yes" } else { "no" }.to_string(),
            format_ts(row.created_at_ms),
            format_ts(row.updated_at_ms),
        ]);
    }

    println!("\nStored rows for {:?} ({} rows)\n", key, rows.len());
    println!("{table}\n");
    Ok(rows)
}
