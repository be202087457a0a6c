use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::Path;

use answer_persistence::StoreStats;

use crate::engine::open_existing;

/// Summary of both tables plus keys that hold more than one active row.
pub fn run(db: &Path) -> anyhow::Result<StoreStats> {
    let kernel = open_existing(db)?;
    let store = kernel.store();
    let stats = store.stats()?;
    let crowded = store.keys_with_multiple_active()?;

    println!("\nAnswer Store Report: {:?}", db);
    println!("--------------------");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Table", "Rows", "Details"]);
    table.add_row(vec![
        "answers".to_string(),
        stats.answers.to_string(),
        format!("{} active, {} keys", stats.active_answers, stats.keys),
    ]);
    table.add_row(vec!["events".to_string(), stats.events.to_string(), String::new()]);
    println!("{table}\n");

    if crowded.is_empty() {
        println!("Every key has at most one active answer.\n");
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Key", "Active rows"]);
        for (key, count) in crowded {
            table.add_row(vec![key, count.to_string()]);
        }
        println!("Keys with more than one active answer (latest wins on read):\n");
        println!("{table}\n");
    }

    Ok(stats)
}
