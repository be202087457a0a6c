use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::Path;

use answer_kernel::KernelError;

use crate::engine::{format_ts, open_existing};

pub fn run(db: &Path, key: &str) -> anyhow::Result<()> {
    let kernel = open_existing(db)?;

    let answer = match kernel.current(key) {
        Ok(answer) => answer,
        Err(KernelError::NotFound) => {
            println!("\nNo active answer for {:?}\n", key);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Key", "Value", "Created", "Updated"]);
    table.add_row(vec![
        answer.id.to_string(),
        answer.key,
        answer.value,
        format_ts(answer.created_at_ms),
        format_ts(answer.updated_at_ms),
    ]);

    println!("\nCurrent Answer\n");
    println!("{table}\n");
    Ok(())
}
