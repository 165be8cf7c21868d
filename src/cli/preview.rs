use std::path::Path;

use comfy_table::Table;

use crate::error::Result;
use crate::importer;

pub fn run(file: &str, rows: usize) -> Result<()> {
    let preview = importer::preview(Path::new(file), rows)?;

    println!("Columns: {}", preview.headers.join(", "));
    let mut table = Table::new();
    table.set_header(preview.headers.clone());
    for row in &preview.rows {
        table.add_row(row.clone());
    }
    println!("{table}");
    Ok(())
}
