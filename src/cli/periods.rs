use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::ledger::{available_months, available_years};
use crate::settings::load_settings;

pub fn run(file: &str) -> Result<()> {
    let statement = super::load(file, &load_settings())?;
    let records = &statement.records;

    if records.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Year", "Months", "Transactions"]);
    for year in available_years(records) {
        let months: Vec<String> = available_months(records, year)
            .iter()
            .map(|m| format!("{m:02}"))
            .collect();
        let count = records.iter().filter(|t| t.year() == year).count();
        table.add_row(vec![
            Cell::new(year),
            Cell::new(months.join(", ")),
            Cell::new(count),
        ]);
    }
    println!("Periods\n{table}");
    Ok(())
}
