use comfy_table::{Cell, Table};
use regex::RegexBuilder;

use crate::error::Result;
use crate::fmt::money;
use crate::ledger::{check_period, remittant_summaries};
use crate::models::Period;
use crate::settings::load_settings;

use super::signed_money;

pub fn run(file: &str, year: i32, month: u32, filter: Option<&str>) -> Result<()> {
    let statement = super::load(file, &load_settings())?;
    let period = Period::new(year, month);
    check_period(&statement.records, period)?;

    let pattern = filter
        .map(|f| RegexBuilder::new(f).case_insensitive(true).build())
        .transpose()?;

    let rows: Vec<_> = remittant_summaries(&statement.records, period)?
        .into_iter()
        .filter(|r| pattern.as_ref().map_or(true, |re| re.is_match(&r.name)))
        .collect();

    println!("Unique remittants in {period}: {}", rows.len());
    if rows.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Remittant", "Income", "Expense", "Net", "Count"]);
    for r in &rows {
        table.add_row(vec![
            Cell::new(&r.name),
            Cell::new(money(r.totals.income)),
            Cell::new(money(r.totals.expense)),
            Cell::new(signed_money(r.totals.net()?)),
            Cell::new(r.count),
        ]);
    }
    println!("{table}");
    Ok(())
}
