use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::exporter::{read_or_empty, write_balance_sheet};
use crate::fmt::money;
use crate::ledger::{available_remittants, check_period};
use crate::models::{Category, Period};
use crate::session::Session;
use crate::settings::load_settings;

use super::print_balance;

pub fn run(
    file: &str,
    year: i32,
    month: u32,
    remittant: &str,
    category: &str,
    sheet: &str,
) -> Result<()> {
    let category: Category = category.parse()?;
    let statement = super::load(file, &load_settings())?;
    let period = Period::new(year, month);
    check_period(&statement.records, period)?;

    if !available_remittants(&statement.records, period)
        .iter()
        .any(|r| r == remittant)
    {
        println!(
            "{}",
            format!("No transactions for {remittant} in {period}.").yellow()
        );
    }

    let sheet_path = Path::new(sheet);
    let mut session = Session::with_balance(statement, read_or_empty(sheet_path)?);
    let assignment = session.assign(period, remittant, category.name())?;
    println!("Total Income: {}", money(assignment.totals.income));
    println!("Total Expenses: {}", money(assignment.totals.expense));
    println!(
        "{}",
        format!("\u{2192} {remittant} assigned to {category}").green()
    );

    write_balance_sheet(session.balance(), sheet_path)?;
    print_balance(session.balance())?;
    println!("Wrote {}", sheet_path.display());
    Ok(())
}
