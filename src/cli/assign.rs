use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, Table};
use dialoguer::{Confirm, Input, Select};

use crate::balance::BalanceSheet;
use crate::error::{GaapError, Result};
use crate::exporter::{default_export_path, read_or_empty, write_balance_sheet};
use crate::fmt::money;
use crate::ledger::{
    available_months, available_remittants, available_years, check_period_args, filter_period,
};
use crate::models::{Category, Period, Transaction};
use crate::session::Session;
use crate::settings::{load_settings, Settings};

use super::{print_balance, signed_money};

const ACTIONS: &[&str] = &[
    "Categorize a remittant",
    "Change period",
    "Show balance sheet",
    "Export balance sheet",
    "Quit",
];

pub fn run(
    file: &str,
    year: Option<i32>,
    month: Option<u32>,
    sheet: Option<String>,
) -> Result<()> {
    let settings = load_settings();
    let statement = super::load(file, &settings)?;
    let mut session = match &sheet {
        Some(path) => Session::with_balance(statement, read_or_empty(Path::new(path))?),
        None => Session::new(statement),
    };

    if session.records().is_empty() {
        println!("{}", "No transactions to categorize.".yellow());
        return Ok(());
    }

    let mut period = select_period(session.records(), year, month)?;
    let mut exported = true;

    loop {
        println!("{}", "\u{2500}".repeat(60));
        println!("  Period: {period}");
        let action = Select::new()
            .with_prompt("What next?")
            .items(ACTIONS)
            .default(0)
            .interact()?;

        match action {
            0 => {
                if categorize(&mut session, period)? {
                    exported = false;
                }
            }
            1 => period = select_period(session.records(), None, None)?,
            2 => print_balance(session.balance())?,
            3 => {
                export(session.balance(), &settings, sheet.as_deref())?;
                exported = true;
            }
            _ => break,
        }
    }

    if !exported && !session.balance().is_empty() {
        let save = Confirm::new()
            .with_prompt("Export the balance sheet before quitting?")
            .default(true)
            .interact()?;
        if save {
            export(session.balance(), &settings, sheet.as_deref())?;
        }
    }

    print_assignments(&session);
    Ok(())
}

fn print_assignments(session: &Session) {
    let assignments = session.assignments();
    if assignments.is_empty() {
        println!("No assignments this session.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Period", "Remittant", "Category", "Net", "Category Balance"]);
    for a in assignments {
        table.add_row(vec![
            Cell::new(a.period),
            Cell::new(&a.remittant),
            Cell::new(&a.category),
            Cell::new(money(a.net)),
            Cell::new(money(a.balance)),
        ]);
    }
    println!("Assignments ({})\n{table}", assignments.len());
}

/// Pick a year, then a month within it. Values given on the command line
/// are checked before anything is prompted for, and only missing ones are
/// asked.
fn select_period(records: &[Transaction], year: Option<i32>, month: Option<u32>) -> Result<Period> {
    check_period_args(records, year, month)?;
    let years = available_years(records);
    let year = match year {
        Some(y) => y,
        None => {
            let idx = Select::new()
                .with_prompt("Select Year")
                .items(&years)
                .default(0)
                .interact()?;
            years[idx]
        }
    };

    let months = available_months(records, year);
    let month = match month {
        Some(m) if months.contains(&m) => m,
        // Only reachable when the month came without a year.
        Some(m) => return Err(GaapError::UnknownPeriod { year, month: m }),
        None => {
            let labels: Vec<String> = months.iter().map(|m| format!("{m:02}")).collect();
            let idx = Select::new()
                .with_prompt("Select Month")
                .items(&labels)
                .default(0)
                .interact()?;
            months[idx]
        }
    };
    Ok(Period::new(year, month))
}

/// Returns whether the balance sheet changed.
fn categorize(session: &mut Session, period: Period) -> Result<bool> {
    let remittants = available_remittants(session.records(), period);
    println!("Unique remittants in {period}: {}", remittants.len());
    if remittants.is_empty() {
        println!("{}", "Nothing to categorize in this period.".yellow());
        return Ok(false);
    }

    let idx = Select::new()
        .with_prompt("Select a remittant to categorize")
        .items(&remittants)
        .default(0)
        .interact()?;
    let remittant = &remittants[idx];

    print_transactions(session.records(), period, remittant);
    let totals = session.totals(period, remittant)?;
    println!("  Total Income:   {}", money(totals.income));
    println!("  Total Expenses: {}", money(totals.expense));

    let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    let choice = Select::new()
        .with_prompt("Select the category for the selected remittant (Esc to skip)")
        .items(&names)
        .default(0)
        .interact_opt()?;
    let Some(choice) = choice else {
        println!("{}", "Skipped.".yellow());
        return Ok(false);
    };

    let category = names[choice];
    session.assign(period, remittant, category)?;
    println!("{}", format!("\u{2192} {remittant} assigned to {category}").green());
    print_balance(session.balance())?;
    Ok(true)
}

fn print_transactions(records: &[Transaction], period: Period, remittant: &str) {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Kind", "Bank", "Type", "Amount"]);
    for txn in filter_period(records, period)
        .into_iter()
        .filter(|t| t.remittant() == Some(remittant))
    {
        table.add_row(vec![
            Cell::new(txn.date.format("%d/%m/%Y")),
            Cell::new(txn.kind().unwrap_or("")),
            Cell::new(txn.bank().unwrap_or("")),
            Cell::new(txn.txn_type()),
            Cell::new(signed_money(txn.amount)),
        ]);
    }
    println!("{table}");
}

fn export(sheet: &BalanceSheet, settings: &Settings, seed: Option<&str>) -> Result<()> {
    let default = seed
        .map(PathBuf::from)
        .unwrap_or_else(|| default_export_path(settings));
    let path: String = Input::new()
        .with_prompt("Export to")
        .default(default.to_string_lossy().to_string())
        .interact_text()?;
    let path = PathBuf::from(path);
    write_balance_sheet(sheet, &path)?;
    println!(
        "{}",
        format!("Balance sheet written to {}", path.display()).green()
    );
    Ok(())
}
