pub mod apply;
pub mod assign;
pub mod categories;
pub mod init;
pub mod periods;
pub mod preview;
pub mod remittants;

use std::path::Path;

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use crate::balance::BalanceSheet;
use crate::error::Result;
use crate::fmt::money;
use crate::importer::{load_statement, Statement};
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "gaap",
    version,
    about = "Map bank-statement remittants to balance-sheet categories."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write settings and create the export directory.
    Init {
        /// Where exported balance sheets go (default: ~/Documents/gaap-assigner)
        #[arg(long = "export-dir")]
        export_dir: Option<String>,
        /// Statement dates are mm/dd/yyyy instead of dd/mm/yyyy
        #[arg(long = "month-first")]
        month_first: bool,
        /// Statement amounts use ',' as the decimal separator
        #[arg(long = "decimal-comma")]
        decimal_comma: bool,
    },
    /// Show the columns and first rows of a statement file.
    Preview {
        /// Statement CSV file
        file: String,
        /// Number of rows to show
        #[arg(long, default_value = "5")]
        rows: usize,
    },
    /// List the years and months present in a statement.
    Periods {
        /// Statement CSV file
        file: String,
    },
    /// List remittants of a period with their totals.
    Remittants {
        /// Statement CSV file
        file: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Only show remittants matching this regex (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },
    /// Interactively assign remittants to categories and export the result.
    Assign {
        /// Statement CSV file
        file: String,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        /// Previously exported balance sheet to continue from
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Assign one remittant to a category and update a balance-sheet file.
    Apply {
        /// Statement CSV file
        file: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Remittant name as listed by `gaap remittants`
        #[arg(long)]
        remittant: String,
        /// Category name as listed by `gaap categories`
        #[arg(long)]
        category: String,
        /// Balance-sheet CSV to update (created if missing)
        #[arg(long)]
        sheet: String,
    },
    /// List the balance-sheet categories.
    Categories,
}

/// Load a statement file, reporting skipped rows.
pub(crate) fn load(file: &str, settings: &Settings) -> Result<Statement> {
    let statement = load_statement(Path::new(file), settings)?;
    log::debug!("statement columns: {:?}", statement.headers);
    if statement.skipped > 0 {
        println!(
            "{}",
            format!(
                "{} rows skipped (unreadable amount or date)",
                statement.skipped
            )
            .yellow()
        );
    }
    Ok(statement)
}

pub(crate) fn signed_money(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        money(amount).red().to_string()
    } else {
        money(amount).green().to_string()
    }
}

pub(crate) fn print_balance(sheet: &BalanceSheet) -> Result<()> {
    if sheet.is_empty() {
        println!("Balance sheet is empty.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount"]);
    for (category, amount) in sheet.iter() {
        table.add_row(vec![Cell::new(category), Cell::new(signed_money(amount))]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(sheet.total()?)),
    ]);
    println!("Balance Sheet\n{table}");
    Ok(())
}
