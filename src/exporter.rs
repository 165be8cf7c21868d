use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::balance::BalanceSheet;
use crate::error::{GaapError, Result};
use crate::settings::Settings;

const HEADER: [&str; 2] = ["Category", "Amount"];

pub fn default_export_path(settings: &Settings) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    PathBuf::from(&settings.export_dir).join(format!("balance-sheet-{date}.csv"))
}

/// Write the sheet as a two-column `Category,Amount` table.
pub fn write_balance_sheet(sheet: &BalanceSheet, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;
    for (category, amount) in sheet.iter() {
        wtr.write_record([category, amount.to_string().as_str()])?;
    }
    wtr.flush()?;
    log::info!("wrote {} categories to {}", sheet.len(), path.display());
    Ok(())
}

/// Read a table written by [`write_balance_sheet`]. Repeated categories
/// accumulate.
pub fn read_balance_sheet(path: &Path) -> Result<BalanceSheet> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();
    let category_idx = headers.iter().position(|h| h.trim() == HEADER[0]);
    let amount_idx = headers.iter().position(|h| h.trim() == HEADER[1]);
    let (Some(category_idx), Some(amount_idx)) = (category_idx, amount_idx) else {
        let missing = if category_idx.is_none() { HEADER[0] } else { HEADER[1] };
        return Err(GaapError::MissingColumn(missing.to_string()));
    };

    let mut sheet = BalanceSheet::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let category = record.get(category_idx).unwrap_or("").trim();
        let raw = record.get(amount_idx).unwrap_or("").trim();
        let amount = Decimal::from_str(raw).map_err(|_| GaapError::InvalidAmount {
            line,
            value: raw.to_string(),
        })?;
        sheet.update(category, amount, Decimal::ZERO)?;
    }
    Ok(sheet)
}

/// Like [`read_balance_sheet`], but a missing file is an empty sheet.
pub fn read_or_empty(path: &Path) -> Result<BalanceSheet> {
    if path.exists() {
        read_balance_sheet(path)
    } else {
        Ok(BalanceSheet::new())
    }
}
