use rust_decimal::Decimal;

use crate::balance::BalanceSheet;
use crate::error::Result;
use crate::importer::Statement;
use crate::ledger::{self, Totals};
use crate::models::{Period, Transaction};

/// One confirmed remittant-to-category mapping.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub period: Period,
    pub remittant: String,
    pub category: String,
    pub totals: Totals,
    pub net: Decimal,
    /// Category balance after the update.
    pub balance: Decimal,
}

/// State of one interactive run: the loaded statement and the balance sheet
/// being built from it.
pub struct Session {
    statement: Statement,
    balance: BalanceSheet,
    assignments: Vec<Assignment>,
}

impl Session {
    pub fn new(statement: Statement) -> Self {
        Self::with_balance(statement, BalanceSheet::new())
    }

    pub fn with_balance(statement: Statement, balance: BalanceSheet) -> Self {
        Self {
            statement,
            balance,
            assignments: Vec::new(),
        }
    }

    pub fn records(&self) -> &[Transaction] {
        &self.statement.records
    }

    pub fn balance(&self) -> &BalanceSheet {
        &self.balance
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Totals of `remittant` within `period`, without touching the sheet.
    pub fn totals(&self, period: Period, remittant: &str) -> Result<Totals> {
        ledger::totals(ledger::filter_period(self.records(), period), remittant)
    }

    /// Add the remittant's net for `period` to `category`. Repeated calls
    /// accumulate, whatever category was used before.
    pub fn assign(&mut self, period: Period, remittant: &str, category: &str) -> Result<Assignment> {
        ledger::check_period(self.records(), period)?;
        let totals = self.totals(period, remittant)?;
        let net = totals.net()?;
        let balance = self.balance.update(category, totals.income, totals.expense)?;
        log::info!(
            "{period}: {remittant} -> {category} (income {}, expense {}, balance {balance})",
            totals.income,
            totals.expense
        );
        let assignment = Assignment {
            period,
            remittant: remittant.to_string(),
            category: category.to_string(),
            totals,
            net,
            balance,
        };
        self.assignments.push(assignment.clone());
        Ok(assignment)
    }
}
