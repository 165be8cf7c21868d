use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::description::DescriptionParts;
use crate::error::GaapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn of(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.write_str("Income"),
            Self::Expense => f.write_str("Expense"),
        }
    }
}

/// One statement row after the description has been split.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub parts: Option<DescriptionParts>,
}

impl Transaction {
    pub fn txn_type(&self) -> TxnType {
        TxnType::of(self.amount)
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn kind(&self) -> Option<&str> {
        self.parts.as_ref().map(|p| p.kind.as_str())
    }

    pub fn remittant(&self) -> Option<&str> {
        self.parts.as_ref().map(|p| p.remittant.as_str())
    }

    pub fn bank(&self) -> Option<&str> {
        self.parts.as_ref().map(|p| p.bank.as_str())
    }
}

/// A year/month selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn contains(&self, txn: &Transaction) -> bool {
        txn.year() == self.year && txn.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Balance-sheet categories offered for assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    CashAndBanks,
    AccountsReceivable,
    ConsumableInventory,
    Buildings,
    VehiclesAndMachinery,
    FinancialInvestments,
    CurrentBankCredit,
    InterestPayable,
    AccountsPayable,
    SalariesPayable,
    TaxesPayable,
    CustomerAdvances,
    NonCurrentBankCredit,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::CashAndBanks,
        Category::AccountsReceivable,
        Category::ConsumableInventory,
        Category::Buildings,
        Category::VehiclesAndMachinery,
        Category::FinancialInvestments,
        Category::CurrentBankCredit,
        Category::InterestPayable,
        Category::AccountsPayable,
        Category::SalariesPayable,
        Category::TaxesPayable,
        Category::CustomerAdvances,
        Category::NonCurrentBankCredit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CashAndBanks => "Cash and Banks",
            Self::AccountsReceivable => "Accounts Receivable",
            Self::ConsumableInventory => "Inventory of Consumable Material",
            Self::Buildings => "Buildings (net accumulated depreciation)",
            Self::VehiclesAndMachinery => "Vehicles and Machinery (net accumulated depreciation)",
            Self::FinancialInvestments => "Financial Investments",
            Self::CurrentBankCredit => "Current Bank Credit",
            Self::InterestPayable => "Interest Payable",
            Self::AccountsPayable => "Accounts Payable",
            Self::SalariesPayable => "Salaries Payable",
            Self::TaxesPayable => "Taxes Payable",
            Self::CustomerAdvances => "Customer Advances",
            Self::NonCurrentBankCredit => "Non-current Bank Credit",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = GaapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| GaapError::UnknownCategory(wanted.to_string()))
    }
}
