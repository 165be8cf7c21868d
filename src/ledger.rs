use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::error::{GaapError, Result};
use crate::models::{Period, Transaction, TxnType};

// ---------------------------------------------------------------------------
// Period selection
// ---------------------------------------------------------------------------

pub fn available_years(records: &[Transaction]) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().map(|t| t.year()).collect();
    years.into_iter().collect()
}

/// Months present within `year`, ascending.
pub fn available_months(records: &[Transaction], year: i32) -> Vec<u32> {
    let months: BTreeSet<u32> = records
        .iter()
        .filter(|t| t.year() == year)
        .map(|t| t.month())
        .collect();
    months.into_iter().collect()
}

pub fn filter_period(records: &[Transaction], period: Period) -> Vec<&Transaction> {
    records.iter().filter(|t| period.contains(t)).collect()
}

/// Fails with `UnknownPeriod` when no record falls in `period`.
pub fn check_period(records: &[Transaction], period: Period) -> Result<()> {
    if records.iter().any(|t| period.contains(t)) {
        Ok(())
    } else {
        Err(GaapError::UnknownPeriod {
            year: period.year,
            month: period.month,
        })
    }
}

/// Fails with `UnknownYear` when no record falls in `year`.
pub fn check_year(records: &[Transaction], year: i32) -> Result<()> {
    if records.iter().any(|t| t.year() == year) {
        Ok(())
    } else {
        Err(GaapError::UnknownYear(year))
    }
}

/// Validate a year and/or month given up front, before anything is prompted
/// for. A month without a year must exist in at least one year.
pub fn check_period_args(
    records: &[Transaction],
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    match (year, month) {
        (Some(year), Some(month)) => {
            check_year(records, year)?;
            check_period(records, Period::new(year, month))
        }
        (Some(year), None) => check_year(records, year),
        (None, Some(month)) if records.iter().any(|t| t.month() == month) => Ok(()),
        (None, Some(month)) => Err(GaapError::UnknownMonth(month)),
        (None, None) => Ok(()),
    }
}

/// Distinct remittants of the period, in order of first appearance.
/// Records whose description did not split are not offered.
pub fn available_remittants(records: &[Transaction], period: Period) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for name in filter_period(records, period).into_iter().filter_map(|t| t.remittant()) {
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }
    names
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn net(&self) -> Result<Decimal> {
        self.income
            .checked_sub(self.expense)
            .ok_or_else(|| GaapError::Overflow("net".to_string()))
    }
}

/// Sum income and expense amounts for one remittant. `expense` keeps the
/// sign of the underlying amounts.
pub fn totals<'a, I>(records: I, remittant: &str) -> Result<Totals>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Totals::default();
    for txn in records {
        if txn.remittant() != Some(remittant) {
            continue;
        }
        let sum = match txn.txn_type() {
            TxnType::Income => &mut totals.income,
            TxnType::Expense => &mut totals.expense,
        };
        *sum = sum
            .checked_add(txn.amount)
            .ok_or_else(|| GaapError::Overflow(remittant.to_string()))?;
    }
    Ok(totals)
}

pub struct RemittantSummary {
    pub name: String,
    pub totals: Totals,
    pub count: usize,
}

/// Per-remittant totals for a period, in first-appearance order.
pub fn remittant_summaries(
    records: &[Transaction],
    period: Period,
) -> Result<Vec<RemittantSummary>> {
    let filtered = filter_period(records, period);
    available_remittants(records, period)
        .into_iter()
        .map(|name| {
            let count = filtered
                .iter()
                .filter(|t| t.remittant() == Some(name.as_str()))
                .count();
            let totals = totals(filtered.iter().copied(), &name)?;
            Ok(RemittantSummary {
                name,
                totals,
                count,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description;
    use chrono::NaiveDate;

    fn txn(date: &str, amount: i64, description: &str) -> Transaction {
        Transaction {
            amount: Decimal::from(amount),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            parts: description::parse(description),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("2024-01-05", 1000, "PIX - ACME - 1 - Itau"),
            txn("2024-01-07", -300, "PIX - Padaria - 2 - Nubank"),
            txn("2024-01-09", -50, "PIX - ACME - 3 - Itau"),
            txn("2024-01-10", -20, "Compra no débito"),
            txn("2024-03-01", 200, "PIX - ACME - 4 - Itau"),
            txn("2023-12-31", 70, "TED - Padaria - 5 - Nubank"),
        ]
    }

    #[test]
    fn test_available_years_sorted_distinct() {
        assert_eq!(available_years(&sample()), vec![2023, 2024]);
        assert!(available_years(&[]).is_empty());
    }

    #[test]
    fn test_available_months_restricted_to_year() {
        let records = sample();
        assert_eq!(available_months(&records, 2024), vec![1, 3]);
        assert_eq!(available_months(&records, 2023), vec![12]);
        assert!(available_months(&records, 2020).is_empty());
    }

    #[test]
    fn test_available_remittants_first_appearance() {
        let records = sample();
        let names = available_remittants(&records, Period::new(2024, 1));
        assert_eq!(names, vec!["ACME", "Padaria"]);
    }

    #[test]
    fn test_check_period() {
        let records = sample();
        assert!(check_period(&records, Period::new(2024, 3)).is_ok());
        assert!(matches!(
            check_period(&records, Period::new(2024, 2)),
            Err(GaapError::UnknownPeriod { year: 2024, month: 2 })
        ));
    }

    #[test]
    fn test_check_year() {
        let records = sample();
        assert!(check_year(&records, 2023).is_ok());
        assert!(matches!(
            check_year(&records, 2019),
            Err(GaapError::UnknownYear(2019))
        ));
    }

    #[test]
    fn test_check_period_args() {
        let records = sample();
        assert!(check_period_args(&records, None, None).is_ok());
        assert!(check_period_args(&records, Some(2024), None).is_ok());
        assert!(check_period_args(&records, Some(2024), Some(3)).is_ok());
        assert!(check_period_args(&records, None, Some(12)).is_ok());
        assert!(matches!(
            check_period_args(&records, Some(2019), None),
            Err(GaapError::UnknownYear(2019))
        ));
        assert!(matches!(
            check_period_args(&records, Some(2019), Some(1)),
            Err(GaapError::UnknownYear(2019))
        ));
        assert!(matches!(
            check_period_args(&records, Some(2024), Some(7)),
            Err(GaapError::UnknownPeriod { year: 2024, month: 7 })
        ));
        assert!(matches!(
            check_period_args(&records, None, Some(7)),
            Err(GaapError::UnknownMonth(7))
        ));
    }

    #[test]
    fn test_totals_split_by_type() {
        let records = sample();
        let jan = filter_period(&records, Period::new(2024, 1));
        let t = totals(jan, "ACME").unwrap();
        assert_eq!(t.income, Decimal::from(1000));
        assert_eq!(t.expense, Decimal::from(-50));
        assert_eq!(t.net().unwrap(), Decimal::from(1050));
    }

    #[test]
    fn test_totals_no_match_is_zero() {
        let records = sample();
        assert_eq!(totals(&records, "Nobody").unwrap(), Totals::default());
        assert_eq!(
            totals(&Vec::<Transaction>::new(), "ACME").unwrap(),
            Totals::default()
        );
    }

    #[test]
    fn test_totals_order_independent() {
        let mut records = sample();
        let forward = totals(&records, "ACME").unwrap();
        records.reverse();
        assert_eq!(totals(&records, "ACME").unwrap(), forward);
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let mut big = txn("2024-01-05", 0, "PIX - A - 1 - Itau");
        big.amount = Decimal::MAX;
        let records = vec![big, txn("2024-01-06", 1, "PIX - A - 2 - Itau")];
        assert!(matches!(
            totals(&records, "A"),
            Err(GaapError::Overflow(name)) if name == "A"
        ));
    }

    #[test]
    fn test_net_overflow_is_an_error() {
        let t = Totals {
            income: Decimal::MAX,
            expense: Decimal::from(-1),
        };
        assert!(matches!(t.net(), Err(GaapError::Overflow(_))));
    }

    #[test]
    fn test_remittant_summaries() {
        let records = sample();
        let rows = remittant_summaries(&records, Period::new(2024, 1)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "ACME");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].totals.expense, Decimal::from(-300));
        assert_eq!(rows[1].totals.income, Decimal::ZERO);
    }
}
