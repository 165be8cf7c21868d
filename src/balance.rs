use rust_decimal::Decimal;

use crate::error::{GaapError, Result};

/// Running net amount per category, in first-insertion order.
///
/// Keys are not checked against [`crate::models::Category`]; any name is
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSheet {
    entries: Vec<(String, Decimal)>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `income - expense` to `category`, creating the entry at zero.
    /// On overflow the sheet is left as it was.
    pub fn update(
        &mut self,
        category: &str,
        income: Decimal,
        expense: Decimal,
    ) -> Result<Decimal> {
        let overflow = || GaapError::Overflow(category.to_string());
        let net = income.checked_sub(expense).ok_or_else(overflow)?;
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => {
                *total = total.checked_add(net).ok_or_else(overflow)?;
                Ok(*total)
            }
            None => {
                self.entries.push((category.to_string(), net));
                Ok(net)
            }
        }
    }

    #[allow(dead_code)]
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Result<Decimal> {
        self.entries
            .iter()
            .try_fold(Decimal::ZERO, |sum, (_, total)| sum.checked_add(*total))
            .ok_or_else(|| GaapError::Overflow("the balance sheet total".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_creates_entry() {
        let mut sheet = BalanceSheet::new();
        let value = sheet
            .update("Cash and Banks", Decimal::from(100), Decimal::from(40))
            .unwrap();
        assert_eq!(value, Decimal::from(60));
        assert_eq!(sheet.get("Cash and Banks"), Some(Decimal::from(60)));
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_update_accumulates() {
        let mut sheet = BalanceSheet::new();
        sheet.update("Cash and Banks", Decimal::from(100), Decimal::from(40)).unwrap();
        sheet.update("Cash and Banks", Decimal::from(10), Decimal::ZERO).unwrap();
        assert_eq!(sheet.get("Cash and Banks"), Some(Decimal::from(70)));
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_update_subtracts_signed_expense() {
        // Expense sums are negative, so subtracting them adds their magnitude.
        let mut sheet = BalanceSheet::new();
        sheet.update("Accounts Payable", Decimal::ZERO, Decimal::from(-25)).unwrap();
        assert_eq!(sheet.get("Accounts Payable"), Some(Decimal::from(25)));
    }

    #[test]
    fn test_update_accepts_any_key() {
        let mut sheet = BalanceSheet::new();
        sheet.update("Not a category", Decimal::from(1), Decimal::ZERO).unwrap();
        assert_eq!(sheet.get("Not a category"), Some(Decimal::from(1)));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut sheet = BalanceSheet::new();
        sheet.update("Taxes Payable", Decimal::from(3), Decimal::ZERO).unwrap();
        sheet.update("Cash and Banks", Decimal::from(1), Decimal::ZERO).unwrap();
        sheet.update("Taxes Payable", Decimal::from(2), Decimal::ZERO).unwrap();
        let names: Vec<&str> = sheet.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Taxes Payable", "Cash and Banks"]);
        assert_eq!(sheet.total().unwrap(), Decimal::from(6));
    }

    #[test]
    fn test_update_overflow_leaves_sheet_unchanged() {
        let mut sheet = BalanceSheet::new();
        sheet.update("Cash and Banks", Decimal::MAX, Decimal::ZERO).unwrap();
        let err = sheet.update("Cash and Banks", Decimal::ONE, Decimal::ZERO);
        assert!(matches!(err, Err(GaapError::Overflow(_))));
        assert_eq!(sheet.get("Cash and Banks"), Some(Decimal::MAX));

        let err = sheet.update("Inventory", Decimal::MAX, Decimal::from(-1));
        assert!(matches!(err, Err(GaapError::Overflow(_))));
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let mut sheet = BalanceSheet::new();
        sheet.update("Cash and Banks", Decimal::MAX, Decimal::ZERO).unwrap();
        sheet.update("Taxes Payable", Decimal::ONE, Decimal::ZERO).unwrap();
        assert!(matches!(sheet.total(), Err(GaapError::Overflow(_))));
    }
}
