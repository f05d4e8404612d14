//! Expense classification.
//!
//! Partitions a trip's expenses into company-paid and driver-paid buckets
//! and totals them by category. The two views are independent and always
//! sum to the same grand total.

use rust_decimal::Decimal;

use crate::models::{Expense, ExpenseCategory, PayerClass};

/// Category totals for a trip's expenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotals {
    /// Fuel purchases.
    pub fuel: Decimal,
    /// Tolls.
    pub tolls: Decimal,
    /// Everything else, driver pay lines included.
    pub other: Decimal,
}

/// The result of classifying a trip's expenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseSplit {
    /// Total the company already paid (company card, fuel card).
    pub company_paid: Decimal,
    /// Total the driver fronted and is owed back.
    pub driver_paid: Decimal,
    /// Totals by category, independent of the payer split.
    pub by_category: CategoryTotals,
}

impl ExpenseSplit {
    /// Grand total across all expenses.
    pub fn grand_total(&self) -> Decimal {
        self.company_paid + self.driver_paid
    }
}

/// Classifies a trip's expenses into payer buckets and category totals.
///
/// The payer split follows the closed [`PayerClass`] mapping: only
/// company-funded instruments count as company-paid; every other tag,
/// including unset, is driver-paid.
pub fn classify_expenses(expenses: &[Expense]) -> ExpenseSplit {
    let mut company_paid = Decimal::ZERO;
    let mut driver_paid = Decimal::ZERO;
    let mut fuel = Decimal::ZERO;
    let mut tolls = Decimal::ZERO;
    let mut other = Decimal::ZERO;

    for expense in expenses {
        match expense.payer_class() {
            PayerClass::CompanyFunded => company_paid += expense.amount,
            PayerClass::DriverFunded => driver_paid += expense.amount,
        }
        match expense.category {
            ExpenseCategory::Fuel => fuel += expense.amount,
            ExpenseCategory::Tolls => tolls += expense.amount,
            _ => other += expense.amount,
        }
    }

    ExpenseSplit {
        company_paid,
        driver_paid,
        by_category: CategoryTotals { fuel, tolls, other },
    }
}
