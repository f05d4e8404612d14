//! Receivable and payable generation.
//!
//! Derives the ledger-style entries for one settlement: one receivable per
//! company bucket that saw revenue or collections, and exactly one payable
//! for the driver. Amounts are rounded to cents here, at the point of final
//! aggregation.

use rust_decimal::Decimal;

use super::round_cents;
use super::{ExpenseSplit, GrossPayResult, RevenueSummary};
use crate::models::SettlementWarning;

/// A receivable before it is attached to a persisted settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivableDraft {
    /// The company that owes, `None` for the unknown bucket.
    pub company_id: Option<String>,
    /// Display name of the company.
    pub company_name: String,
    /// Amount owed, rounded to cents; negative only on overcollection.
    pub amount: Decimal,
}

/// The driver's payable before it is attached to a persisted settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct PayableDraft {
    /// The driver owed (or owing).
    pub driver_id: String,
    /// gross pay + driver-paid expenses - total collected, rounded to cents.
    pub amount: Decimal,
}

/// The generated ledger entries plus any anomaly warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntries {
    /// One entry per company bucket with revenue or collections.
    pub receivables: Vec<ReceivableDraft>,
    /// Exactly one entry for the trip's driver.
    pub payable: PayableDraft,
    /// Overcollection warnings, one per affected company.
    pub warnings: Vec<SettlementWarning>,
}

/// Generates receivable and payable entries for one trip settlement.
///
/// A company bucket yields a receivable when it has non-zero revenue or
/// non-zero collections; a fully-collected bucket still yields a zero-amount
/// entry so that `sum(receivables) + total_collected == total_revenue` holds
/// for every partition of loads across companies.
///
/// The payable is `gross_pay + driver_paid_expenses - total_collected`,
/// where the subtraction reflects COD cash already in the driver's hands.
pub fn generate_ledger(
    revenue: &RevenueSummary,
    expenses: &ExpenseSplit,
    gross: &GrossPayResult,
    driver_id: &str,
) -> LedgerEntries {
    let mut receivables = Vec::new();
    let mut warnings = Vec::new();

    for company in &revenue.companies {
        if company.total_revenue.is_zero() && company.total_collected.is_zero() {
            continue;
        }
        let amount = round_cents(company.total_receivable);
        if amount < Decimal::ZERO {
            warnings.push(SettlementWarning {
                code: "overcollected".to_string(),
                message: format!(
                    "{} collected {} over invoiced revenue",
                    company.company_name, -amount
                ),
            });
        }
        receivables.push(ReceivableDraft {
            company_id: company.company_id.clone(),
            company_name: company.company_name.clone(),
            amount,
        });
    }

    let payable_amount = gross.gross_pay + expenses.driver_paid - revenue.total_collected;

    LedgerEntries {
        receivables,
        payable: PayableDraft {
            driver_id: driver_id.to_string(),
            amount: round_cents(payable_amount),
        },
        warnings,
    }
}
