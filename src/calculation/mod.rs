//! Calculation logic for the settlement engine.
//!
//! This module contains the pure computation steps: gross pay per pay mode,
//! the company/driver expense split, revenue aggregation by company,
//! receivable/payable generation, and the net settlement fold. Each step is
//! deterministic and free of I/O; the lifecycle module orchestrates them.

mod expenses;
mod ledger;
mod net;
mod pay_mode;
mod revenue;

pub use expenses::{CategoryTotals, ExpenseSplit, classify_expenses};
pub use ledger::{LedgerEntries, PayableDraft, ReceivableDraft, generate_ledger};
pub use net::{NetSettlement, SettlementDirection, net_settlement};
pub use pay_mode::{GrossPayResult, TripMetrics, calculate_gross_pay};
pub use revenue::{CompanyRevenue, RevenueSummary, UNKNOWN_COMPANY_NAME, aggregate_revenue};

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to cents using round-half-up semantics.
///
/// Applied at the point of final aggregation only, so intermediate
/// components never compound rounding error.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
