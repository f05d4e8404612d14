//! Domain models for the settlement engine.

mod expense;
mod load;
mod pay_config;
mod settlement;
mod trip;

pub use expense::{Expense, ExpenseCategory, PaidBy, PayerClass};
pub use load::Load;
pub use pay_config::{DriverPayConfig, PayMode, PayModeTag};
pub use settlement::{
    EntryStatus, Payable, PayBreakdown, PayComponent, PaymentDetails, Receivable, Settlement,
    SettlementStatus, SettlementWarning,
};
pub use trip::{Trip, TripStatus, TripTotals};
