//! Settlement record models.
//!
//! This module contains the [`Settlement`] record produced by closing a trip,
//! the [`Receivable`] and [`Payable`] ledger entries it owns, the displayable
//! pay breakdown, and the status machine data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a settlement.
///
/// The flow is linear: `pending -> review -> approved -> paid`. `review` and
/// `approved` are optional intermediates; whether `pending -> paid` is
/// allowed directly is a configuration decision. `paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Created, amounts computed, nothing reviewed yet.
    Pending,
    /// Under review.
    Review,
    /// Approved for payment.
    Approved,
    /// Paid out; the settlement is immutable from here.
    Paid,
}

impl SettlementStatus {
    /// Returns the wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::Review => "review",
            SettlementStatus::Approved => "approved",
            SettlementStatus::Paid => "paid",
        }
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// Forward moves (including multi-step skips) are allowed; backward
    /// moves and any move out of `Paid` are not. The direct jump to `Paid`
    /// is additionally gated by configuration in the lifecycle engine.
    pub fn can_advance_to(self, next: SettlementStatus) -> bool {
        self != SettlementStatus::Paid && next > self
    }
}

/// Payment details stamped when a settlement is marked paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// How the payment was made (e.g. "ach", "check", "zelle").
    pub method: String,
    /// External payment reference, if any.
    #[serde(default)]
    pub reference: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// When the settlement was marked paid.
    pub paid_at: DateTime<Utc>,
}

/// Status of an individual receivable or payable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Not yet collected/paid out.
    Open,
    /// Collected/paid out.
    Paid,
}

/// Amount a company owes the carrier for its loads on one trip, net of
/// what the driver already collected on delivery.
///
/// The amount may be negative only when collections exceeded invoiced
/// revenue; overcollection is surfaced as a warning, never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receivable {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The settlement this entry belongs to.
    pub settlement_id: Uuid,
    /// The company that owes, `None` for loads without a company.
    pub company_id: Option<String>,
    /// Display name of the company.
    pub company_name: String,
    /// Amount owed: company load revenue minus company COD collected.
    pub amount: Decimal,
    /// Collection status.
    pub status: EntryStatus,
}

/// Amount owed to the driver for one trip: gross pay plus reimbursable
/// driver-paid expenses minus everything the driver collected on delivery.
///
/// A negative amount means the driver owes the company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payable {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The settlement this entry belongs to.
    pub settlement_id: Uuid,
    /// The driver owed (or owing).
    pub driver_id: String,
    /// The signed amount.
    pub amount: Decimal,
    /// Payout status.
    pub status: EntryStatus,
}

/// One component of the driver's gross pay, for display and audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayComponent {
    /// Human-readable label (e.g. "miles", "cubic feet", "trip days").
    pub label: String,
    /// The quantity the rate applies to.
    pub quantity: Decimal,
    /// The rate applied.
    pub rate: Decimal,
    /// quantity x rate, rounded to cents for display.
    pub amount: Decimal,
}

/// The full gross-pay breakdown for the active pay mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// The wire name of the mode that produced this breakdown.
    pub pay_mode: String,
    /// The components that sum to the gross pay.
    pub components: Vec<PayComponent>,
}

/// A non-fatal anomaly detected during settlement computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementWarning {
    /// A code identifying the warning type (e.g. "overcollected").
    pub code: String,
    /// A human-readable description.
    pub message: String,
}

/// The settlement record for one trip.
///
/// Owns zero-or-more receivables (one per distinct company on the trip) and
/// one payable for the driver. Immutable once `paid`; before that, amounts
/// may be recomputed in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique identifier for this settlement.
    pub id: Uuid,
    /// The trip this settlement closes.
    pub trip_id: String,
    /// The driver being compensated.
    pub driver_id: String,
    /// Current lifecycle status.
    pub status: SettlementStatus,
    /// Total revenue across all loads.
    pub total_revenue: Decimal,
    /// The driver's gross pay for the trip.
    pub total_driver_pay: Decimal,
    /// Driver-paid expenses owed back to the driver.
    pub total_reimbursements: Decimal,
    /// Revenue minus driver pay minus all trip expenses.
    pub total_profit: Decimal,
    /// The displayable gross-pay breakdown.
    pub breakdown: PayBreakdown,
    /// Anomalies surfaced during computation.
    #[serde(default)]
    pub warnings: Vec<SettlementWarning>,
    /// Payment details, present once paid.
    #[serde(default)]
    pub payment: Option<PaymentDetails>,
    /// When the settlement was created.
    pub created_at: DateTime<Utc>,
    /// When amounts or status last changed.
    pub updated_at: DateTime<Utc>,
}
