//! Request types for the settlement engine API.
//!
//! This module defines the JSON request structures for the settlement
//! endpoints. The settle and recalculate requests carry the full trip
//! snapshot; load and expense entries omit `trip_id`, which is taken from
//! the enclosing trip.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::{PaymentInput, TripFinancials};
use crate::models::{
    DriverPayConfig, Expense, ExpenseCategory, Load, PaidBy, PayModeTag, SettlementStatus, Trip,
    TripStatus, TripTotals,
};

/// Request body for the settle and recalculate endpoints.
///
/// Contains the caller's account plus everything settlement is computed
/// from: the trip, its loads and expenses, and the driver's pay
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleRequest {
    /// The account performing the operation; must own the trip.
    pub owner_id: String,
    /// The trip being settled.
    pub trip: TripRequest,
    /// The loads attached to the trip.
    #[serde(default)]
    pub loads: Vec<LoadRequest>,
    /// The expenses attached to the trip.
    #[serde(default)]
    pub expenses: Vec<ExpenseRequest>,
    /// The driver's pay configuration.
    pub pay: PayConfigRequest,
}

/// Trip information in a settle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Unique identifier for the trip.
    pub id: String,
    /// The account that owns the trip.
    pub owner_id: String,
    /// The driver assigned to the trip.
    pub driver_id: String,
    /// The truck used for the trip.
    pub truck_id: String,
    /// The trailer, if one was attached.
    #[serde(default)]
    pub trailer_id: Option<String>,
    /// The first day of the trip.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// The last day of the trip (inclusive).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Odometer reading at departure.
    #[serde(default)]
    pub odometer_start: Option<Decimal>,
    /// Odometer reading at return.
    #[serde(default)]
    pub odometer_end: Option<Decimal>,
}

/// Load information in a settle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Unique identifier for the load.
    pub id: String,
    /// The company the load belongs to, if known.
    #[serde(default)]
    pub company_id: Option<String>,
    /// Display name of the company.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Invoiced revenue for the load.
    pub total_revenue: Decimal,
    /// COD cash collected on delivery.
    #[serde(default)]
    pub amount_collected: Decimal,
    /// Cubic feet loaded.
    #[serde(default)]
    pub cuft_loaded: Decimal,
}

/// Expense information in a settle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRequest {
    /// Unique identifier for the expense.
    pub id: String,
    /// The expense category.
    pub category: ExpenseCategory,
    /// The expense amount.
    pub amount: Decimal,
    /// Who fronted the money, if recorded.
    #[serde(default)]
    pub paid_by: Option<PaidBy>,
    /// Receipt reference, if any.
    #[serde(default)]
    pub receipt_ref: Option<String>,
}

/// Driver pay configuration in a settle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayConfigRequest {
    /// The active pay mode.
    pub pay_mode: PayModeTag,
    /// Dollars per mile.
    #[serde(default)]
    pub rate_per_mile: Option<Decimal>,
    /// Dollars per cubic foot.
    #[serde(default)]
    pub rate_per_cuft: Option<Decimal>,
    /// Percent of revenue in [0, 100].
    #[serde(default)]
    pub percent_of_revenue: Option<Decimal>,
    /// Dollars per calendar day.
    #[serde(default)]
    pub flat_daily_rate: Option<Decimal>,
}

/// Request body for the advance endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceRequest {
    /// The status to advance to.
    pub to: SettlementStatus,
}

/// Request body for the pay endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRequest {
    /// How the payment was made (e.g. "ach", "check", "zelle").
    pub method: String,
    /// External payment reference, if any.
    #[serde(default)]
    pub reference: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<PayConfigRequest> for DriverPayConfig {
    fn from(req: PayConfigRequest) -> Self {
        DriverPayConfig {
            pay_mode: req.pay_mode,
            rate_per_mile: req.rate_per_mile,
            rate_per_cuft: req.rate_per_cuft,
            percent_of_revenue: req.percent_of_revenue,
            flat_daily_rate: req.flat_daily_rate,
        }
    }
}

impl From<PayRequest> for PaymentInput {
    fn from(req: PayRequest) -> Self {
        PaymentInput {
            method: req.method,
            reference: req.reference,
            notes: req.notes,
        }
    }
}

impl LoadRequest {
    fn into_load(self, trip_id: &str) -> Load {
        Load {
            id: self.id,
            trip_id: trip_id.to_string(),
            company_id: self.company_id,
            company_name: self.company_name,
            total_revenue: self.total_revenue,
            amount_collected: self.amount_collected,
            cuft_loaded: self.cuft_loaded,
        }
    }
}

impl ExpenseRequest {
    fn into_expense(self, trip_id: &str) -> Expense {
        Expense {
            id: self.id,
            trip_id: trip_id.to_string(),
            category: self.category,
            amount: self.amount,
            paid_by: self.paid_by,
            receipt_ref: self.receipt_ref,
        }
    }
}

impl From<SettleRequest> for TripFinancials {
    fn from(req: SettleRequest) -> Self {
        let trip_id = req.trip.id.clone();
        let loads: Vec<Load> = req
            .loads
            .into_iter()
            .map(|l| l.into_load(&trip_id))
            .collect();
        let expenses: Vec<Expense> = req
            .expenses
            .into_iter()
            .map(|e| e.into_expense(&trip_id))
            .collect();

        let trip = Trip {
            id: req.trip.id,
            owner_id: req.trip.owner_id,
            driver_id: req.trip.driver_id,
            truck_id: req.trip.truck_id,
            trailer_id: req.trip.trailer_id,
            start_date: req.trip.start_date,
            end_date: req.trip.end_date,
            odometer_start: req.trip.odometer_start,
            odometer_end: req.trip.odometer_end,
            status: TripStatus::Completed,
            totals: TripTotals::project(&loads, &expenses),
        };

        TripFinancials {
            trip,
            loads,
            expenses,
            pay: req.pay.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_settle_request() {
        let json = r#"{
            "owner_id": "acct_001",
            "trip": {
                "id": "trip_001",
                "owner_id": "acct_001",
                "driver_id": "drv_001",
                "truck_id": "trk_001",
                "start_date": "2026-03-02",
                "end_date": "2026-03-05",
                "odometer_start": "120000",
                "odometer_end": "121000"
            },
            "loads": [
                {
                    "id": "load_001",
                    "company_id": "co_a",
                    "company_name": "Company A",
                    "total_revenue": "1000.00",
                    "amount_collected": "400.00",
                    "cuft_loaded": "500"
                }
            ],
            "expenses": [
                {
                    "id": "exp_001",
                    "category": "fuel",
                    "amount": "80.00",
                    "paid_by": "driver_cash"
                }
            ],
            "pay": {
                "pay_mode": "per_mile",
                "rate_per_mile": "0.55"
            }
        }"#;

        let request: SettleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.owner_id, "acct_001");
        assert_eq!(request.trip.id, "trip_001");
        assert_eq!(request.loads.len(), 1);
        assert_eq!(request.expenses.len(), 1);
        assert_eq!(request.pay.pay_mode, PayModeTag::PerMile);
    }

    #[test]
    fn test_settle_request_conversion_stamps_trip_id() {
        let json = r#"{
            "owner_id": "acct_001",
            "trip": {
                "id": "trip_001",
                "owner_id": "acct_001",
                "driver_id": "drv_001",
                "truck_id": "trk_001"
            },
            "loads": [
                {"id": "load_001", "total_revenue": "500.00"}
            ],
            "expenses": [
                {"id": "exp_001", "category": "tolls", "amount": "12.50"}
            ],
            "pay": {"pay_mode": "flat_daily_rate", "flat_daily_rate": "200.00"}
        }"#;

        let request: SettleRequest = serde_json::from_str(json).unwrap();
        let snapshot: TripFinancials = request.into();

        assert_eq!(snapshot.loads[0].trip_id, "trip_001");
        assert_eq!(snapshot.expenses[0].trip_id, "trip_001");
        assert_eq!(
            snapshot.trip.totals.revenue_total,
            Decimal::from_str("500.00").unwrap()
        );
    }

    #[test]
    fn test_load_defaults_collected_and_cuft_to_zero() {
        let json = r#"{"id": "load_001", "total_revenue": "100.00"}"#;
        let load: LoadRequest = serde_json::from_str(json).unwrap();
        assert_eq!(load.amount_collected, Decimal::ZERO);
        assert_eq!(load.cuft_loaded, Decimal::ZERO);
        assert!(load.company_id.is_none());
    }

    #[test]
    fn test_deserialize_advance_request() {
        let request: AdvanceRequest = serde_json::from_str(r#"{"to": "review"}"#).unwrap();
        assert_eq!(request.to, SettlementStatus::Review);
    }

    #[test]
    fn test_deserialize_pay_request_defaults() {
        let request: PayRequest = serde_json::from_str(r#"{"method": "ach"}"#).unwrap();
        assert_eq!(request.method, "ach");
        assert!(request.reference.is_none());
        assert!(request.notes.is_none());
    }
}
