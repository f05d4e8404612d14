//! Trip model and related types.
//!
//! This module defines the Trip struct and its cached financial totals.
//! A trip ties one driver and one truck to a date range, an odometer span,
//! and the loads and expenses that settlement is computed from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Expense, Load, PayerClass};

/// Lifecycle status of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    /// The trip has been planned but not started.
    Planned,
    /// The trip is underway.
    Active,
    /// The trip is finished but not yet settled.
    Completed,
    /// The trip has been settled; terminal.
    Settled,
}

/// Cached financial projections for a trip.
///
/// These totals are recomputed whenever loads or expenses change and are
/// never authoritative beyond the last recompute. All five fields are
/// non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripTotals {
    /// Total revenue across all loads.
    pub revenue_total: Decimal,
    /// Total driver pay attributed to the trip.
    pub driver_pay_total: Decimal,
    /// Total fuel expenses.
    pub fuel_total: Decimal,
    /// Total toll expenses.
    pub tolls_total: Decimal,
    /// All other expenses.
    pub other_expenses_total: Decimal,
}

impl TripTotals {
    /// Returns zeroed totals for a trip with no loads or expenses.
    pub fn zero() -> Self {
        Self {
            revenue_total: Decimal::ZERO,
            driver_pay_total: Decimal::ZERO,
            fuel_total: Decimal::ZERO,
            tolls_total: Decimal::ZERO,
            other_expenses_total: Decimal::ZERO,
        }
    }

    /// Recomputes the cached projections from the attached loads and expenses.
    ///
    /// `driver_pay_total` is taken from expenses in the `driver_pay` category;
    /// the gross pay produced at settlement time supersedes it.
    pub fn project(loads: &[Load], expenses: &[Expense]) -> Self {
        let revenue_total = loads.iter().map(|l| l.total_revenue).sum();

        let mut driver_pay_total = Decimal::ZERO;
        let mut fuel_total = Decimal::ZERO;
        let mut tolls_total = Decimal::ZERO;
        let mut other_expenses_total = Decimal::ZERO;
        for expense in expenses {
            use crate::models::ExpenseCategory::*;
            match expense.category {
                DriverPay => driver_pay_total += expense.amount,
                Fuel => fuel_total += expense.amount,
                Tolls => tolls_total += expense.amount,
                Lumper | Parking | Maintenance | Other => other_expenses_total += expense.amount,
            }
        }

        Self {
            revenue_total,
            driver_pay_total,
            fuel_total,
            tolls_total,
            other_expenses_total,
        }
    }

    /// Sum of the reimbursable expenses a driver fronted personally.
    pub fn driver_funded(expenses: &[Expense]) -> Decimal {
        expenses
            .iter()
            .filter(|e| e.payer_class() == PayerClass::DriverFunded)
            .map(|e| e.amount)
            .sum()
    }
}

/// Represents one trip: one driver, one truck, an optional trailer,
/// a date range and odometer span, plus cached totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier for the trip.
    pub id: String,
    /// The account that owns this trip; settlement requires ownership.
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
    /// Current lifecycle status.
    pub status: TripStatus,
    /// Cached financial projections.
    pub totals: TripTotals,
}

impl Trip {
    /// Returns the inclusive calendar day count of the trip.
    ///
    /// `end - start + 1` days; a minimum of 1 when either date is absent or
    /// the dates are equal. Used by the flat-daily-rate pay mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use settlement_engine::models::{Trip, TripStatus, TripTotals};
    /// use chrono::NaiveDate;
    ///
    /// let mut trip = Trip {
    ///     id: "trip_001".to_string(),
    ///     owner_id: "acct_001".to_string(),
    ///     driver_id: "drv_001".to_string(),
    ///     truck_id: "trk_001".to_string(),
    ///     trailer_id: None,
    ///     start_date: NaiveDate::from_ymd_opt(2026, 3, 2),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 3, 5),
    ///     odometer_start: None,
    ///     odometer_end: None,
    ///     status: TripStatus::Completed,
    ///     totals: TripTotals::zero(),
    /// };
    /// assert_eq!(trip.day_count(), 4);
    ///
    /// trip.end_date = None;
    /// assert_eq!(trip.day_count(), 1);
    /// ```
    pub fn day_count(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end > start => (end - start).num_days() + 1,
            _ => 1,
        }
    }

    /// Returns the miles driven according to the odometer span.
    ///
    /// Missing readings yield zero miles (valid for pay modes that do not
    /// depend on distance). A negative span is a validation error, never
    /// coerced to zero.
    pub fn odometer_miles(&self) -> EngineResult<Decimal> {
        match (self.odometer_start, self.odometer_end) {
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(EngineError::InvalidAmount {
                        entity: "trip".to_string(),
                        id: self.id.clone(),
                        field: "odometer_end".to_string(),
                        message: format!("reading {} is below odometer_start {}", end, start),
                    });
                }
                Ok(end - start)
            }
            _ => Ok(Decimal::ZERO),
        }
    }

    /// Validates the trip record before settlement.
    pub fn validate(&self) -> EngineResult<()> {
        self.odometer_miles()?;
        for (field, value) in [
            ("revenue_total", self.totals.revenue_total),
            ("driver_pay_total", self.totals.driver_pay_total),
            ("fuel_total", self.totals.fuel_total),
            ("tolls_total", self.totals.tolls_total),
            ("other_expenses_total", self.totals.other_expenses_total),
        ] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidAmount {
                    entity: "trip".to_string(),
                    id: self.id.clone(),
                    field: field.to_string(),
                    message: "must be non-negative".to_string(),
                });
            }
        }
        Ok(())
    }
}
