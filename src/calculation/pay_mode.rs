//! Gross pay calculation per pay mode.
//!
//! This module computes a driver's gross pay for one trip from the resolved
//! [`PayMode`] and a bundle of trip metrics. The output carries a component
//! breakdown so the figure can be displayed and audited.

use rust_decimal::Decimal;

use super::round_cents;
use crate::models::{PayBreakdown, PayComponent, PayMode};

/// The trip metrics a pay mode can draw on.
///
/// Each mode reads only its declared inputs: `per_mile` is invariant to
/// `cubic_feet` and `revenue`, and so on. Zero values are valid and yield
/// zero pay for the corresponding component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripMetrics {
    /// Miles driven (odometer span).
    pub miles: Decimal,
    /// Cubic feet loaded across all loads.
    pub cubic_feet: Decimal,
    /// Total revenue across all loads.
    pub revenue: Decimal,
    /// Inclusive calendar day count, minimum 1.
    pub days: i64,
}

/// The result of a gross pay calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct GrossPayResult {
    /// Gross pay rounded to cents.
    pub gross_pay: Decimal,
    /// The components that produced it.
    pub breakdown: PayBreakdown,
}

/// Computes the driver's gross pay for one trip.
///
/// Components are computed unrounded and summed; only the final gross pay
/// and the per-component display amounts are rounded to cents (half-up).
/// Percent validation happens when the raw config is resolved into
/// [`PayMode`], so this function cannot fail.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{calculate_gross_pay, TripMetrics};
/// use settlement_engine::models::PayMode;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let metrics = TripMetrics {
///     miles: Decimal::from(1000),
///     cubic_feet: Decimal::ZERO,
///     revenue: Decimal::ZERO,
///     days: 1,
/// };
/// let mode = PayMode::PerMile {
///     rate_per_mile: Decimal::from_str("0.55").unwrap(),
/// };
/// let result = calculate_gross_pay(&mode, &metrics);
/// assert_eq!(result.gross_pay, Decimal::from_str("550.00").unwrap());
/// ```
pub fn calculate_gross_pay(mode: &PayMode, metrics: &TripMetrics) -> GrossPayResult {
    let mut components: Vec<(String, Decimal, Decimal)> = Vec::new();

    match *mode {
        PayMode::PerMile { rate_per_mile } => {
            components.push(("miles".to_string(), metrics.miles, rate_per_mile));
        }
        PayMode::PerCuft { rate_per_cuft } => {
            components.push(("cubic feet".to_string(), metrics.cubic_feet, rate_per_cuft));
        }
        PayMode::PerMileAndCuft {
            rate_per_mile,
            rate_per_cuft,
        } => {
            components.push(("miles".to_string(), metrics.miles, rate_per_mile));
            components.push(("cubic feet".to_string(), metrics.cubic_feet, rate_per_cuft));
        }
        PayMode::PercentOfRevenue { percent_of_revenue } => {
            components.push((
                "revenue share".to_string(),
                metrics.revenue,
                percent_of_revenue / Decimal::from(100),
            ));
        }
        PayMode::FlatDailyRate { flat_daily_rate } => {
            components.push((
                "trip days".to_string(),
                Decimal::from(metrics.days),
                flat_daily_rate,
            ));
        }
    }

    let raw_total: Decimal = components.iter().map(|(_, qty, rate)| qty * rate).sum();

    GrossPayResult {
        gross_pay: round_cents(raw_total),
        breakdown: PayBreakdown {
            pay_mode: mode.tag().as_str().to_string(),
            components: components
                .into_iter()
                .map(|(label, quantity, rate)| PayComponent {
                    label,
                    quantity,
                    rate,
                    amount: round_cents(quantity * rate),
                })
                .collect(),
        },
    }
}
