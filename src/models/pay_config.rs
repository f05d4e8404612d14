//! Driver pay configuration.
//!
//! A driver's stored pay configuration is a tag plus a handful of optional
//! rate fields. [`DriverPayConfig::resolve`] turns it into the closed
//! [`PayMode`] union, so the calculator can be a single exhaustive match and
//! adding a mode is a compile-time-checked change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The pay mode tag as stored on a driver record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayModeTag {
    /// Paid per mile driven.
    PerMile,
    /// Paid per cubic foot loaded.
    PerCuft,
    /// Paid per mile plus per cubic foot.
    PerMileAndCuft,
    /// Paid a percentage of trip revenue.
    PercentOfRevenue,
    /// Paid a flat rate per trip day.
    FlatDailyRate,
}

impl PayModeTag {
    /// Returns the tag's wire name, used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            PayModeTag::PerMile => "per_mile",
            PayModeTag::PerCuft => "per_cuft",
            PayModeTag::PerMileAndCuft => "per_mile_and_cuft",
            PayModeTag::PercentOfRevenue => "percent_of_revenue",
            PayModeTag::FlatDailyRate => "flat_daily_rate",
        }
    }
}

/// A resolved pay mode carrying exactly the parameters it needs.
///
/// Exactly one mode is active per driver at settlement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pay_mode", rename_all = "snake_case")]
pub enum PayMode {
    /// Gross pay = miles x rate.
    PerMile {
        /// Dollars per mile.
        rate_per_mile: Decimal,
    },
    /// Gross pay = cubic feet x rate.
    PerCuft {
        /// Dollars per cubic foot.
        rate_per_cuft: Decimal,
    },
    /// Gross pay = miles x mile rate + cubic feet x cuft rate.
    PerMileAndCuft {
        /// Dollars per mile.
        rate_per_mile: Decimal,
        /// Dollars per cubic foot.
        rate_per_cuft: Decimal,
    },
    /// Gross pay = revenue x percent / 100.
    PercentOfRevenue {
        /// Percent in [0, 100].
        percent_of_revenue: Decimal,
    },
    /// Gross pay = trip days x daily rate.
    FlatDailyRate {
        /// Dollars per calendar day.
        flat_daily_rate: Decimal,
    },
}

impl PayMode {
    /// Returns the wire name of this mode.
    pub fn tag(&self) -> PayModeTag {
        match self {
            PayMode::PerMile { .. } => PayModeTag::PerMile,
            PayMode::PerCuft { .. } => PayModeTag::PerCuft,
            PayMode::PerMileAndCuft { .. } => PayModeTag::PerMileAndCuft,
            PayMode::PercentOfRevenue { .. } => PayModeTag::PercentOfRevenue,
            PayMode::FlatDailyRate { .. } => PayModeTag::FlatDailyRate,
        }
    }
}

/// A driver's raw pay configuration, shaped the way external systems store
/// it: one active tag plus whatever rate fields happen to be present.
///
/// Unused rate fields are ignored even if present; missing required fields
/// are a [`EngineError::MissingRateParameter`] at resolution time, never a
/// silently substituted default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverPayConfig {
    /// The active pay mode.
    pub pay_mode: PayModeTag,
    /// Dollars per mile, for the mile-based modes.
    #[serde(default)]
    pub rate_per_mile: Option<Decimal>,
    /// Dollars per cubic foot, for the volume-based modes.
    #[serde(default)]
    pub rate_per_cuft: Option<Decimal>,
    /// Percent of revenue in [0, 100].
    #[serde(default)]
    pub percent_of_revenue: Option<Decimal>,
    /// Dollars per calendar day.
    #[serde(default)]
    pub flat_daily_rate: Option<Decimal>,
}

impl DriverPayConfig {
    /// Resolves the raw configuration into a closed [`PayMode`].
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingRateParameter`] when the active mode's rate
    ///   field is absent, identifying the field by name.
    /// - [`EngineError::InvalidPercent`] when `percent_of_revenue` falls
    ///   outside [0, 100]; out-of-range percents are rejected, not clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use settlement_engine::models::{DriverPayConfig, PayMode, PayModeTag};
    /// use rust_decimal::Decimal;
    ///
    /// let config = DriverPayConfig {
    ///     pay_mode: PayModeTag::PerMile,
    ///     rate_per_mile: Some(Decimal::new(55, 2)),
    ///     rate_per_cuft: None,
    ///     percent_of_revenue: None,
    ///     flat_daily_rate: None,
    /// };
    /// assert_eq!(
    ///     config.resolve().unwrap(),
    ///     PayMode::PerMile { rate_per_mile: Decimal::new(55, 2) }
    /// );
    /// ```
    pub fn resolve(&self) -> EngineResult<PayMode> {
        let require = |field: &str, value: Option<Decimal>| {
            value.ok_or_else(|| EngineError::MissingRateParameter {
                pay_mode: self.pay_mode.as_str().to_string(),
                field: field.to_string(),
            })
        };

        match self.pay_mode {
            PayModeTag::PerMile => Ok(PayMode::PerMile {
                rate_per_mile: require("rate_per_mile", self.rate_per_mile)?,
            }),
            PayModeTag::PerCuft => Ok(PayMode::PerCuft {
                rate_per_cuft: require("rate_per_cuft", self.rate_per_cuft)?,
            }),
            PayModeTag::PerMileAndCuft => Ok(PayMode::PerMileAndCuft {
                rate_per_mile: require("rate_per_mile", self.rate_per_mile)?,
                rate_per_cuft: require("rate_per_cuft", self.rate_per_cuft)?,
            }),
            PayModeTag::PercentOfRevenue => {
                let percent = require("percent_of_revenue", self.percent_of_revenue)?;
                if percent < Decimal::ZERO || percent > Decimal::from(100) {
                    return Err(EngineError::InvalidPercent {
                        value: percent.to_string(),
                    });
                }
                Ok(PayMode::PercentOfRevenue {
                    percent_of_revenue: percent,
                })
            }
            PayModeTag::FlatDailyRate => Ok(PayMode::FlatDailyRate {
                flat_daily_rate: require("flat_daily_rate", self.flat_daily_rate)?,
            }),
        }
    }
}
