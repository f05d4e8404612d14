//! Net settlement calculation.
//!
//! Folds the signed payable amount into an absolute net amount and a
//! settlement direction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which way money moves to settle the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementDirection {
    /// The payable is positive: the company pays the driver.
    CompanyOwesDriver,
    /// The payable is negative: the driver pays the company.
    DriverOwesCompany,
    /// The payable is exactly zero after rounding to cents.
    Even,
}

/// The net settlement figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSettlement {
    /// Absolute value of the payable.
    pub net_amount: Decimal,
    /// Which party owes.
    pub direction: SettlementDirection,
}

/// Computes the net settlement from the (already rounded) payable amount.
///
/// The zero comparison is exact; amounts are rounded to cents upstream, so
/// no epsilon is involved.
pub fn net_settlement(payable_amount: Decimal) -> NetSettlement {
    let direction = if payable_amount > Decimal::ZERO {
        SettlementDirection::CompanyOwesDriver
    } else if payable_amount < Decimal::ZERO {
        SettlementDirection::DriverOwesCompany
    } else {
        SettlementDirection::Even
    };

    NetSettlement {
        net_amount: payable_amount.abs(),
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// NS-001: positive payable -- company owes driver
    #[test]
    fn test_positive_payable() {
        let net = net_settlement(dec("280.00"));
        assert_eq!(net.net_amount, dec("280.00"));
        assert_eq!(net.direction, SettlementDirection::CompanyOwesDriver);
    }

    /// NS-002: negative payable -- driver owes company
    #[test]
    fn test_negative_payable() {
        let net = net_settlement(dec("-150.00"));
        assert_eq!(net.net_amount, dec("150.00"));
        assert_eq!(net.direction, SettlementDirection::DriverOwesCompany);
    }

    /// NS-003: exact zero is even
    #[test]
    fn test_zero_payable() {
        let net = net_settlement(Decimal::ZERO);
        assert_eq!(net.net_amount, Decimal::ZERO);
        assert_eq!(net.direction, SettlementDirection::Even);
    }

    /// NS-004: a cent either side of zero is not even
    #[test]
    fn test_one_cent_is_not_even() {
        assert_eq!(
            net_settlement(dec("0.01")).direction,
            SettlementDirection::CompanyOwesDriver
        );
        assert_eq!(
            net_settlement(dec("-0.01")).direction,
            SettlementDirection::DriverOwesCompany
        );
    }

    #[test]
    fn test_direction_serialization() {
        assert_eq!(
            serde_json::to_string(&SettlementDirection::CompanyOwesDriver).unwrap(),
            "\"company_owes_driver\""
        );
        assert_eq!(
            serde_json::to_string(&SettlementDirection::Even).unwrap(),
            "\"even\""
        );
    }
}
