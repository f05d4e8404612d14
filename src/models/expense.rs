//! Expense model and payer classification.
//!
//! Every expense is attributable to exactly one of two payer classes:
//! the company already paid it, or the driver is owed a reimbursement.
//! There is no third class.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The category of a trip expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Fuel purchases.
    Fuel,
    /// Road and bridge tolls.
    Tolls,
    /// Driver pay recorded as an expense line.
    DriverPay,
    /// Loading/unloading labor.
    Lumper,
    /// Parking fees.
    Parking,
    /// Truck or trailer maintenance.
    Maintenance,
    /// Anything else.
    Other,
}

/// The instrument an expense was paid with.
///
/// Tags arrive from external systems as free-form strings; anything the
/// engine does not recognize deserializes to [`PaidBy::Other`] and is
/// treated as driver-funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaidBy {
    /// The driver's personal card or account.
    DriverPersonal,
    /// Cash the driver was carrying (typically COD proceeds).
    DriverCash,
    /// A company credit card.
    CompanyCard,
    /// A company fuel card.
    FuelCard,
    /// An unrecognized payer tag.
    #[serde(other)]
    Other,
}

/// The two payer classes an expense can fall into.
///
/// This is the closed form of the company-instrument allow-list: modeling
/// it as an enum keeps the classifier from drifting from the list used at
/// the deserialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayerClass {
    /// The company already paid; nothing is owed to the driver.
    CompanyFunded,
    /// The driver fronted the cost and is owed a reimbursement.
    DriverFunded,
}

impl PaidBy {
    /// Maps the payer tag to its class.
    ///
    /// Only company-funded instruments (company card, fuel card) are
    /// company-paid; every other tag is driver-funded.
    pub fn payer_class(self) -> PayerClass {
        match self {
            PaidBy::CompanyCard | PaidBy::FuelCard => PayerClass::CompanyFunded,
            PaidBy::DriverPersonal | PaidBy::DriverCash | PaidBy::Other => PayerClass::DriverFunded,
        }
    }
}

/// One expense attached to a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for the expense.
    pub id: String,
    /// The trip this expense belongs to.
    pub trip_id: String,
    /// The expense category.
    pub category: ExpenseCategory,
    /// The amount spent; always non-negative.
    pub amount: Decimal,
    /// Who paid. An unset tag defaults to driver-funded.
    #[serde(default)]
    pub paid_by: Option<PaidBy>,
    /// Optional reference to receipt evidence.
    #[serde(default)]
    pub receipt_ref: Option<String>,
}

impl Expense {
    /// Returns the payer class for this expense.
    ///
    /// Unset tags are driver-funded. This default-to-reimbursement policy
    /// is deliberate: an expense the company cannot prove it paid is owed
    /// to the driver.
    pub fn payer_class(&self) -> PayerClass {
        self.paid_by
            .map(PaidBy::payer_class)
            .unwrap_or(PayerClass::DriverFunded)
    }

    /// Validates the expense record before settlement.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(EngineError::InvalidAmount {
                entity: "expense".to_string(),
                id: self.id.clone(),
                field: "amount".to_string(),
                message: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_expense(paid_by: Option<PaidBy>) -> Expense {
        Expense {
            id: "exp_001".to_string(),
            trip_id: "trip_001".to_string(),
            category: ExpenseCategory::Fuel,
            amount: dec("80.00"),
            paid_by,
            receipt_ref: None,
        }
    }

    /// EX-001: company card is company-funded
    #[test]
    fn test_company_card_is_company_funded() {
        let expense = make_expense(Some(PaidBy::CompanyCard));
        assert_eq!(expense.payer_class(), PayerClass::CompanyFunded);
    }

    /// EX-002: fuel card is company-funded
    #[test]
    fn test_fuel_card_is_company_funded() {
        let expense = make_expense(Some(PaidBy::FuelCard));
        assert_eq!(expense.payer_class(), PayerClass::CompanyFunded);
    }

    /// EX-003: driver cash is driver-funded
    #[test]
    fn test_driver_cash_is_driver_funded() {
        let expense = make_expense(Some(PaidBy::DriverCash));
        assert_eq!(expense.payer_class(), PayerClass::DriverFunded);
    }

    /// EX-004: unset payer defaults to driver-funded
    #[test]
    fn test_unset_payer_defaults_to_driver_funded() {
        let expense = make_expense(None);
        assert_eq!(expense.payer_class(), PayerClass::DriverFunded);
    }

    /// EX-005: unrecognized payer tag deserializes to Other, driver-funded
    #[test]
    fn test_unknown_payer_tag_is_driver_funded() {
        let json = r#"{
            "id": "exp_002",
            "trip_id": "trip_001",
            "category": "parking",
            "amount": "15.00",
            "paid_by": "efs_check"
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.paid_by, Some(PaidBy::Other));
        assert_eq!(expense.payer_class(), PayerClass::DriverFunded);
    }

    /// EX-006: negative amount is rejected
    #[test]
    fn test_negative_amount_rejected() {
        let mut expense = make_expense(Some(PaidBy::CompanyCard));
        expense.amount = dec("-5.00");
        match expense.validate().unwrap_err() {
            EngineError::InvalidAmount { entity, field, .. } => {
                assert_eq!(entity, "expense");
                assert_eq!(field, "amount");
            }
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_amount_is_valid() {
        let mut expense = make_expense(None);
        expense.amount = Decimal::ZERO;
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&ExpenseCategory::DriverPay).unwrap(),
            "\"driver_pay\""
        );
        assert_eq!(
            serde_json::to_string(&ExpenseCategory::Lumper).unwrap(),
            "\"lumper\""
        );
    }

    #[test]
    fn test_paid_by_serialization() {
        assert_eq!(
            serde_json::to_string(&PaidBy::DriverPersonal).unwrap(),
            "\"driver_personal\""
        );
        assert_eq!(
            serde_json::to_string(&PaidBy::FuelCard).unwrap(),
            "\"fuel_card\""
        );
    }

    #[test]
    fn test_expense_serialization_round_trip() {
        let expense = make_expense(Some(PaidBy::CompanyCard));
        let json = serde_json::to_string(&expense).unwrap();
        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense, deserialized);
    }
}
