//! Load model.
//!
//! A load is a trip-scoped view of one shipment: it belongs to exactly one
//! company (possibly unknown), carries revenue, the collect-on-delivery
//! amount the driver took at the door, and the cubic feet actually loaded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One load carried on a trip.
///
/// Multiple loads on the same trip may belong to different companies; each
/// contributes independently to revenue and receivables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Unique identifier for the load.
    pub id: String,
    /// The trip this load is attached to.
    pub trip_id: String,
    /// The company the load belongs to; `None` groups under the unknown bucket.
    #[serde(default)]
    pub company_id: Option<String>,
    /// Display name of the company.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Total revenue for this load (rate x quantity, pre-computed upstream).
    pub total_revenue: Decimal,
    /// Cash/card collected by the driver on delivery (COD).
    pub amount_collected: Decimal,
    /// Cubic feet actually loaded.
    pub cuft_loaded: Decimal,
}

impl Load {
    /// Validates the load record before settlement.
    ///
    /// Amounts must be present, well-formed numbers that are non-negative;
    /// a missing amount is a construction failure upstream, never an
    /// implicit zero inside the calculator.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("total_revenue", self.total_revenue),
            ("amount_collected", self.amount_collected),
            ("cuft_loaded", self.cuft_loaded),
        ] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidAmount {
                    entity: "load".to_string(),
                    id: self.id.clone(),
                    field: field.to_string(),
                    message: "must be non-negative".to_string(),
                });
            }
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

    fn make_load() -> Load {
        Load {
            id: "load_001".to_string(),
            trip_id: "trip_001".to_string(),
            company_id: Some("co_a".to_string()),
            company_name: Some("Company A".to_string()),
            total_revenue: dec("1000.00"),
            amount_collected: dec("400.00"),
            cuft_loaded: dec("500"),
        }
    }

    /// LD-001: well-formed load passes validation
    #[test]
    fn test_valid_load_passes() {
        assert!(make_load().validate().is_ok());
    }

    /// LD-002: negative revenue is rejected
    #[test]
    fn test_negative_revenue_rejected() {
        let mut load = make_load();
        load.total_revenue = dec("-10.00");
        match load.validate().unwrap_err() {
            EngineError::InvalidAmount { field, id, .. } => {
                assert_eq!(field, "total_revenue");
                assert_eq!(id, "load_001");
            }
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    /// LD-003: negative collection is rejected
    #[test]
    fn test_negative_collection_rejected() {
        let mut load = make_load();
        load.amount_collected = dec("-0.01");
        assert!(load.validate().is_err());
    }

    /// LD-004: zero amounts are valid
    #[test]
    fn test_zero_amounts_are_valid() {
        let mut load = make_load();
        load.total_revenue = Decimal::ZERO;
        load.amount_collected = Decimal::ZERO;
        load.cuft_loaded = Decimal::ZERO;
        assert!(load.validate().is_ok());
    }

    #[test]
    fn test_load_deserialization_without_company() {
        let json = r#"{
            "id": "load_009",
            "trip_id": "trip_001",
            "total_revenue": "250.00",
            "amount_collected": "0",
            "cuft_loaded": "120"
        }"#;

        let load: Load = serde_json::from_str(json).unwrap();
        assert!(load.company_id.is_none());
        assert!(load.company_name.is_none());
        assert_eq!(load.total_revenue, dec("250.00"));
    }

    #[test]
    fn test_load_serialization_round_trip() {
        let load = make_load();
        let json = serde_json::to_string(&load).unwrap();
        let deserialized: Load = serde_json::from_str(&json).unwrap();
        assert_eq!(load, deserialized);
    }
}
