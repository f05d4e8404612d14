//! Persistence seam for settlement records.
//!
//! The engine persists only its own output: the settlement plus its
//! receivable and payable entries, always as one atomic record set. Trips,
//! loads, and expenses belong to external collaborators and arrive as
//! immutable snapshots. Implementations must serialize the settle operation
//! per trip: of two concurrent inserts for the same trip, at most one may
//! succeed.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Payable, Receivable, Settlement};

/// A settlement together with the ledger entries it owns.
///
/// Persisted and replaced as a unit: all three parts or none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecordSet {
    /// The settlement record.
    pub settlement: Settlement,
    /// One receivable per company on the trip.
    pub receivables: Vec<Receivable>,
    /// The driver's payable.
    pub payable: Payable,
}

/// Storage contract for settlement record sets.
pub trait SettlementStore: Send + Sync {
    /// Returns the record set for a settlement id, if any.
    fn get(&self, settlement_id: Uuid) -> Option<SettlementRecordSet>;

    /// Returns the record set for a trip, if the trip has been settled.
    fn find_by_trip(&self, trip_id: &str) -> Option<SettlementRecordSet>;

    /// Inserts a new record set atomically.
    ///
    /// # Errors
    ///
    /// [`EngineError::SettlementAlreadyExists`] when the trip already has a
    /// settlement; this uniqueness check is what serializes concurrent
    /// settle calls on the same trip.
    fn insert(&self, records: SettlementRecordSet) -> EngineResult<()>;

    /// Replaces an existing record set atomically.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] when no settlement with that id exists.
    fn replace(&self, records: SettlementRecordSet) -> EngineResult<()>;
}

/// In-memory store used by the HTTP facade and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    by_id: HashMap<Uuid, SettlementRecordSet>,
    by_trip: HashMap<String, Uuid>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettlementStore for InMemoryStore {
    fn get(&self, settlement_id: Uuid) -> Option<SettlementRecordSet> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.by_id.get(&settlement_id).cloned()
    }

    fn find_by_trip(&self, trip_id: &str) -> Option<SettlementRecordSet> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = inner.by_trip.get(trip_id)?;
        inner.by_id.get(id).cloned()
    }

    fn insert(&self, records: SettlementRecordSet) -> EngineResult<()> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let trip_id = records.settlement.trip_id.clone();
        if let Some(existing) = inner.by_trip.get(&trip_id) {
            return Err(EngineError::SettlementAlreadyExists {
                trip_id,
                settlement_id: *existing,
            });
        }
        inner.by_trip.insert(trip_id, records.settlement.id);
        inner.by_id.insert(records.settlement.id, records);
        Ok(())
    }

    fn replace(&self, records: SettlementRecordSet) -> EngineResult<()> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = records.settlement.id;
        if !inner.by_id.contains_key(&id) {
            return Err(EngineError::NotFound {
                entity: "settlement".to_string(),
                id: id.to_string(),
            });
        }
        inner.by_id.insert(id, records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EntryStatus, PayBreakdown, Payable, Receivable, SettlementStatus,
    };
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;

    fn make_records(trip_id: &str) -> SettlementRecordSet {
        let settlement_id = Uuid::new_v4();
        let now = DateTime::parse_from_rfc3339("2026-03-06T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        SettlementRecordSet {
            settlement: Settlement {
                id: settlement_id,
                trip_id: trip_id.to_string(),
                driver_id: "drv_001".to_string(),
                status: SettlementStatus::Pending,
                total_revenue: Decimal::new(160000, 2),
                total_driver_pay: Decimal::new(55000, 2),
                total_reimbursements: Decimal::ZERO,
                total_profit: Decimal::new(105000, 2),
                breakdown: PayBreakdown {
                    pay_mode: "per_mile".to_string(),
                    components: vec![],
                },
                warnings: vec![],
                payment: None,
                created_at: now,
                updated_at: now,
            },
            receivables: vec![Receivable {
                id: Uuid::new_v4(),
                settlement_id,
                company_id: Some("co_a".to_string()),
                company_name: "Company A".to_string(),
                amount: Decimal::new(60000, 2),
                status: EntryStatus::Open,
            }],
            payable: Payable {
                id: Uuid::new_v4(),
                settlement_id,
                driver_id: "drv_001".to_string(),
                amount: Decimal::new(55000, 2),
                status: EntryStatus::Open,
            },
        }
    }

    /// SS-001: insert then get and find_by_trip
    #[test]
    fn test_insert_then_lookup() {
        let store = InMemoryStore::new();
        let records = make_records("trip_001");
        let id = records.settlement.id;

        store.insert(records.clone()).unwrap();
        assert_eq!(store.get(id), Some(records.clone()));
        assert_eq!(store.find_by_trip("trip_001"), Some(records));
    }

    /// SS-002: second insert for the same trip is rejected
    #[test]
    fn test_duplicate_trip_insert_rejected() {
        let store = InMemoryStore::new();
        let first = make_records("trip_001");
        let first_id = first.settlement.id;
        store.insert(first).unwrap();

        let second = make_records("trip_001");
        match store.insert(second).unwrap_err() {
            EngineError::SettlementAlreadyExists {
                trip_id,
                settlement_id,
            } => {
                assert_eq!(trip_id, "trip_001");
                assert_eq!(settlement_id, first_id);
            }
            other => panic!("Expected SettlementAlreadyExists, got {:?}", other),
        }
    }

    /// SS-003: replace overwrites the whole record set
    #[test]
    fn test_replace_overwrites() {
        let store = InMemoryStore::new();
        let mut records = make_records("trip_001");
        store.insert(records.clone()).unwrap();

        records.settlement.total_driver_pay = Decimal::new(60000, 2);
        records.receivables.clear();
        store.replace(records.clone()).unwrap();

        let stored = store.get(records.settlement.id).unwrap();
        assert_eq!(stored.settlement.total_driver_pay, Decimal::new(60000, 2));
        assert!(stored.receivables.is_empty());
    }

    /// SS-004: replace of an unknown settlement is NotFound
    #[test]
    fn test_replace_unknown_is_not_found() {
        let store = InMemoryStore::new();
        let records = make_records("trip_001");
        assert!(matches!(
            store.replace(records).unwrap_err(),
            EngineError::NotFound { .. }
        ));
    }

    /// SS-005: lookups miss cleanly
    #[test]
    fn test_lookup_misses() {
        let store = InMemoryStore::new();
        assert!(store.get(Uuid::new_v4()).is_none());
        assert!(store.find_by_trip("trip_999").is_none());
    }
}
