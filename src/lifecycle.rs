//! Settlement lifecycle orchestration.
//!
//! This module ties the calculation steps together and drives the
//! settlement state machine: close-and-settle creates the record set at
//! `pending`, recalculate refreshes amounts in place, advance moves the
//! status forward, and mark-paid terminates the lifecycle. Every operation
//! validates its inputs fully before any write (validate-then-write); no
//! operation performs a partial persist.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::calculation::{
    GrossPayResult, LedgerEntries, NetSettlement, TripMetrics, aggregate_revenue,
    calculate_gross_pay, classify_expenses, generate_ledger, net_settlement, round_cents,
};
use crate::config::SettlementConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DriverPayConfig, EntryStatus, Expense, Load, Payable, PayBreakdown, PaymentDetails,
    Receivable, Settlement, SettlementStatus, SettlementWarning, Trip,
};
use crate::store::{SettlementRecordSet, SettlementStore};

/// An immutable snapshot of everything settlement needs for one trip.
///
/// Supplied by external collaborators; the engine never re-fetches
/// mid-computation.
#[derive(Debug, Clone, PartialEq)]
pub struct TripFinancials {
    /// The trip being settled.
    pub trip: Trip,
    /// The loads attached to the trip, in storage order.
    pub loads: Vec<Load>,
    /// The expenses attached to the trip, in storage order.
    pub expenses: Vec<Expense>,
    /// The driver's pay configuration at settlement time.
    pub pay: DriverPayConfig,
}

impl TripFinancials {
    fn validate(&self) -> EngineResult<()> {
        self.trip.validate()?;
        for load in &self.loads {
            load.validate()?;
        }
        for expense in &self.expenses {
            expense.validate()?;
        }
        Ok(())
    }
}

/// The pure output of one settlement computation, before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementComputation {
    /// Revenue across all loads.
    pub total_revenue: Decimal,
    /// COD collected across all loads.
    pub total_collected: Decimal,
    /// The driver's gross pay.
    pub total_driver_pay: Decimal,
    /// Driver-paid expenses owed back to the driver.
    pub total_reimbursements: Decimal,
    /// Revenue minus gross pay minus all trip expenses.
    pub total_profit: Decimal,
    /// The displayable gross-pay breakdown.
    pub breakdown: PayBreakdown,
    /// Receivable drafts, one per company bucket.
    pub receivables: Vec<crate::calculation::ReceivableDraft>,
    /// The driver's payable draft.
    pub payable: crate::calculation::PayableDraft,
    /// The net figure folded from the payable.
    pub net: NetSettlement,
    /// Anomalies detected during computation.
    pub warnings: Vec<SettlementWarning>,
}

/// Runs the full settlement computation for one trip snapshot.
///
/// Deterministic: identical snapshots produce identical output. All
/// monetary figures are rounded to cents at final aggregation.
pub fn compute_settlement(snapshot: &TripFinancials) -> EngineResult<SettlementComputation> {
    snapshot.validate()?;
    let mode = snapshot.pay.resolve()?;

    let revenue = aggregate_revenue(&snapshot.loads);
    let expenses = classify_expenses(&snapshot.expenses);

    let metrics = TripMetrics {
        miles: snapshot.trip.odometer_miles()?,
        cubic_feet: revenue.total_cuft,
        revenue: revenue.total_revenue,
        days: snapshot.trip.day_count(),
    };
    let gross: GrossPayResult = calculate_gross_pay(&mode, &metrics);

    let ledger: LedgerEntries =
        generate_ledger(&revenue, &expenses, &gross, &snapshot.trip.driver_id);
    let net = net_settlement(ledger.payable.amount);

    let total_profit =
        round_cents(revenue.total_revenue - gross.gross_pay - expenses.grand_total());

    Ok(SettlementComputation {
        total_revenue: round_cents(revenue.total_revenue),
        total_collected: round_cents(revenue.total_collected),
        total_driver_pay: gross.gross_pay,
        total_reimbursements: round_cents(expenses.driver_paid),
        total_profit,
        breakdown: gross.breakdown,
        receivables: ledger.receivables,
        payable: ledger.payable,
        net,
        warnings: ledger.warnings,
    })
}

/// Payment details supplied by the caller of mark-paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInput {
    /// How the payment was made.
    pub method: String,
    /// External payment reference, if any.
    pub reference: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// The settlement lifecycle engine.
///
/// Wraps a [`SettlementStore`] and the policy configuration; all four
/// lifecycle operations go through here.
#[derive(Clone)]
pub struct SettlementEngine {
    store: Arc<dyn SettlementStore>,
    config: SettlementConfig,
}

impl SettlementEngine {
    /// Creates an engine over the given store and configuration.
    pub fn new(store: Arc<dyn SettlementStore>, config: SettlementConfig) -> Self {
        Self { store, config }
    }

    /// Returns the record set for a settlement, if it exists.
    pub fn get(&self, settlement_id: Uuid) -> Option<SettlementRecordSet> {
        self.store.get(settlement_id)
    }

    /// Closes a trip and creates its settlement at `pending`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] when `owner_id` does not own the trip.
    /// - [`EngineError::SettlementAlreadyExists`] when the trip already has
    ///   a settlement, of any status; recalculate is the only way to
    ///   refresh an existing settlement.
    /// - Any validation error from the computation; nothing is persisted
    ///   in that case.
    pub fn close_and_settle(
        &self,
        owner_id: &str,
        snapshot: &TripFinancials,
    ) -> EngineResult<SettlementRecordSet> {
        self.check_ownership(owner_id, &snapshot.trip)?;

        if let Some(existing) = self.store.find_by_trip(&snapshot.trip.id) {
            return Err(EngineError::SettlementAlreadyExists {
                trip_id: snapshot.trip.id.clone(),
                settlement_id: existing.settlement.id,
            });
        }

        let computation = compute_settlement(snapshot)?;
        let records = self.build_records(Uuid::new_v4(), snapshot, computation, None);
        self.store.insert(records.clone())?;

        info!(
            settlement_id = %records.settlement.id,
            trip_id = %records.settlement.trip_id,
            gross_pay = %records.settlement.total_driver_pay,
            payable = %records.payable.amount,
            "Trip settled"
        );
        Ok(records)
    }

    /// Re-runs the computation against an existing settlement.
    ///
    /// Amounts, breakdown, and warnings are overwritten; status, creation
    /// time, and the settlement id are preserved. Deterministic: unchanged
    /// inputs reproduce identical amounts.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] when the settlement does not exist, the
    ///   snapshot is for a different trip, or the caller does not own it.
    /// - [`EngineError::SettlementLocked`] once the settlement is paid; no
    ///   field is mutated in that case.
    pub fn recalculate(
        &self,
        owner_id: &str,
        settlement_id: Uuid,
        snapshot: &TripFinancials,
    ) -> EngineResult<SettlementRecordSet> {
        self.check_ownership(owner_id, &snapshot.trip)?;

        let existing = self
            .store
            .get(settlement_id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "settlement".to_string(),
                id: settlement_id.to_string(),
            })?;
        if existing.settlement.trip_id != snapshot.trip.id {
            return Err(EngineError::NotFound {
                entity: "trip".to_string(),
                id: snapshot.trip.id.clone(),
            });
        }
        if existing.settlement.status == SettlementStatus::Paid {
            return Err(EngineError::SettlementLocked { settlement_id });
        }

        let computation = compute_settlement(snapshot)?;
        let records = self.build_records(
            settlement_id,
            snapshot,
            computation,
            Some(&existing.settlement),
        );
        self.store.replace(records.clone())?;

        info!(
            settlement_id = %settlement_id,
            trip_id = %records.settlement.trip_id,
            gross_pay = %records.settlement.total_driver_pay,
            "Settlement recalculated"
        );
        Ok(records)
    }

    /// Advances a settlement to `review` or `approved`.
    ///
    /// Only forward moves are permitted; `paid` is reached via
    /// [`SettlementEngine::mark_paid`], never here.
    pub fn advance_status(
        &self,
        settlement_id: Uuid,
        to: SettlementStatus,
    ) -> EngineResult<SettlementRecordSet> {
        let mut records = self
            .store
            .get(settlement_id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "settlement".to_string(),
                id: settlement_id.to_string(),
            })?;

        let from = records.settlement.status;
        if from == SettlementStatus::Paid {
            return Err(EngineError::SettlementLocked { settlement_id });
        }
        if to == SettlementStatus::Paid || !from.can_advance_to(to) {
            return Err(EngineError::InvalidTransition {
                settlement_id,
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }

        records.settlement.status = to;
        records.settlement.updated_at = Utc::now();
        self.store.replace(records.clone())?;

        info!(
            settlement_id = %settlement_id,
            from = from.as_str(),
            to = to.as_str(),
            "Settlement status advanced"
        );
        Ok(records)
    }

    /// Marks a settlement paid, stamping payment details and a timestamp.
    ///
    /// Terminal: nothing rolls this back. When the configuration disables
    /// the direct fast path, only `approved` settlements may be paid.
    pub fn mark_paid(
        &self,
        settlement_id: Uuid,
        payment: PaymentInput,
    ) -> EngineResult<SettlementRecordSet> {
        let mut records = self
            .store
            .get(settlement_id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "settlement".to_string(),
                id: settlement_id.to_string(),
            })?;

        let from = records.settlement.status;
        if from == SettlementStatus::Paid {
            return Err(EngineError::SettlementLocked { settlement_id });
        }
        if !self.config.lifecycle.allow_direct_mark_paid && from != SettlementStatus::Approved {
            return Err(EngineError::InvalidTransition {
                settlement_id,
                from: from.as_str().to_string(),
                to: SettlementStatus::Paid.as_str().to_string(),
            });
        }

        let now = Utc::now();
        records.settlement.status = SettlementStatus::Paid;
        records.settlement.payment = Some(PaymentDetails {
            method: payment.method,
            reference: payment.reference,
            notes: payment.notes,
            paid_at: now,
        });
        records.settlement.updated_at = now;
        records.payable.status = EntryStatus::Paid;
        self.store.replace(records.clone())?;

        info!(
            settlement_id = %settlement_id,
            from = from.as_str(),
            "Settlement marked paid"
        );
        Ok(records)
    }

    fn check_ownership(&self, owner_id: &str, trip: &Trip) -> EngineResult<()> {
        if trip.owner_id != owner_id {
            // Ownership failures read as not-found so callers cannot probe
            // for other accounts' trips.
            return Err(EngineError::NotFound {
                entity: "trip".to_string(),
                id: trip.id.clone(),
            });
        }
        Ok(())
    }

    fn build_records(
        &self,
        settlement_id: Uuid,
        snapshot: &TripFinancials,
        computation: SettlementComputation,
        existing: Option<&Settlement>,
    ) -> SettlementRecordSet {
        let now = Utc::now();
        let warnings = if self.config.warnings.flag_overcollection {
            computation.warnings
        } else {
            Vec::new()
        };

        let settlement = Settlement {
            id: settlement_id,
            trip_id: snapshot.trip.id.clone(),
            driver_id: snapshot.trip.driver_id.clone(),
            status: existing.map_or(SettlementStatus::Pending, |s| s.status),
            total_revenue: computation.total_revenue,
            total_driver_pay: computation.total_driver_pay,
            total_reimbursements: computation.total_reimbursements,
            total_profit: computation.total_profit,
            breakdown: computation.breakdown,
            warnings,
            payment: None,
            created_at: existing.map_or(now, |s| s.created_at),
            updated_at: now,
        };

        let receivables = computation
            .receivables
            .into_iter()
            .map(|draft| Receivable {
                id: Uuid::new_v4(),
                settlement_id,
                company_id: draft.company_id,
                company_name: draft.company_name,
                amount: draft.amount,
                status: EntryStatus::Open,
            })
            .collect();

        let payable = Payable {
            id: Uuid::new_v4(),
            settlement_id,
            driver_id: computation.payable.driver_id,
            amount: computation.payable.amount,
            status: EntryStatus::Open,
        };

        SettlementRecordSet {
            settlement,
            receivables,
            payable,
        }
    }
}
