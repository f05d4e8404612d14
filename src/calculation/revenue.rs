//! Revenue aggregation.
//!
//! Sums load revenue, collect-on-delivery, and cubic feet across a trip,
//! grouped by company. Loads without a company are grouped under a single
//! unknown-company bucket rather than dropped: every load is accounted for
//! exactly once.

use rust_decimal::Decimal;

use crate::models::Load;

/// Display name used for the bucket of loads with no company.
pub const UNKNOWN_COMPANY_NAME: &str = "Unknown company";

/// Revenue figures for one company's loads on a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRevenue {
    /// The company, `None` for the unknown bucket.
    pub company_id: Option<String>,
    /// Display name of the company.
    pub company_name: String,
    /// IDs of the loads that contributed to this bucket.
    pub load_ids: Vec<String>,
    /// Revenue across this company's loads.
    pub total_revenue: Decimal,
    /// COD collected across this company's loads.
    pub total_collected: Decimal,
    /// What the company still owes: revenue minus collected.
    ///
    /// Negative when collections exceeded invoiced revenue.
    pub total_receivable: Decimal,
}

/// Grand totals and per-company breakdown for a trip's loads.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueSummary {
    /// Revenue across all loads.
    pub total_revenue: Decimal,
    /// COD collected across all loads.
    pub total_collected: Decimal,
    /// Cubic feet across all loads.
    pub total_cuft: Decimal,
    /// One bucket per distinct company, in first-seen order; the unknown
    /// bucket, if any, holds every load without a company.
    pub companies: Vec<CompanyRevenue>,
}

/// Aggregates a trip's loads into grand totals and per-company buckets.
pub fn aggregate_revenue(loads: &[Load]) -> RevenueSummary {
    let mut companies: Vec<CompanyRevenue> = Vec::new();
    let mut total_revenue = Decimal::ZERO;
    let mut total_collected = Decimal::ZERO;
    let mut total_cuft = Decimal::ZERO;

    for load in loads {
        total_revenue += load.total_revenue;
        total_collected += load.amount_collected;
        total_cuft += load.cuft_loaded;

        let index = match companies
            .iter()
            .position(|c| c.company_id == load.company_id)
        {
            Some(index) => index,
            None => {
                let company_name = match (&load.company_id, &load.company_name) {
                    (Some(_), Some(name)) => name.clone(),
                    (Some(id), None) => id.clone(),
                    (None, _) => UNKNOWN_COMPANY_NAME.to_string(),
                };
                companies.push(CompanyRevenue {
                    company_id: load.company_id.clone(),
                    company_name,
                    load_ids: Vec::new(),
                    total_revenue: Decimal::ZERO,
                    total_collected: Decimal::ZERO,
                    total_receivable: Decimal::ZERO,
                });
                companies.len() - 1
            }
        };

        let bucket = &mut companies[index];
        bucket.load_ids.push(load.id.clone());
        bucket.total_revenue += load.total_revenue;
        bucket.total_collected += load.amount_collected;
        bucket.total_receivable = bucket.total_revenue - bucket.total_collected;
    }

    RevenueSummary {
        total_revenue,
        total_collected,
        total_cuft,
        companies,
    }
}
