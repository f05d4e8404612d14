//! Property-based tests for the settlement calculations.
//!
//! These verify the invariants that must hold for every input the engine
//! accepts, not just the worked examples.

use proptest::prelude::*;
use rust_decimal::Decimal;

use settlement_engine::calculation::{
    GrossPayResult, SettlementDirection, TripMetrics, aggregate_revenue, calculate_gross_pay,
    classify_expenses, generate_ledger, net_settlement,
};
use settlement_engine::models::{Expense, ExpenseCategory, Load, PaidBy, PayMode};

fn cents(value: i64) -> Decimal {
    Decimal::from(value) / Decimal::from(100)
}

fn make_load(index: usize, company: usize, revenue: Decimal, collected: Decimal) -> Load {
    Load {
        id: format!("load_{:03}", index),
        trip_id: "trip_prop".to_string(),
        company_id: Some(format!("co_{}", company)),
        company_name: Some(format!("Company {}", company)),
        total_revenue: revenue,
        amount_collected: collected,
        cuft_loaded: Decimal::ZERO,
    }
}

fn zero_gross() -> GrossPayResult {
    calculate_gross_pay(
        &PayMode::FlatDailyRate {
            flat_daily_rate: Decimal::ZERO,
        },
        &TripMetrics {
            miles: Decimal::ZERO,
            cubic_feet: Decimal::ZERO,
            revenue: Decimal::ZERO,
            days: 1,
        },
    )
}

proptest! {
    /// Property: sum(receivables) + total_collected == total_revenue for
    /// every partition of loads across companies.
    #[test]
    fn reconciliation_holds_for_any_load_partition(
        loads in prop::collection::vec(
            (0usize..4, 0i64..1_000_000, 0i64..1_000_000),
            1..12
        )
    ) {
        let loads: Vec<Load> = loads
            .into_iter()
            .enumerate()
            .map(|(i, (company, revenue, collected))| {
                make_load(i, company, cents(revenue), cents(collected))
            })
            .collect();

        let revenue = aggregate_revenue(&loads);
        let ledger = generate_ledger(
            &revenue,
            &classify_expenses(&[]),
            &zero_gross(),
            "drv_prop",
        );

        let receivable_sum: Decimal = ledger.receivables.iter().map(|r| r.amount).sum();
        prop_assert_eq!(
            receivable_sum + revenue.total_collected,
            revenue.total_revenue
        );
    }

    /// Property: the payable is gross + driver-funded expenses - collected,
    /// and the net direction agrees with its sign.
    #[test]
    fn payable_formula_and_direction_agree(
        gross_rate in 0i64..50_000,
        days in 1i64..30,
        driver_paid in 0i64..200_000,
        collected in 0i64..2_000_000,
    ) {
        let gross = calculate_gross_pay(
            &PayMode::FlatDailyRate { flat_daily_rate: cents(gross_rate) },
            &TripMetrics {
                miles: Decimal::ZERO,
                cubic_feet: Decimal::ZERO,
                revenue: Decimal::ZERO,
                days,
            },
        );
        let expenses = classify_expenses(&[Expense {
            id: "exp_prop".to_string(),
            trip_id: "trip_prop".to_string(),
            category: ExpenseCategory::Fuel,
            amount: cents(driver_paid),
            paid_by: Some(PaidBy::DriverCash),
            receipt_ref: None,
        }]);
        let loads = vec![make_load(0, 0, cents(collected), cents(collected))];
        let revenue = aggregate_revenue(&loads);

        let ledger = generate_ledger(&revenue, &expenses, &gross, "drv_prop");

        // All inputs are whole cents, so no rounding applies here.
        let expected = gross.gross_pay + cents(driver_paid) - cents(collected);
        prop_assert_eq!(ledger.payable.amount, expected);

        let net = net_settlement(ledger.payable.amount);
        match net.direction {
            SettlementDirection::CompanyOwesDriver => {
                prop_assert!(ledger.payable.amount > Decimal::ZERO)
            }
            SettlementDirection::DriverOwesCompany => {
                prop_assert!(ledger.payable.amount < Decimal::ZERO)
            }
            SettlementDirection::Even => {
                prop_assert!(ledger.payable.amount.is_zero())
            }
        }
        prop_assert_eq!(net.net_amount, ledger.payable.amount.abs());
    }

    /// Property: gross pay and all entry amounts carry at most 2 decimal
    /// places regardless of rate precision.
    #[test]
    fn monetary_outputs_have_cent_scale(
        miles in 0i64..10_000,
        rate_micros in 0i64..10_000_000,
    ) {
        // Rates with up to 6 decimal places
        let rate = Decimal::from(rate_micros) / Decimal::from(1_000_000);
        let gross = calculate_gross_pay(
            &PayMode::PerMile { rate_per_mile: rate },
            &TripMetrics {
                miles: Decimal::from(miles),
                cubic_feet: Decimal::ZERO,
                revenue: Decimal::ZERO,
                days: 1,
            },
        );

        prop_assert!(gross.gross_pay.scale() <= 2);
        for component in &gross.breakdown.components {
            prop_assert!(component.amount.scale() <= 2);
        }
    }

    /// Property: per-mile pay reads only miles; volume and revenue inputs
    /// never leak into it.
    #[test]
    fn per_mile_is_invariant_to_other_metrics(
        miles in 0i64..10_000,
        rate in 0i64..10_000,
        cubic_feet in 0i64..50_000,
        revenue in 0i64..10_000_000,
        days in 1i64..60,
    ) {
        let mode = PayMode::PerMile { rate_per_mile: cents(rate) };
        let base = calculate_gross_pay(&mode, &TripMetrics {
            miles: Decimal::from(miles),
            cubic_feet: Decimal::ZERO,
            revenue: Decimal::ZERO,
            days: 1,
        });
        let noisy = calculate_gross_pay(&mode, &TripMetrics {
            miles: Decimal::from(miles),
            cubic_feet: Decimal::from(cubic_feet),
            revenue: cents(revenue),
            days,
        });

        prop_assert_eq!(base.gross_pay, noisy.gross_pay);
    }

    /// Property: the whole calculation pipeline is deterministic.
    #[test]
    fn computation_is_deterministic(
        loads in prop::collection::vec(
            (0usize..3, 0i64..500_000, 0i64..500_000),
            1..6
        ),
        rate in 0i64..10_000,
        miles in 0i64..10_000,
    ) {
        let loads: Vec<Load> = loads
            .into_iter()
            .enumerate()
            .map(|(i, (company, revenue, collected))| {
                make_load(i, company, cents(revenue), cents(collected))
            })
            .collect();
        let mode = PayMode::PerMile { rate_per_mile: cents(rate) };
        let metrics = TripMetrics {
            miles: Decimal::from(miles),
            cubic_feet: Decimal::ZERO,
            revenue: Decimal::ZERO,
            days: 1,
        };

        let run = || {
            let revenue = aggregate_revenue(&loads);
            let gross = calculate_gross_pay(&mode, &metrics);
            generate_ledger(&revenue, &classify_expenses(&[]), &gross, "drv_prop")
        };

        prop_assert_eq!(run(), run());
    }
}
