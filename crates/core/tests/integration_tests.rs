use chrono::NaiveDate;
use proptest::prelude::*;

use finance_analytics_core::errors::CoreError;
use finance_analytics_core::models::holding::Holding;
use finance_analytics_core::models::pattern::{Frequency, Severity};
use finance_analytics_core::models::runway::RunwayState;
use finance_analytics_core::models::settings::EngineConfig;
use finance_analytics_core::models::simulation::SimulationParameters;
use finance_analytics_core::models::trade::TradeOutcome;
use finance_analytics_core::models::transaction::Transaction;
use finance_analytics_core::models::trend::TrendDirection;
use finance_analytics_core::FinanceEngine;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// A small household ledger spanning February and March 2024.
fn ledger() -> Vec<Transaction> {
    let mut txns = Vec::new();
    for month in 1..=3 {
        txns.push(Transaction::debit(d(2024, month, 5), 499.0, "Entertainment", "Netflix"));
        txns.push(Transaction::debit(d(2024, month, 1), 25_000.0, "Rent", "Landlord"));
        txns.push(Transaction::credit(d(2024, month, 1), 120_000.0, "Salary", "Employer"));
    }
    for (day, amount) in [(3, 2_100.0), (10, 1_900.0), (17, 2_000.0), (24, 2_050.0)] {
        txns.push(Transaction::debit(d(2024, 2, day), amount, "Groceries", "FreshMart"));
    }
    for (day, amount) in [(2, 2_000.0), (9, 1_950.0), (16, 2_080.0), (23, 18_000.0)] {
        txns.push(Transaction::debit(d(2024, 3, day), amount, "Groceries", "FreshMart"));
    }
    txns.push(Transaction::debit(d(2024, 3, 20), 50_000.0, "Transfer", "Savings").excluded(true));
    txns
}

// ═══════════════════════════════════════════════════════════════════
// FinanceEngine facade
// ═══════════════════════════════════════════════════════════════════

mod engine {
    use super::*;

    #[test]
    fn default_engine_uses_default_config() {
        let engine = FinanceEngine::new();
        assert_eq!(engine.config(), &EngineConfig::default());
        assert!(format!("{engine:?}").contains("FinanceEngine"));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.tax.tax_rate = -0.1;
        let err = FinanceEngine::with_config(config).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn json_config_changes_behavior() {
        let engine = FinanceEngine::from_json_config(r#"{"tax":{"tax_rate":0.3}}"#).unwrap();
        let opps = engine.find_harvest_opportunities(&[Holding::new("Fund", 1_000.0, 900.0)]);
        assert!((opps[0].potential_tax_saving - 30.0).abs() < 1e-9);
    }

    #[test]
    fn parameters_use_configured_return_model() {
        let mut config = EngineConfig::default();
        config.simulation.default_mean_return = 0.08;
        config.simulation.default_volatility = 0.1;
        let engine = FinanceEngine::with_config(config).unwrap();
        let params = engine.parameters(1.0, 2.0, 3.0, 4.0);
        assert_eq!(params.mean_return, 0.08);
        assert_eq!(params.volatility, 0.1);
    }

    #[test]
    fn seeded_simulation_is_reproducible() {
        let engine = FinanceEngine::new();
        let params = engine.parameters(500_000.0, 20_000.0, 15.0, 10_000_000.0);
        assert_eq!(engine.simulate_seeded(&params, 42), engine.simulate_seeded(&params, 42));
    }

    #[test]
    fn entropy_simulation_runs() {
        let engine = FinanceEngine::new();
        let params = engine.parameters(100_000.0, 5_000.0, 5.0, 200_000.0);
        let result = engine.simulate(&params).unwrap();
        assert_eq!(result.trials, 1000);
        let p = result.percentiles;
        assert!(p.p10 <= p.p50 && p.p50 <= p.p90);
    }

    #[test]
    fn configured_trial_count_is_used() {
        let engine = FinanceEngine::from_json_config(r#"{"simulation":{"trials":37}}"#).unwrap();
        let params = engine.parameters(1.0, 1.0, 1.0, 1.0);
        assert_eq!(engine.simulate_seeded(&params, 1).trials, 37);
    }

    #[test]
    fn ledger_recurring_payments() {
        let patterns = FinanceEngine::new().detect_recurring(&ledger());
        let netflix = patterns.iter().find(|p| p.merchant == "Netflix").unwrap();
        assert_eq!(netflix.frequency, Frequency::Monthly);
        assert_eq!(netflix.count, 3);
        let rent = patterns.iter().find(|p| p.merchant == "Landlord").unwrap();
        assert_eq!(rent.amount, 25_000.0);
        // grocery amounts swing too much to be a subscription
        assert!(patterns.iter().all(|p| p.merchant != "FreshMart"));
    }

    #[test]
    fn ledger_grocery_spike_is_an_anomaly() {
        let anomalies = FinanceEngine::new().detect_anomalies(&ledger());
        assert!(!anomalies.is_empty());
        assert_eq!(anomalies[0].transaction.amount, 18_000.0);
        assert_eq!(anomalies[0].severity, Severity::High);
    }

    #[test]
    fn ledger_month_over_month() {
        let trends = FinanceEngine::new().month_over_month(&ledger(), d(2024, 3, 31));
        let groceries = trends.iter().find(|t| t.category == "Groceries").unwrap();
        assert_eq!(groceries.previous_amount, 8_050.0);
        assert_eq!(groceries.current_amount, 24_030.0);
        assert_eq!(groceries.trend, TrendDirection::Up);
        let rent = trends.iter().find(|t| t.category == "Rent").unwrap();
        assert_eq!(rent.trend, TrendDirection::Stable);
        assert!(trends.iter().all(|t| t.category != "Salary" && t.category != "Transfer"));
    }

    #[test]
    fn month_over_month_today_runs() {
        // Only dated far in the past, so nothing lands in this or last month.
        let txns = vec![Transaction::debit(d(2001, 1, 1), 10.0, "Old", "Shop")];
        assert!(FinanceEngine::new().month_over_month_today(&txns).is_empty());
    }

    #[test]
    fn ledger_runway() {
        let engine = FinanceEngine::new();
        let burn = engine.monthly_burn(&ledger(), d(2024, 3, 31));
        assert!(burn > 0.0);
        let summary = engine.runway(burn * 24.0, burn);
        assert_eq!(summary.state, RunwayState::Secure);
    }

    #[test]
    fn streaks_through_facade() {
        let trades = vec![
            TradeOutcome::new(d(2024, 1, 1), 10.0),
            TradeOutcome::new(d(2024, 1, 2), 20.0),
            TradeOutcome::new(d(2024, 1, 3), 30.0),
        ];
        let s = FinanceEngine::new().compute_streaks(&trades);
        assert_eq!((s.current_win_streak, s.current_lose_streak), (3, 0));
    }

    #[test]
    fn goal_helpers() {
        let engine = FinanceEngine::new();
        assert_eq!(engine.goal_progress(25.0, 100.0), 25.0);
        assert_eq!(engine.years_to_target(0.0, 24_000.0, 1_000.0, 0.0), Some(2.0));
    }

    #[test]
    fn fiscal_year_through_facade() {
        let fy = FinanceEngine::new().fiscal_year(d(2024, 5, 15), 0).unwrap();
        assert_eq!(fy.label, "FY 24-25");
    }

    #[test]
    fn harvest_total() {
        let engine = FinanceEngine::new();
        let opps = engine.find_harvest_opportunities(&[
            Holding::new("A", 10_000.0, 0.0),
            Holding::new("B", 10_000.0, 12_000.0),
        ]);
        assert!((engine.total_potential_saving(&opps) - 2_000.0).abs() < 1e-9);
    }

    #[test]
    fn results_serialize_to_json() {
        let engine = FinanceEngine::new();
        let params = engine.parameters(1_000.0, 100.0, 1.0, 2_000.0);
        let json = serde_json::to_string(&engine.simulate_seeded(&params, 3)).unwrap();
        assert!(json.contains("success_probability"));
        let json = serde_json::to_string(&engine.detect_recurring(&ledger())).unwrap();
        assert!(json.contains("\"monthly\""));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════

fn small_engine() -> FinanceEngine {
    FinanceEngine::from_json_config(r#"{"simulation":{"trials":64}}"#).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn percentiles_always_ordered(
        principal in 0.0f64..1e7,
        contribution in 0.0f64..1e5,
        years in 0.0f64..30.0,
        mean in -0.2f64..0.4,
        volatility in 0.0f64..0.6,
        seed in any::<u64>(),
    ) {
        let engine = small_engine();
        let params = SimulationParameters::new(principal, contribution, years, 1e6)
            .with_returns(mean, volatility);
        let r = engine.simulate_seeded(&params, seed);
        prop_assert!(r.percentiles.p10 <= r.percentiles.p50);
        prop_assert!(r.percentiles.p50 <= r.percentiles.p90);
        prop_assert!(r.percentiles.p10 >= 0.0);
        prop_assert!(r.percentiles.p90.is_finite());
        prop_assert!((0.0..=100.0).contains(&r.success_probability));
    }

    #[test]
    fn success_non_increasing_in_target(
        low in 0.0f64..5e6,
        extra in 0.0f64..5e6,
        seed in any::<u64>(),
    ) {
        let engine = small_engine();
        let base = SimulationParameters::new(100_000.0, 10_000.0, 10.0, low);
        let higher = SimulationParameters { target_wealth: low + extra, ..base.clone() };
        let a = engine.simulate_seeded(&base, seed).success_probability;
        let b = engine.simulate_seeded(&higher, seed).success_probability;
        prop_assert!(b <= a);
    }

    #[test]
    fn no_growth_projection_is_principal(principal in 0.0f64..1e9, years in 0.1f64..50.0) {
        let engine = small_engine();
        let params = SimulationParameters::new(principal, 0.0, years, principal + 1.0)
            .with_returns(0.0, 0.0);
        let r = engine.simulate_seeded(&params, 0);
        prop_assert_eq!(r.percentiles.p10, principal);
        prop_assert_eq!(r.percentiles.p50, principal);
        prop_assert_eq!(r.percentiles.p90, principal);
    }

    #[test]
    fn harvest_never_returns_gains(
        positions in prop::collection::vec((0.0f64..1e6, 0.0f64..1e6), 0..30),
    ) {
        let holdings: Vec<Holding> = positions
            .iter()
            .enumerate()
            .map(|(i, (invested, value))| Holding::new(format!("H{i}"), *invested, *value))
            .collect();
        let opps = FinanceEngine::new().find_harvest_opportunities(&holdings);
        for opp in &opps {
            let h = holdings.iter().find(|h| h.id == opp.holding_id).unwrap();
            prop_assert!(h.current_value < h.invested_amount);
            prop_assert!(opp.unrealized_loss > 0.0);
        }
        prop_assert!(opps
            .windows(2)
            .all(|w| w[0].potential_tax_saving >= w[1].potential_tax_saving));
    }

    #[test]
    fn streak_counters_are_exclusive(pnls in prop::collection::vec(-100i32..100, 0..40)) {
        let trades: Vec<TradeOutcome> = pnls
            .iter()
            .enumerate()
            .map(|(i, p)| TradeOutcome::new(d(2020, 1, 1) + chrono::Duration::days(i as i64), *p as f64))
            .collect();
        let s = FinanceEngine::new().compute_streaks(&trades);
        prop_assert!(s.current_win_streak == 0 || s.current_lose_streak == 0);
        prop_assert!(s.current_win_streak <= s.longest_win_streak);
        prop_assert!(s.current_lose_streak <= s.longest_lose_streak);
    }
}
