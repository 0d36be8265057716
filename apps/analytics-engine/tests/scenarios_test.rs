//! End-to-end tests over the full analysis pipeline.
//!
//! Exercises the literal accounting scenarios the engine is specified
//! against, plus cross-component properties over generated histories.

use analytics_engine::behavior::StreakKind;
use analytics_engine::config::AnalyticsConfig;
use analytics_engine::metrics::MetricValue;
use analytics_engine::report::analyze;
use analytics_engine::trade::{MarketType, PricePoint, Trade, TradeDirection};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ts(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap() + Duration::minutes(minute)
}

fn trade(entry_min: i64, exit_min: i64, quantity: Decimal, exit_price: Decimal) -> Trade {
    Trade {
        symbol: "AAPL".to_string(),
        direction: TradeDirection::Buy,
        entry_price: dec!(100),
        exit_price: Some(exit_price),
        quantity,
        entry_time: ts(entry_min),
        exit_time: Some(ts(exit_min)),
        market: MarketType::Stocks,
        commission: Decimal::ZERO,
        intended_entry: None,
        intended_exit: None,
        stop_loss: None,
        take_profit: None,
        partial_exits: Vec::new(),
        price_path: Vec::new(),
    }
}

/// 10 closed BUY trades, 6 wins of +$100 and 4 losses of -$50.
#[test]
fn test_scenario_a_headline_metrics() {
    let mut trades = Vec::new();
    for i in 0..6i64 {
        // qty 10 at entry 100, exit 110: +$100
        trades.push(trade(i * 60, i * 60 + 30, dec!(10), dec!(110)));
    }
    for i in 6..10i64 {
        // qty 10 at entry 100, exit 95: -$50
        trades.push(trade(i * 60, i * 60 + 30, dec!(10), dec!(95)));
    }

    let config = AnalyticsConfig::default();
    let report = analyze(&trades, &config);
    let m = &report.metrics;

    assert_eq!(m.closed_trades, 10);
    assert_eq!(m.winning_trades, 6);
    assert_eq!(m.losing_trades, 4);
    assert_eq!(m.win_rate_pct, dec!(60));
    assert_eq!(m.gross_profit, dec!(600));
    assert_eq!(m.gross_loss, dec!(200));
    assert_eq!(m.profit_factor, MetricValue::Finite(dec!(3)));
    assert_eq!(m.expectancy, dec!(40));
    assert_eq!(m.total_net_pnl, dec!(400));
}

/// Breakeven trade that only went against the position: MAE 2%, MFE 0%.
#[test]
fn test_scenario_b_undefined_edge_ratio() {
    let mut breakeven = trade(0, 60, dec!(10), dec!(100));
    breakeven.price_path = vec![
        PricePoint {
            time: ts(0),
            price: dec!(100),
        },
        PricePoint {
            time: ts(30),
            price: dec!(98),
        },
        PricePoint {
            time: ts(60),
            price: dec!(100),
        },
    ];

    let config = AnalyticsConfig::default();
    let report = analyze(&[breakeven], &config);

    assert_eq!(report.excursions.records.len(), 1);
    let record = &report.excursions.records[0];
    assert_eq!(record.mae_pct, dec!(2));
    assert_eq!(record.mfe_pct, dec!(0));
    assert_eq!(record.edge_ratio, MetricValue::Undefined);
    assert!(record.exit_efficiency_pct.is_none());
}

/// Equity 10000 -> 10500 -> 9800 -> 11000: max drawdown 700/10500.
#[test]
fn test_scenario_c_max_drawdown() {
    let trades = vec![
        trade(0, 30, dec!(10), dec!(150)),  // +500
        trade(60, 90, dec!(10), dec!(30)),  // -700
        trade(120, 150, dec!(10), dec!(220)), // +1200
    ];

    let config = AnalyticsConfig::default();
    let report = analyze(&trades, &config);
    let m = &report.metrics;

    assert_eq!(m.max_drawdown_amount, dec!(700));
    assert!(m.max_drawdown_pct > dec!(6.66));
    assert!(m.max_drawdown_pct < dec!(6.67));
    assert_eq!(m.total_net_pnl, dec!(1000));
}

/// A losing run with a doubled position and sub-minute re-entry flags a
/// revenge incident carrying both indicators.
#[test]
fn test_scenario_d_revenge_incident() {
    let trades = vec![
        trade(0, 20, dec!(100), dec!(101)),     // +100
        trade(30, 50, dec!(100), dec!(101.2)),  // +120
        trade(60, 80, dec!(100), dec!(100.9)),  // +90
        trade(90, 110, dec!(100), dec!(97)),    // -300, the trigger
        trade(110, 115, dec!(100), dec!(99)),   // re-entry at the exit minute
        trade(118, 124, dec!(100), dec!(98.5)), // -150
        trade(126, 133, dec!(200), dec!(99)),   // doubled size, -200
        trade(140, 150, dec!(100), dec!(99.2)), // -80
        trade(155, 165, dec!(100), dec!(99.4)), // -60
    ];

    let config = AnalyticsConfig::default();
    let report = analyze(&trades, &config);
    let incidents = &report.behavior.revenge_incidents;

    assert!(!incidents.is_empty());
    let incident = &incidents[0];
    assert_eq!(incident.trigger_loss, dec!(-300));
    assert!(incident.indicators.position_size_increase);
    assert!(incident.indicators.reduced_time_between_trades);
    assert!(report.behavior.revenge_score < dec!(100));
}

#[test]
fn test_open_and_malformed_trades_excluded_everywhere() {
    let mut open = trade(0, 30, dec!(10), dec!(110));
    open.exit_price = None;
    open.exit_time = None;

    let mut malformed = trade(60, 90, dec!(10), dec!(110));
    malformed.entry_price = dec!(-5);

    let closed = trade(120, 150, dec!(10), dec!(110));

    let config = AnalyticsConfig::default();
    let report = analyze(&[open, malformed, closed], &config);

    assert_eq!(report.metrics.closed_trades, 1);
    assert_eq!(report.excursions.records.len(), 1);
    assert_eq!(report.behavior.streaks.longest_win_streak, 1);
}

#[test]
fn test_empty_history_yields_neutral_report() {
    let config = AnalyticsConfig::default();
    let report = analyze(&[], &config);

    assert_eq!(report.metrics.closed_trades, 0);
    assert_eq!(report.metrics.profit_factor, MetricValue::Undefined);
    assert!(report.excursions.records.is_empty());
    assert!(report.behavior.revenge_incidents.is_empty());
    assert_eq!(report.behavior.revenge_score, dec!(100));
}

fn history_from_cents(exits_cents: &[i64]) -> Vec<Trade> {
    exits_cents
        .iter()
        .enumerate()
        .map(|(i, cents)| {
            let i = i as i64;
            trade(i * 30, i * 30 + 20, dec!(10), Decimal::new(*cents, 2))
        })
        .collect()
}

proptest! {
    /// Headline counters stay consistent for any history.
    #[test]
    fn prop_win_rate_and_counts(exits in prop::collection::vec(5000i64..15000, 1..40)) {
        let trades = history_from_cents(&exits);
        let config = AnalyticsConfig::default();
        let report = analyze(&trades, &config);
        let m = &report.metrics;

        prop_assert!(m.win_rate_pct >= Decimal::ZERO);
        prop_assert!(m.win_rate_pct <= dec!(100));
        prop_assert!(m.winning_trades + m.losing_trades <= m.closed_trades);
        prop_assert_eq!(m.closed_trades as usize, exits.len());
    }

    /// Profit factor sentinels follow the gross profit/loss split exactly.
    #[test]
    fn prop_profit_factor_policy(exits in prop::collection::vec(5000i64..15000, 1..40)) {
        let trades = history_from_cents(&exits);
        let config = AnalyticsConfig::default();
        let m = analyze(&trades, &config).metrics;

        match m.profit_factor {
            MetricValue::Infinite => {
                prop_assert_eq!(m.gross_loss, Decimal::ZERO);
                prop_assert!(m.gross_profit > Decimal::ZERO);
            }
            MetricValue::Finite(pf) => {
                if m.gross_profit == Decimal::ZERO {
                    prop_assert_eq!(pf, Decimal::ZERO);
                } else {
                    prop_assert!(m.gross_loss > Decimal::ZERO);
                }
            }
            MetricValue::Undefined => prop_assert_eq!(m.closed_trades, 0),
        }
    }

    /// Max drawdown dominates every per-point drawdown on the curve.
    #[test]
    fn prop_max_drawdown_dominates(exits in prop::collection::vec(5000i64..15000, 2..40)) {
        let trades = history_from_cents(&exits);
        let config = AnalyticsConfig::default();
        let m = analyze(&trades, &config).metrics;

        let mut peak = config.starting_balance;
        for point in &m.equity_curve {
            peak = peak.max(point.equity);
            let dd = (peak - point.equity) / peak * dec!(100);
            prop_assert!(m.max_drawdown_pct >= dd);
        }
    }

    /// Excursion outputs respect the sentinel and range rules.
    #[test]
    fn prop_excursion_ranges(exits in prop::collection::vec(5000i64..15000, 1..30)) {
        let trades = history_from_cents(&exits);
        let config = AnalyticsConfig::default();
        let report = analyze(&trades, &config);

        for record in &report.excursions.records {
            prop_assert!(record.mae_pct >= Decimal::ZERO);
            prop_assert!(record.mfe_pct >= Decimal::ZERO);
            if record.mfe_pct == Decimal::ZERO {
                prop_assert_eq!(record.edge_ratio, MetricValue::Undefined);
            }
            if let Some(eff) = record.exit_efficiency_pct {
                prop_assert!(eff >= Decimal::ZERO);
                prop_assert!(eff <= dec!(100));
            }
        }
    }

    /// Streak counters stay consistent with the closed-trade count, and
    /// composite scores stay clamped.
    #[test]
    fn prop_streaks_and_scores(exits in prop::collection::vec(5000i64..15000, 1..40)) {
        let trades = history_from_cents(&exits);
        let config = AnalyticsConfig::default();
        let report = analyze(&trades, &config);
        let streaks = &report.behavior.streaks;
        let closed = report.metrics.closed_trades;

        prop_assert!(streaks.longest_win_streak <= closed);
        prop_assert!(streaks.longest_loss_streak <= closed);
        if streaks.current.kind == StreakKind::Win {
            prop_assert!(streaks.longest_win_streak >= streaks.current.count);
        }

        let volt = report.behavior.volt_score.value;
        prop_assert!(volt >= Decimal::ZERO && volt <= dec!(100));
        let exec = report.execution.score;
        prop_assert!(exec >= Decimal::ZERO && exec <= dec!(100));
    }
}
