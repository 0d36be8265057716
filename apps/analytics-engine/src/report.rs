//! Report assembly and export.
//!
//! Bundles the four analyzer outputs into one [`AnalyticsReport`], grades
//! headline metrics into dashboard cards, and renders the report as text,
//! CSV or JSON.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::behavior::{BehavioralAnalyzer, BehavioralSnapshot};
use crate::config::{AnalyticsConfig, BenchmarkThresholds};
use crate::excursion::{ExcursionAnalyzer, ExcursionSummary};
use crate::execution::{ExecutionAnalyzer, ExecutionReport};
use crate::metrics::{
    MetricStatus, MetricValue, MetricsCalculator, MetricsReport, format_currency, format_optional,
    format_pct, format_ratio, grade_higher, grade_lower, grade_ratio,
};
use crate::pnl::{gross_pnl, net_pnl};
use crate::trade::{Trade, closed_valid};

/// Display format for a dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricFormat {
    /// Currency amount.
    Currency,
    /// Percentage (value already in % units).
    Percentage,
    /// Dimensionless ratio.
    Ratio,
    /// Integer count.
    Count,
}

/// Direction of change against a previous-period report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    /// Improved since the previous period.
    Up,
    /// Declined since the previous period.
    Down,
    /// Unchanged.
    Flat,
}

/// One graded dashboard card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Card title.
    pub name: String,
    /// Metric value.
    pub value: MetricValue,
    /// Grading against the benchmark cutoffs.
    pub status: MetricStatus,
    /// Display format.
    pub format: MetricFormat,
    /// Good cutoff shown alongside the value, when graded.
    pub benchmark: Option<Decimal>,
    /// Change direction versus the previous period, when supplied.
    pub trend: Option<TrendDirection>,
}

/// Combined output of all analyzers over one trade collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalyticsReport {
    /// Performance and risk metrics.
    pub metrics: MetricsReport,
    /// Per-trade excursion statistics.
    pub excursions: ExcursionSummary,
    /// Behavioral patterns and Volt Score.
    pub behavior: BehavioralSnapshot,
    /// Execution quality.
    pub execution: ExecutionReport,
}

/// Run every analyzer over a trade collection.
#[must_use]
pub fn analyze(trades: &[Trade], config: &AnalyticsConfig) -> AnalyticsReport {
    debug!(trades = trades.len(), "running full analysis");

    AnalyticsReport {
        metrics: MetricsCalculator::new(config).calculate(trades),
        excursions: ExcursionAnalyzer::new(config).analyze(trades),
        behavior: BehavioralAnalyzer::new(config).analyze(trades),
        execution: ExecutionAnalyzer::new(config).analyze(trades),
    }
}

fn trend_of(current: Decimal, previous: Decimal, higher_is_better: bool) -> TrendDirection {
    match (current > previous, current < previous) {
        (true, _) if higher_is_better => TrendDirection::Up,
        (true, _) => TrendDirection::Down,
        (_, true) if higher_is_better => TrendDirection::Down,
        (_, true) => TrendDirection::Up,
        _ => TrendDirection::Flat,
    }
}

fn ratio_trend(current: MetricValue, previous: MetricValue) -> TrendDirection {
    match (current, previous) {
        (MetricValue::Finite(c), MetricValue::Finite(p)) => trend_of(c, p, true),
        (MetricValue::Infinite, MetricValue::Infinite)
        | (MetricValue::Undefined, MetricValue::Undefined) => TrendDirection::Flat,
        (MetricValue::Infinite, _) | (_, MetricValue::Undefined) => TrendDirection::Up,
        (MetricValue::Undefined, _) | (_, MetricValue::Infinite) => TrendDirection::Down,
    }
}

/// Build the graded dashboard cards for a metrics report.
///
/// Trends are attached only when a previous-period report is supplied.
#[must_use]
pub fn dashboard_cards(
    metrics: &MetricsReport,
    benchmarks: &BenchmarkThresholds,
    previous: Option<&MetricsReport>,
) -> Vec<MetricResult> {
    vec![
        MetricResult {
            name: "Win Rate".to_string(),
            value: MetricValue::Finite(metrics.win_rate_pct),
            status: grade_higher(metrics.win_rate_pct, benchmarks.win_rate_pct),
            format: MetricFormat::Percentage,
            benchmark: Some(benchmarks.win_rate_pct.0),
            trend: previous.map(|p| trend_of(metrics.win_rate_pct, p.win_rate_pct, true)),
        },
        MetricResult {
            name: "Profit Factor".to_string(),
            value: metrics.profit_factor,
            status: grade_ratio(metrics.profit_factor, benchmarks.profit_factor),
            format: MetricFormat::Ratio,
            benchmark: Some(benchmarks.profit_factor.0),
            trend: previous.map(|p| ratio_trend(metrics.profit_factor, p.profit_factor)),
        },
        MetricResult {
            name: "Expectancy".to_string(),
            value: MetricValue::Finite(metrics.expectancy),
            status: grade_higher(metrics.expectancy, benchmarks.expectancy),
            format: MetricFormat::Currency,
            benchmark: Some(benchmarks.expectancy.0),
            trend: previous.map(|p| trend_of(metrics.expectancy, p.expectancy, true)),
        },
        MetricResult {
            name: "Max Drawdown".to_string(),
            value: MetricValue::Finite(metrics.max_drawdown_pct),
            status: grade_lower(metrics.max_drawdown_pct, benchmarks.max_drawdown_pct),
            format: MetricFormat::Percentage,
            benchmark: Some(benchmarks.max_drawdown_pct.0),
            trend: previous.map(|p| trend_of(metrics.max_drawdown_pct, p.max_drawdown_pct, false)),
        },
        MetricResult {
            name: "Sharpe Ratio".to_string(),
            value: metrics
                .sharpe_ratio
                .map_or(MetricValue::Undefined, MetricValue::Finite),
            status: metrics.sharpe_ratio.map_or(MetricStatus::Neutral, |v| {
                grade_higher(v, benchmarks.sharpe_ratio)
            }),
            format: MetricFormat::Ratio,
            benchmark: Some(benchmarks.sharpe_ratio.0),
            trend: previous.and_then(|p| {
                metrics
                    .sharpe_ratio
                    .zip(p.sharpe_ratio)
                    .map(|(c, prev)| trend_of(c, prev, true))
            }),
        },
        MetricResult {
            name: "Consistency".to_string(),
            value: MetricValue::Finite(metrics.consistency_score),
            status: grade_higher(metrics.consistency_score, benchmarks.consistency),
            format: MetricFormat::Ratio,
            benchmark: Some(benchmarks.consistency.0),
            trend: previous.map(|p| trend_of(metrics.consistency_score, p.consistency_score, true)),
        },
        MetricResult {
            name: "Total Net P&L".to_string(),
            value: MetricValue::Finite(metrics.total_net_pnl),
            status: MetricStatus::Neutral,
            format: MetricFormat::Currency,
            benchmark: None,
            trend: previous.map(|p| trend_of(metrics.total_net_pnl, p.total_net_pnl, true)),
        },
        MetricResult {
            name: "Closed Trades".to_string(),
            value: MetricValue::Finite(Decimal::from(metrics.closed_trades)),
            status: MetricStatus::Neutral,
            format: MetricFormat::Count,
            benchmark: None,
            trend: None,
        },
    ]
}

/// Render the full report as plain text.
#[must_use]
pub fn render_text(report: &AnalyticsReport) -> String {
    let m = &report.metrics;
    let mut out = String::new();

    let _ = writeln!(out, "=== Performance ===");
    let _ = writeln!(
        out,
        "Trades: {} ({} wins / {} losses)",
        m.closed_trades, m.winning_trades, m.losing_trades
    );
    let _ = writeln!(out, "Win rate: {}", format_pct(m.win_rate_pct));
    let _ = writeln!(out, "Net P&L: {}", format_currency(m.total_net_pnl));
    let _ = writeln!(out, "Profit factor: {}", format_ratio(m.profit_factor));
    let _ = writeln!(out, "Expectancy: {}", format_currency(m.expectancy));
    let _ = writeln!(
        out,
        "Avg win / avg loss: {} / {}",
        format_currency(m.avg_win),
        format_currency(m.avg_loss)
    );
    let _ = writeln!(out, "Max drawdown: {}", format_pct(m.max_drawdown_pct));
    let _ = writeln!(out, "Sharpe: {}", format_optional(m.sharpe_ratio));
    let _ = writeln!(out, "Sortino: {}", format_optional(m.sortino_ratio));
    let _ = writeln!(out, "Kelly: {}", format_pct(m.kelly_pct));
    let _ = writeln!(out, "Risk of ruin: {}", format_pct(m.risk_of_ruin_pct));

    let e = &report.excursions;
    let _ = writeln!(out, "=== Excursions ===");
    let _ = writeln!(
        out,
        "Avg MAE / MFE: {} / {}",
        format_pct(e.avg_mae_pct),
        format_pct(e.avg_mfe_pct)
    );
    let _ = writeln!(out, "Avg edge ratio: {}", format_optional(e.avg_edge_ratio));
    let _ = writeln!(
        out,
        "Avg exit efficiency: {}",
        e.avg_exit_efficiency_pct
            .map_or_else(|| "N/A".to_string(), format_pct)
    );

    let b = &report.behavior;
    let _ = writeln!(out, "=== Behavior ===");
    let _ = writeln!(
        out,
        "Streaks: longest win {} / longest loss {}",
        b.streaks.longest_win_streak, b.streaks.longest_loss_streak
    );
    let _ = writeln!(out, "Revenge incidents: {}", b.revenge_incidents.len());
    let _ = writeln!(out, "Discipline score: {}", format_pct(b.revenge_score));
    let _ = writeln!(
        out,
        "Volt Score: {:.1} ({})",
        b.volt_score.value, b.volt_score.label
    );

    let x = &report.execution;
    let _ = writeln!(out, "=== Execution ===");
    let _ = writeln!(
        out,
        "Slippage cost: {}",
        format_currency(x.slippage.total_cost)
    );
    let _ = writeln!(
        out,
        "Stop hit rate: {}",
        x.hit_rates
            .stop_hit_rate_pct
            .map_or_else(|| "N/A".to_string(), format_pct)
    );
    let _ = writeln!(
        out,
        "Target hit rate: {}",
        x.hit_rates
            .target_hit_rate_pct
            .map_or_else(|| "N/A".to_string(), format_pct)
    );
    let _ = writeln!(
        out,
        "Commission: {}",
        format_currency(x.commissions.total_commission)
    );
    let _ = writeln!(out, "Execution score: {:.1} ({})", x.score, x.label);

    out
}

/// Export closed, well-formed trades to CSV.
#[must_use]
pub fn trades_to_csv(trades: &[Trade], config: &AnalyticsConfig) -> String {
    let mut csv = String::from(
        "symbol,direction,market,entry_time,entry_price,exit_time,exit_price,quantity,gross_pnl,commission,net_pnl,holding_period_hours\n",
    );

    for trade in closed_valid(trades) {
        let (Some(exit_time), Some(exit_price)) = (trade.exit_time, trade.exit_price) else {
            continue;
        };
        let gross = gross_pnl(trade, &config.contracts).unwrap_or_default();
        let net = net_pnl(trade, &config.contracts).unwrap_or_default();
        let held = trade.holding_period_hours().unwrap_or_default();

        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            trade.symbol,
            trade.direction,
            trade.market,
            trade.entry_time.to_rfc3339(),
            trade.entry_price,
            exit_time.to_rfc3339(),
            exit_price,
            trade.quantity,
            gross,
            trade.commission,
            net,
            held,
        );
    }

    csv
}

/// Export the full report as pretty-printed JSON.
#[must_use]
pub fn to_json(report: &AnalyticsReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_default()
}
