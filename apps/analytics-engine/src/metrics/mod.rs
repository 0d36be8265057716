//! Performance metrics calculation.
//!
//! Implements standard trading performance metrics:
//! - Win rate, profit factor, expectancy, payoff ratio
//! - Maximum/average drawdown and ulcer index over the equity curve
//! - Sharpe, Sortino and Calmar ratios over daily aggregated returns
//! - Kelly percentage and approximate risk of ruin
//! - Long/short splits, daily and monthly aggregation, consistency

mod benchmarks;
mod calculator;
mod constants;
mod format;
mod math;
mod types;

pub use benchmarks::{MetricStatus, grade_higher, grade_lower, grade_ratio};
pub use calculator::MetricsCalculator;
pub use format::{format_currency, format_decimal, format_optional, format_pct, format_ratio};
pub use types::{
    DailyPnl, EquityPoint, MetricValue, MetricsReport, MonthlyReturn, SideMetrics,
};

pub(crate) use math::{coefficient_of_variation, cov_score, mean, std_dev};
