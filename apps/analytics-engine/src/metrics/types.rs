//! Core types for performance metrics.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A ratio result that cannot be mistaken for an ordinary number.
///
/// Degenerate denominators produce explicit sentinels instead of leaking
/// NaN/Infinity into downstream aggregations: `Infinite` for a positive
/// numerator over zero, `Undefined` when the ratio carries no information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricValue {
    /// An ordinary finite ratio.
    Finite(Decimal),
    /// Positive numerator over a zero denominator.
    Infinite,
    /// No meaningful value (e.g., zero over zero).
    Undefined,
}

impl MetricValue {
    /// The finite value, if any.
    #[must_use]
    pub const fn as_finite(&self) -> Option<Decimal> {
        match self {
            Self::Finite(value) => Some(*value),
            Self::Infinite | Self::Undefined => None,
        }
    }

    /// Whether the value carries information (finite or infinite).
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// The finite value, or `default` for either sentinel.
    #[must_use]
    pub fn finite_or(&self, default: Decimal) -> Decimal {
        self.as_finite().unwrap_or(default)
    }

    /// Build a ratio with the standard sentinel policy:
    /// `Finite` for a non-zero denominator, `Infinite` for a positive
    /// numerator over zero, `Undefined` otherwise.
    #[must_use]
    pub fn ratio(numerator: Decimal, denominator: Decimal) -> Self {
        if denominator != Decimal::ZERO {
            Self::Finite(numerator / denominator)
        } else if numerator > Decimal::ZERO {
            Self::Infinite
        } else {
            Self::Undefined
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{value:.2}"),
            Self::Infinite => write!(f, "∞"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

/// Equity curve point for tracking cumulative P&L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Exit timestamp of the trade that produced this point.
    pub time: DateTime<Utc>,
    /// Cumulative equity.
    pub equity: Decimal,
}

/// Net P&L aggregated over one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPnl {
    /// Calendar day.
    pub date: NaiveDate,
    /// Net P&L over the day.
    pub pnl: Decimal,
    /// Trades closed that day.
    pub trades: u64,
}

/// Win rate and profit factor restricted to one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideMetrics {
    /// Closed trades on this side.
    pub trades: u64,
    /// Win rate % on this side.
    pub win_rate_pct: Decimal,
    /// Profit factor on this side.
    pub profit_factor: MetricValue,
}

impl Default for SideMetrics {
    fn default() -> Self {
        Self {
            trades: 0,
            win_rate_pct: Decimal::ZERO,
            profit_factor: MetricValue::Undefined,
        }
    }
}

/// One month of aggregated returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Net P&L over the month.
    pub pnl: Decimal,
    /// Trades closed in the month.
    pub trades: u64,
    /// Win rate % for the month.
    pub win_rate_pct: Decimal,
}

/// Full performance metrics report.
///
/// Every field has a defined neutral value for the empty-input case, so a
/// dashboard can render on first use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    // Trade statistics
    /// Closed, well-formed trades included in the report.
    pub closed_trades: u64,
    /// Trades with net P&L > 0.
    pub winning_trades: u64,
    /// Trades with net P&L < 0.
    pub losing_trades: u64,
    /// Win rate % (0 when no closed trades).
    pub win_rate_pct: Decimal,
    /// Sum of winning trades' net P&L.
    pub gross_profit: Decimal,
    /// Sum of losing trades' net P&L, as a positive value.
    pub gross_loss: Decimal,
    /// Gross profit / gross loss.
    pub profit_factor: MetricValue,
    /// Average net P&L per closed trade.
    pub expectancy: Decimal,
    /// Mean net P&L of winners (0 when none).
    pub avg_win: Decimal,
    /// Mean net P&L of losers, as a positive value (0 when none).
    pub avg_loss: Decimal,
    /// Largest single winning trade.
    pub largest_win: Decimal,
    /// Largest single losing trade, as a positive value.
    pub largest_loss: Decimal,
    /// Average win / average loss.
    pub payoff_ratio: MetricValue,

    // P&L totals
    /// Total gross P&L across closed trades.
    pub total_gross_pnl: Decimal,
    /// Total net P&L across closed trades.
    pub total_net_pnl: Decimal,
    /// Total commission paid.
    pub total_commission: Decimal,

    // Equity & drawdown
    /// Reconstructed equity curve in exit-chronological order.
    pub equity_curve: Vec<EquityPoint>,
    /// Maximum drawdown as a % of the running peak.
    pub max_drawdown_pct: Decimal,
    /// Maximum drawdown in currency terms.
    pub max_drawdown_amount: Decimal,
    /// Mean of non-zero per-point drawdowns, %.
    pub avg_drawdown_pct: Decimal,
    /// RMS of per-point drawdown percentages.
    pub ulcer_index: Decimal,
    /// Net P&L / max drawdown amount (0 when no drawdown).
    pub recovery_factor: Decimal,

    // Risk sizing
    /// Kelly criterion %, clamped to [0, 100].
    pub kelly_pct: Decimal,
    /// Approximate risk of ruin %, clamped to [0, 100].
    pub risk_of_ruin_pct: Decimal,
    /// Mean R-multiple over trades carrying a stop (`None` when none do).
    pub avg_r_multiple: Option<Decimal>,
    /// Trades with a measurable R-multiple.
    pub r_multiple_trades: u64,

    // Risk-adjusted ratios over daily returns
    /// Annualized Sharpe ratio (`None` under the sample minimum).
    pub sharpe_ratio: Option<Decimal>,
    /// Annualized Sortino ratio (`None` under the sample minimum).
    pub sortino_ratio: Option<Decimal>,
    /// Annualized return / max drawdown (`None` without a drawdown).
    pub calmar_ratio: Option<Decimal>,
    /// Annualized return %.
    pub annualized_return_pct: Decimal,
    /// 0-100 consistency score from daily P&L variation.
    pub consistency_score: Decimal,

    // Splits
    /// Metrics restricted to long (Buy) trades.
    pub long_side: SideMetrics,
    /// Metrics restricted to short (Sell) trades.
    pub short_side: SideMetrics,
    /// Daily net P&L series in date order.
    pub daily_pnl: Vec<DailyPnl>,
    /// Monthly returns in date order.
    pub monthly_returns: Vec<MonthlyReturn>,

    // Periods
    /// Mean holding period in hours.
    pub avg_holding_period_hours: Decimal,
    /// Calendar span from first entry to last exit, in days.
    pub trading_period_days: Decimal,
}

impl Default for MetricsReport {
    fn default() -> Self {
        Self {
            closed_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate_pct: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            profit_factor: MetricValue::Undefined,
            expectancy: Decimal::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            largest_win: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
            payoff_ratio: MetricValue::Undefined,
            total_gross_pnl: Decimal::ZERO,
            total_net_pnl: Decimal::ZERO,
            total_commission: Decimal::ZERO,
            equity_curve: Vec::new(),
            max_drawdown_pct: Decimal::ZERO,
            max_drawdown_amount: Decimal::ZERO,
            avg_drawdown_pct: Decimal::ZERO,
            ulcer_index: Decimal::ZERO,
            recovery_factor: Decimal::ZERO,
            kelly_pct: Decimal::ZERO,
            risk_of_ruin_pct: Decimal::ZERO,
            avg_r_multiple: None,
            r_multiple_trades: 0,
            sharpe_ratio: None,
            sortino_ratio: None,
            calmar_ratio: None,
            annualized_return_pct: Decimal::ZERO,
            consistency_score: Decimal::ZERO,
            long_side: SideMetrics::default(),
            short_side: SideMetrics::default(),
            daily_pnl: Vec::new(),
            monthly_returns: Vec::new(),
            avg_holding_period_hours: Decimal::ZERO,
            trading_period_days: Decimal::ZERO,
        }
    }
}
