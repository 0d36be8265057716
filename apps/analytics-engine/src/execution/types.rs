//! Result types for execution-quality analysis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::behavior::ScoreLabel;
use crate::metrics::MetricValue;
use crate::trade::MarketType;

/// Per-trade slippage measurement.
///
/// Slippage is direction-adjusted so positive always means "worse than
/// intended"; negative is price improvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlippageRecord {
    /// Trade symbol.
    pub symbol: String,
    /// Market of the trade.
    pub market: MarketType,
    /// Entry slippage % vs the intended entry (`None` without one).
    pub entry_slippage_pct: Option<Decimal>,
    /// Exit slippage % vs the intended exit (`None` without one).
    pub exit_slippage_pct: Option<Decimal>,
    /// Combined measured slippage % for the trade.
    pub total_slippage_pct: Decimal,
    /// Slippage cost in currency units (slippage % x entry notional).
    pub cost: Decimal,
}

/// Average slippage within one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSlippage {
    /// Market.
    pub market: MarketType,
    /// Trades measured in this market.
    pub trades: u64,
    /// Mean combined slippage %.
    pub avg_slippage_pct: Decimal,
}

/// Aggregate slippage statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SlippageSummary {
    /// Per-trade records for trades with at least one intended price.
    pub records: Vec<SlippageRecord>,
    /// Mean entry slippage % over measured entries.
    pub avg_entry_slippage_pct: Option<Decimal>,
    /// Mean exit slippage % over measured exits.
    pub avg_exit_slippage_pct: Option<Decimal>,
    /// Total slippage cost in currency units.
    pub total_cost: Decimal,
    /// Best (lowest) single-trade combined slippage %.
    pub best_trade_pct: Option<Decimal>,
    /// Worst (highest) single-trade combined slippage %.
    pub worst_trade_pct: Option<Decimal>,
    /// Breakdown by market.
    pub by_market: Vec<MarketSlippage>,
}

/// Stop-loss / take-profit hit rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HitRates {
    /// Closed trades carrying a stop-loss.
    pub stop_trades: u64,
    /// % of stop-carrying trades that exited at the stop (within
    /// tolerance); `None` when no trade carries a stop.
    pub stop_hit_rate_pct: Option<Decimal>,
    /// Closed trades carrying a take-profit.
    pub target_trades: u64,
    /// % of target-carrying trades that exited at the target (within
    /// tolerance); `None` when no trade carries a target.
    pub target_hit_rate_pct: Option<Decimal>,
}

/// Mean break-even move within one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketBreakEven {
    /// Market.
    pub market: MarketType,
    /// Trades measured in this market.
    pub trades: u64,
    /// Mean favorable move % required just to cover commission.
    pub avg_break_even_pct: Decimal,
}

/// Commission drag statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionImpact {
    /// Total commission paid.
    pub total_commission: Decimal,
    /// Commission as % of total gross |P&L|; `Infinite` when commission
    /// was paid against zero gross P&L.
    pub vs_gross_pnl_pct: MetricValue,
    /// Commission as % of total traded notional.
    pub vs_notional_pct: Decimal,
    /// Break-even move per market.
    pub break_even_by_market: Vec<MarketBreakEven>,
}

impl Default for CommissionImpact {
    fn default() -> Self {
        Self {
            total_commission: Decimal::ZERO,
            vs_gross_pnl_pct: MetricValue::Undefined,
            vs_notional_pct: Decimal::ZERO,
            break_even_by_market: Vec::new(),
        }
    }
}

/// Full execution-quality report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Slippage statistics.
    pub slippage: SlippageSummary,
    /// Stop/target hit rates.
    pub hit_rates: HitRates,
    /// Commission drag.
    pub commissions: CommissionImpact,
    /// Composite 0-100 execution score.
    pub score: Decimal,
    /// Qualitative band (same bands as the Volt Score).
    pub label: ScoreLabel,
}

impl Default for ExecutionReport {
    fn default() -> Self {
        Self {
            slippage: SlippageSummary::default(),
            hit_rates: HitRates::default(),
            commissions: CommissionImpact::default(),
            score: Decimal::ZERO,
            label: ScoreLabel::NeedsImprovement,
        }
    }
}
