//! Per-trade excursion analysis (MAE/MFE).
//!
//! Works over the trade's intraperiod price path: either the samples the
//! caller provides, or a coarse reconstruction from entry, partial exits
//! and the final exit. All moves are direction-adjusted so a positive
//! running P&L is always favorable to the position.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::metrics::{MetricValue, mean};
use crate::pnl::directional_move;
use crate::trade::{Trade, closed_valid};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// One sample of the reconstructed running P&L series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningPnlPoint {
    /// Sample timestamp.
    pub time: DateTime<Utc>,
    /// Observed price.
    pub price: Decimal,
    /// Cumulative direction-adjusted P&L % from entry.
    pub cumulative_pnl_pct: Decimal,
}

/// Excursion analysis of a single closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcursionRecord {
    /// Trade symbol.
    pub symbol: String,
    /// Maximum adverse excursion %, >= 0.
    pub mae_pct: Decimal,
    /// Maximum favorable excursion %, >= 0.
    pub mfe_pct: Decimal,
    /// MFE / MAE; `Infinite` when MAE = 0 and MFE > 0, `Undefined` when
    /// MFE = 0.
    pub edge_ratio: MetricValue,
    /// Realized move as % of MFE, clamped to [0, 100]; `None` when
    /// MFE <= 0.
    pub exit_efficiency_pct: Option<Decimal>,
    /// Progress toward the take-profit target as % of the target
    /// distance; `None` without a usable target. Not capped: price may
    /// overshoot the target.
    pub updraw_pct: Option<Decimal>,
    /// Running P&L series from entry to exit.
    pub running_pnl: Vec<RunningPnlPoint>,
}

/// One bin of an excursion distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcursionBucket {
    /// Human-readable range label (e.g., "1-2%").
    pub label: String,
    /// Trades falling in the range.
    pub count: u64,
}

/// Aggregate excursion statistics over a trade set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExcursionSummary {
    /// Per-trade records, in input order.
    pub records: Vec<ExcursionRecord>,
    /// Mean MAE % over analyzed trades.
    pub avg_mae_pct: Decimal,
    /// Mean MFE % over analyzed trades.
    pub avg_mfe_pct: Decimal,
    /// Mean edge ratio over trades with a finite edge ratio.
    pub avg_edge_ratio: Option<Decimal>,
    /// Mean exit efficiency over trades where it is defined.
    pub avg_exit_efficiency_pct: Option<Decimal>,
    /// MAE distribution over the configured buckets.
    pub mae_distribution: Vec<ExcursionBucket>,
    /// MFE distribution over the configured buckets.
    pub mfe_distribution: Vec<ExcursionBucket>,
}

/// Excursion analyzer.
#[derive(Debug)]
pub struct ExcursionAnalyzer<'a> {
    config: &'a AnalyticsConfig,
}

impl<'a> ExcursionAnalyzer<'a> {
    /// Create an analyzer over the given configuration.
    #[must_use]
    pub const fn new(config: &'a AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Analyze every closed, well-formed trade and aggregate.
    #[must_use]
    pub fn analyze(&self, trades: &[Trade]) -> ExcursionSummary {
        let records: Vec<ExcursionRecord> = closed_valid(trades)
            .into_iter()
            .filter_map(|trade| self.analyze_trade(trade))
            .collect();
        self.summarize(records)
    }

    /// Aggregate already-computed per-trade records.
    ///
    /// Split out so callers can fan the per-trade work out in parallel
    /// and still get the same summary.
    #[must_use]
    pub fn summarize(&self, records: Vec<ExcursionRecord>) -> ExcursionSummary {
        if records.is_empty() {
            return ExcursionSummary::default();
        }

        let maes: Vec<Decimal> = records.iter().map(|r| r.mae_pct).collect();
        let mfes: Vec<Decimal> = records.iter().map(|r| r.mfe_pct).collect();
        let edges: Vec<Decimal> = records
            .iter()
            .filter_map(|r| r.edge_ratio.as_finite())
            .collect();
        let efficiencies: Vec<Decimal> = records
            .iter()
            .filter_map(|r| r.exit_efficiency_pct)
            .collect();

        let summary = ExcursionSummary {
            avg_mae_pct: mean(&maes).unwrap_or(Decimal::ZERO),
            avg_mfe_pct: mean(&mfes).unwrap_or(Decimal::ZERO),
            avg_edge_ratio: mean(&edges),
            avg_exit_efficiency_pct: mean(&efficiencies),
            mae_distribution: self.distribution(&maes),
            mfe_distribution: self.distribution(&mfes),
            records,
        };

        debug!(
            trades = summary.records.len(),
            avg_mae = %summary.avg_mae_pct,
            avg_mfe = %summary.avg_mfe_pct,
            "excursions computed"
        );

        summary
    }

    /// Analyze one trade; `None` while the position is open.
    #[must_use]
    pub fn analyze_trade(&self, trade: &Trade) -> Option<ExcursionRecord> {
        let exit_price = trade.exit_price?;
        let exit_time = trade.exit_time?;

        let running_pnl = build_running_pnl(trade, exit_price, exit_time);

        let mut mfe_pct = Decimal::ZERO;
        let mut mae_pct = Decimal::ZERO;
        for point in &running_pnl {
            mfe_pct = mfe_pct.max(point.cumulative_pnl_pct);
            mae_pct = mae_pct.max(-point.cumulative_pnl_pct);
        }

        let edge_ratio = if mfe_pct == Decimal::ZERO {
            MetricValue::Undefined
        } else if mae_pct == Decimal::ZERO {
            MetricValue::Infinite
        } else {
            MetricValue::Finite(mfe_pct / mae_pct)
        };

        let realized_pct =
            directional_move(trade.direction, trade.entry_price, exit_price) / trade.entry_price
                * HUNDRED;
        let exit_efficiency_pct = if mfe_pct > Decimal::ZERO {
            Some((realized_pct / mfe_pct * HUNDRED).clamp(Decimal::ZERO, HUNDRED))
        } else {
            None
        };

        let updraw_pct = trade.take_profit.and_then(|target| {
            let target_dist_pct =
                directional_move(trade.direction, trade.entry_price, target) / trade.entry_price
                    * HUNDRED;
            if target_dist_pct <= Decimal::ZERO {
                return None;
            }
            Some(mfe_pct / target_dist_pct * HUNDRED)
        });

        Some(ExcursionRecord {
            symbol: trade.symbol.clone(),
            mae_pct,
            mfe_pct,
            edge_ratio,
            exit_efficiency_pct,
            updraw_pct,
            running_pnl,
        })
    }

    /// Bin values into the configured bucket edges plus an overflow bin.
    fn distribution(&self, values: &[Decimal]) -> Vec<ExcursionBucket> {
        let edges = &self.config.excursion_buckets;
        let mut counts = vec![0u64; edges.len() + 1];

        for value in values {
            let idx = edges
                .iter()
                .position(|edge| value < edge)
                .unwrap_or(edges.len());
            counts[idx] += 1;
        }

        let mut buckets = Vec::with_capacity(counts.len());
        let mut prev = Decimal::ZERO;
        for (idx, edge) in edges.iter().enumerate() {
            buckets.push(ExcursionBucket {
                label: format!("{prev}-{edge}%"),
                count: counts[idx],
            });
            prev = *edge;
        }
        buckets.push(ExcursionBucket {
            label: format!(">{prev}%"),
            count: counts[edges.len()],
        });
        buckets
    }
}

/// Build the running P&L series for a closed trade.
///
/// Prefers caller-provided price samples (restricted to the trade's
/// lifetime); otherwise reconstructs a coarse path from entry, partial
/// exits and the final exit.
fn build_running_pnl(
    trade: &Trade,
    exit_price: Decimal,
    exit_time: DateTime<Utc>,
) -> Vec<RunningPnlPoint> {
    let mut samples: Vec<(DateTime<Utc>, Decimal)> = vec![(trade.entry_time, trade.entry_price)];

    if trade.price_path.is_empty() {
        for partial in &trade.partial_exits {
            samples.push((partial.time, partial.price));
        }
    } else {
        for point in &trade.price_path {
            if point.time >= trade.entry_time && point.time <= exit_time {
                samples.push((point.time, point.price));
            }
        }
    }
    samples.push((exit_time, exit_price));
    samples.sort_by_key(|(time, _)| *time);

    samples
        .into_iter()
        .map(|(time, price)| RunningPnlPoint {
            time,
            price,
            cumulative_pnl_pct: directional_move(trade.direction, trade.entry_price, price)
                / trade.entry_price
                * HUNDRED,
        })
        .collect()
}
