//! Behavioral analysis over ordered trade sequences.
//!
//! Detects sequential and time-based patterns: win/loss streaks, daily
//! consistency, revenge-trading incidents and outlier dependency, then
//! blends the sub-scores into the composite Volt Score.

mod daily;
mod outliers;
mod revenge;
mod score;
mod streaks;
mod types;

pub use types::{
    BehavioralSnapshot, CurrentStreak, DailyConsistency, DayRecord, OutlierAnalysis,
    RevengeIncident, RevengeIndicators, RevengeSeverity, ScoreBreakdown, ScoreLabel, StreakKind,
    StreakSummary, VoltScore,
};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::metrics::MetricsCalculator;
use crate::pnl::net_pnl;
use crate::trade::{Trade, closed_valid};

use revenge::TradePoint;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Behavioral analyzer.
#[derive(Debug)]
pub struct BehavioralAnalyzer<'a> {
    config: &'a AnalyticsConfig,
}

impl<'a> BehavioralAnalyzer<'a> {
    /// Create an analyzer over the given configuration.
    #[must_use]
    pub const fn new(config: &'a AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Build the full behavioral snapshot for a trade collection.
    ///
    /// Open and malformed trades are excluded; an empty remainder yields
    /// the neutral default snapshot.
    #[must_use]
    pub fn analyze(&self, trades: &[Trade]) -> BehavioralSnapshot {
        let mut closed: Vec<(DateTime<Utc>, &Trade, Decimal)> = closed_valid(trades)
            .into_iter()
            .filter_map(|trade| {
                let net = net_pnl(trade, &self.config.contracts)?;
                let exit_time = trade.exit_time?;
                Some((exit_time, trade, net))
            })
            .collect();
        if closed.is_empty() {
            return BehavioralSnapshot::default();
        }
        closed.sort_by_key(|(exit_time, _, _)| *exit_time);

        let outcomes: Vec<Decimal> = closed.iter().map(|(_, _, net)| *net).collect();
        let streak_summary = streaks::detect(&outcomes);

        let day_outcomes: Vec<_> = closed
            .iter()
            .map(|(exit_time, _, net)| (exit_time.date_naive(), *net))
            .collect();
        let daily = daily::analyze(&day_outcomes);

        let points: Vec<TradePoint> = closed
            .iter()
            .map(|(exit_time, trade, net)| TradePoint {
                symbol: trade.symbol.clone(),
                entry_time: trade.entry_time,
                exit_time: *exit_time,
                notional: trade.notional(),
                net: *net,
            })
            .collect();
        let (revenge_incidents, revenge_score) = revenge::detect(&points, &self.config.revenge);

        let outlier_analysis = outliers::analyze(&outcomes, self.config.outlier_decile);

        let with_stop = closed
            .iter()
            .filter(|(_, trade, _)| trade.stop_loss.is_some())
            .count() as u64;
        let stop_compliance_pct =
            Decimal::from(with_stop) / Decimal::from(closed.len() as u64) * HUNDRED;

        let metrics = MetricsCalculator::new(self.config).calculate(trades);
        let volt_score = score::compute(&metrics, daily.score, revenge_score, stop_compliance_pct);

        debug!(
            closed = closed.len(),
            incidents = revenge_incidents.len(),
            volt_score = %volt_score.value,
            "behavioral snapshot computed"
        );

        BehavioralSnapshot {
            streaks: streak_summary,
            daily,
            revenge_incidents,
            revenge_score,
            outliers: outlier_analysis,
            volt_score,
        }
    }
}
