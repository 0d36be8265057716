//! Execution-quality aggregation and composite scoring.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::behavior::ScoreLabel;
use crate::config::AnalyticsConfig;
use crate::metrics::mean;
use crate::pnl::gross_pnl;
use crate::trade::{MarketType, Trade, closed_valid};

use super::costs::commission_impact;
use super::slippage::slippage_record;
use super::types::{
    CommissionImpact, ExecutionReport, HitRates, MarketSlippage, SlippageRecord, SlippageSummary,
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Combined slippage % that zeroes the slippage component.
const SLIPPAGE_FLOOR_PCT: Decimal = Decimal::ONE;

/// Commission/notional % that zeroes the commission component.
const COMMISSION_FLOOR_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5

/// Neutral component score when a dimension is unmeasurable.
const NEUTRAL_COMPONENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

const WEIGHT_SLIPPAGE: Decimal = Decimal::from_parts(40, 0, 0, false, 2); // 0.40
const WEIGHT_HIT_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2); // 0.30
const WEIGHT_COMMISSION: Decimal = Decimal::from_parts(30, 0, 0, false, 2); // 0.30

/// Execution-quality analyzer.
#[derive(Debug)]
pub struct ExecutionAnalyzer<'a> {
    config: &'a AnalyticsConfig,
}

impl<'a> ExecutionAnalyzer<'a> {
    /// Create an analyzer over the given configuration.
    #[must_use]
    pub const fn new(config: &'a AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Build the execution report for a trade collection.
    #[must_use]
    pub fn analyze(&self, trades: &[Trade]) -> ExecutionReport {
        let closed = closed_valid(trades);
        if closed.is_empty() {
            return ExecutionReport::default();
        }

        let records: Vec<SlippageRecord> = closed
            .iter()
            .filter_map(|trade| slippage_record(trade))
            .collect();
        let slippage = summarize_slippage(records);
        let hit_rates = self.hit_rates(&closed);

        let with_gross: Vec<(&Trade, Decimal)> = closed
            .iter()
            .filter_map(|trade| gross_pnl(trade, &self.config.contracts).map(|g| (*trade, g)))
            .collect();
        let commissions = commission_impact(&with_gross);

        let score = composite_score(&slippage, &hit_rates, &commissions);

        debug!(
            closed = closed.len(),
            measured = slippage.records.len(),
            score = %score,
            "execution quality computed"
        );

        ExecutionReport {
            slippage,
            hit_rates,
            commissions,
            score,
            label: ScoreLabel::for_score(score),
        }
    }

    /// Aggregate already-computed slippage records into a report.
    ///
    /// Parallel callers compute records with
    /// [`crate::parallel::par_slippage_records`] and feed them here.
    #[must_use]
    pub fn analyze_with_records(
        &self,
        trades: &[Trade],
        records: Vec<SlippageRecord>,
    ) -> ExecutionReport {
        let closed = closed_valid(trades);
        if closed.is_empty() {
            return ExecutionReport::default();
        }

        let slippage = summarize_slippage(records);
        let hit_rates = self.hit_rates(&closed);
        let with_gross: Vec<(&Trade, Decimal)> = closed
            .iter()
            .filter_map(|trade| gross_pnl(trade, &self.config.contracts).map(|g| (*trade, g)))
            .collect();
        let commissions = commission_impact(&with_gross);
        let score = composite_score(&slippage, &hit_rates, &commissions);

        ExecutionReport {
            slippage,
            hit_rates,
            commissions,
            score,
            label: ScoreLabel::for_score(score),
        }
    }

    /// Fraction of stop/target-carrying trades exiting within tolerance
    /// of their level.
    fn hit_rates(&self, closed: &[&Trade]) -> HitRates {
        let tolerance = self.config.slippage_tolerance_pct;

        let mut stop_trades = 0u64;
        let mut stop_hits = 0u64;
        let mut target_trades = 0u64;
        let mut target_hits = 0u64;

        for trade in closed {
            let Some(exit) = trade.exit_price else {
                continue;
            };
            if let Some(stop) = trade.stop_loss {
                stop_trades += 1;
                if within_tolerance(exit, stop, tolerance) {
                    stop_hits += 1;
                }
            }
            if let Some(target) = trade.take_profit {
                target_trades += 1;
                if within_tolerance(exit, target, tolerance) {
                    target_hits += 1;
                }
            }
        }

        HitRates {
            stop_trades,
            stop_hit_rate_pct: rate_pct(stop_hits, stop_trades),
            target_trades,
            target_hit_rate_pct: rate_pct(target_hits, target_trades),
        }
    }
}

fn within_tolerance(price: Decimal, level: Decimal, tolerance_pct: Decimal) -> bool {
    if level == Decimal::ZERO {
        return false;
    }
    ((price - level).abs() / level.abs() * HUNDRED) <= tolerance_pct
}

fn rate_pct(hits: u64, total: u64) -> Option<Decimal> {
    if total == 0 {
        return None;
    }
    Some(Decimal::from(hits) / Decimal::from(total) * HUNDRED)
}

fn summarize_slippage(records: Vec<SlippageRecord>) -> SlippageSummary {
    if records.is_empty() {
        return SlippageSummary::default();
    }

    let entries: Vec<Decimal> = records
        .iter()
        .filter_map(|r| r.entry_slippage_pct)
        .collect();
    let exits: Vec<Decimal> = records.iter().filter_map(|r| r.exit_slippage_pct).collect();
    let totals: Vec<Decimal> = records.iter().map(|r| r.total_slippage_pct).collect();
    let total_cost: Decimal = records.iter().map(|r| r.cost).sum();

    // Per-market breakdown, keyed by MarketType::ALL order.
    let mut per_market: BTreeMap<usize, (u64, Decimal)> = BTreeMap::new();
    for record in &records {
        let Some(market_idx) = MarketType::ALL.iter().position(|m| *m == record.market) else {
            continue;
        };
        let entry = per_market.entry(market_idx).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += record.total_slippage_pct;
    }
    let by_market = per_market
        .into_iter()
        .map(|(market_idx, (trades, sum))| MarketSlippage {
            market: MarketType::ALL[market_idx],
            trades,
            avg_slippage_pct: sum / Decimal::from(trades),
        })
        .collect();

    SlippageSummary {
        avg_entry_slippage_pct: mean(&entries),
        avg_exit_slippage_pct: mean(&exits),
        total_cost,
        best_trade_pct: totals.iter().copied().min(),
        worst_trade_pct: totals.iter().copied().max(),
        by_market,
        records,
    }
}

/// Weighted blend of inverted slippage, hit-rate quality and inverted
/// commission drag. Unmeasurable dimensions score neutral rather than
/// dragging the composite to an extreme.
fn composite_score(
    slippage: &SlippageSummary,
    hit_rates: &HitRates,
    commissions: &CommissionImpact,
) -> Decimal {
    let totals: Vec<Decimal> = slippage
        .records
        .iter()
        .map(|r| r.total_slippage_pct)
        .collect();
    let slippage_component = mean(&totals).map_or(NEUTRAL_COMPONENT, |avg| {
        let clamped = avg.clamp(Decimal::ZERO, SLIPPAGE_FLOOR_PCT);
        (Decimal::ONE - clamped / SLIPPAGE_FLOOR_PCT) * HUNDRED
    });

    let hit_component = match (hit_rates.stop_hit_rate_pct, hit_rates.target_hit_rate_pct) {
        (Some(stop), Some(target)) => (stop + target) / Decimal::TWO,
        (Some(rate), None) | (None, Some(rate)) => rate,
        (None, None) => NEUTRAL_COMPONENT,
    };

    let commission_component = {
        let clamped = commissions
            .vs_notional_pct
            .clamp(Decimal::ZERO, COMMISSION_FLOOR_PCT);
        (Decimal::ONE - clamped / COMMISSION_FLOOR_PCT) * HUNDRED
    };

    (WEIGHT_SLIPPAGE * slippage_component
        + WEIGHT_HIT_RATE * hit_component
        + WEIGHT_COMMISSION * commission_component)
        .clamp(Decimal::ZERO, HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::TradeDirection;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn make_trade(entry: Decimal, exit: Decimal) -> Trade {
        Trade {
            symbol: "AAPL".to_string(),
            direction: TradeDirection::Buy,
            entry_price: entry,
            exit_price: Some(exit),
            quantity: dec!(10),
            entry_time: Utc.with_ymd_and_hms(2024, 8, 5, 10, 0, 0).unwrap(),
            exit_time: Some(Utc.with_ymd_and_hms(2024, 8, 5, 14, 0, 0).unwrap()),
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

    #[test]
    fn test_empty_report_is_neutral() {
        let config = AnalyticsConfig::default();
        let report = ExecutionAnalyzer::new(&config).analyze(&[]);
        assert_eq!(report, ExecutionReport::default());
    }

    #[test]
    fn test_hit_rates_within_tolerance() {
        let mut stopped = make_trade(dec!(100), dec!(95.05));
        stopped.stop_loss = Some(dec!(95)); // within 0.1%

        let mut missed = make_trade(dec!(100), dec!(97));
        missed.stop_loss = Some(dec!(95));

        let mut targeted = make_trade(dec!(100), dec!(110));
        targeted.take_profit = Some(dec!(110));

        let config = AnalyticsConfig::default();
        let report = ExecutionAnalyzer::new(&config).analyze(&[stopped, missed, targeted]);

        assert_eq!(report.hit_rates.stop_trades, 2);
        assert_eq!(report.hit_rates.stop_hit_rate_pct, Some(dec!(50)));
        assert_eq!(report.hit_rates.target_trades, 1);
        assert_eq!(report.hit_rates.target_hit_rate_pct, Some(dec!(100)));
    }

    #[test]
    fn test_slippage_aggregation() {
        let mut worse = make_trade(dec!(100.50), dec!(105));
        worse.intended_entry = Some(dec!(100)); // +0.5%
        let mut better = make_trade(dec!(99.80), dec!(105));
        better.intended_entry = Some(dec!(100)); // -0.2%

        let config = AnalyticsConfig::default();
        let report = ExecutionAnalyzer::new(&config).analyze(&[worse, better]);

        assert_eq!(report.slippage.records.len(), 2);
        assert_eq!(report.slippage.avg_entry_slippage_pct, Some(dec!(0.15)));
        assert_eq!(report.slippage.best_trade_pct, Some(dec!(-0.2)));
        assert_eq!(report.slippage.worst_trade_pct, Some(dec!(0.5)));
        assert_eq!(report.slippage.by_market.len(), 1);
        assert_eq!(report.slippage.by_market[0].market, MarketType::Stocks);
    }

    #[test]
    fn test_score_bounds_and_bands() {
        // Clean execution: no slippage measured, perfect target hits,
        // zero commission.
        let mut clean = make_trade(dec!(100), dec!(110));
        clean.take_profit = Some(dec!(110));
        clean.intended_entry = Some(dec!(100));
        clean.intended_exit = Some(dec!(110));

        let config = AnalyticsConfig::default();
        let report = ExecutionAnalyzer::new(&config).analyze(&[clean]);

        assert!(report.score > dec!(90));
        assert!(report.score <= dec!(100));
        assert_eq!(report.label, ScoreLabel::Excellent);
    }

    #[test]
    fn test_heavy_slippage_lowers_score() {
        let mut sloppy = make_trade(dec!(102), dec!(105));
        sloppy.intended_entry = Some(dec!(100)); // +2% slippage
        let mut clean = make_trade(dec!(100), dec!(105));
        clean.intended_entry = Some(dec!(100));

        let config = AnalyticsConfig::default();
        let sloppy_report = ExecutionAnalyzer::new(&config).analyze(&[sloppy]);
        let clean_report = ExecutionAnalyzer::new(&config).analyze(&[clean]);
        assert!(sloppy_report.score < clean_report.score);
    }
}
