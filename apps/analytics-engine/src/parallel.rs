//! Parallel per-trade analysis using Rayon.
//!
//! Excursion and slippage records are independent per trade, so large
//! collections fan out across the Rayon pool. Small collections stay
//! sequential where the fork/join overhead would dominate.

use rayon::prelude::*;
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::excursion::{ExcursionAnalyzer, ExcursionRecord};
use crate::execution::{SlippageRecord, slippage_record};
use crate::trade::{Trade, closed_valid};

/// Below this many closed trades the parallel helpers run sequentially.
pub const MIN_PARALLEL_TRADES: usize = 64;

/// Compute excursion records for all closed trades, in parallel when
/// the collection is large enough.
#[must_use]
pub fn par_excursion_records(trades: &[Trade], config: &AnalyticsConfig) -> Vec<ExcursionRecord> {
    let closed = closed_valid(trades);
    let analyzer = ExcursionAnalyzer::new(config);

    if closed.len() < MIN_PARALLEL_TRADES {
        return closed
            .iter()
            .filter_map(|trade| analyzer.analyze_trade(trade))
            .collect();
    }

    debug!(
        trades = closed.len(),
        threads = rayon::current_num_threads(),
        "computing excursion records in parallel"
    );

    closed
        .par_iter()
        .filter_map(|trade| analyzer.analyze_trade(trade))
        .collect()
}

/// Compute slippage records for all closed trades, in parallel when
/// the collection is large enough.
#[must_use]
pub fn par_slippage_records(trades: &[Trade]) -> Vec<SlippageRecord> {
    let closed = closed_valid(trades);

    if closed.len() < MIN_PARALLEL_TRADES {
        return closed
            .iter()
            .filter_map(|trade| slippage_record(trade))
            .collect();
    }

    debug!(
        trades = closed.len(),
        threads = rayon::current_num_threads(),
        "computing slippage records in parallel"
    );

    closed
        .par_iter()
        .filter_map(|trade| slippage_record(trade))
        .collect()
}
