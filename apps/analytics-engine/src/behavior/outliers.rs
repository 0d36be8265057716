//! Outlier dependency analysis.
//!
//! Measures how much of the total P&L is carried by the extreme tails:
//! a trader whose edge lives in one or two outsized trades is more
//! fragile than the headline numbers suggest.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::types::OutlierAnalysis;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Analyze outlier dependency over net P&L outcomes.
///
/// `decile` is the fraction of trades treated as outliers at each tail
/// (top winners and bottom losers by P&L).
#[must_use]
pub fn analyze(outcomes: &[Decimal], decile: Decimal) -> OutlierAnalysis {
    if outcomes.is_empty() {
        return OutlierAnalysis::default();
    }

    let mut sorted: Vec<Decimal> = outcomes.to_vec();
    sorted.sort();

    let largest_loss = sorted
        .first()
        .copied()
        .unwrap_or(Decimal::ZERO)
        .min(Decimal::ZERO);
    let largest_win = sorted
        .last()
        .copied()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);

    let total_pnl: Decimal = outcomes.iter().sum();

    let tail = tail_size(outcomes.len(), decile);
    let outlier_pnl: Decimal = sorted[..tail].iter().sum::<Decimal>()
        + sorted[sorted.len() - tail..].iter().sum::<Decimal>();
    let pnl_without_outliers = total_pnl - outlier_pnl;

    let outlier_ratio_pct = if total_pnl == Decimal::ZERO {
        Decimal::ZERO
    } else {
        outlier_pnl.abs() / total_pnl.abs() * HUNDRED
    };

    OutlierAnalysis {
        largest_win,
        largest_loss,
        total_pnl,
        pnl_without_outliers,
        outlier_ratio_pct,
        outlier_trades: (tail * 2) as u64,
    }
}

/// Trades per tail: ceil(n * decile), capped so both tails never overlap.
fn tail_size(n: usize, decile: Decimal) -> usize {
    let raw = (Decimal::from(n as u64) * decile)
        .ceil()
        .to_usize()
        .unwrap_or(1)
        .max(1);
    raw.min(n / 2)
}
