//! Commission impact and break-even move analysis.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::metrics::MetricValue;
use crate::trade::{MarketType, Trade};

use super::types::{CommissionImpact, MarketBreakEven};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Favorable move % a single trade needs just to cover its commission.
///
/// `None` when the trade has no measurable notional.
#[must_use]
pub fn break_even_move_pct(trade: &Trade) -> Option<Decimal> {
    let notional = trade.notional();
    if notional <= Decimal::ZERO {
        return None;
    }
    Some(trade.commission / notional * HUNDRED)
}

/// Commission drag over closed trades with their gross P&L.
///
/// Input pairs are (trade, gross P&L).
#[must_use]
pub fn commission_impact(closed: &[(&Trade, Decimal)]) -> CommissionImpact {
    if closed.is_empty() {
        return CommissionImpact::default();
    }

    let total_commission: Decimal = closed.iter().map(|(trade, _)| trade.commission).sum();
    let total_gross_abs: Decimal = closed.iter().map(|(_, gross)| gross.abs()).sum();
    let total_notional: Decimal = closed.iter().map(|(trade, _)| trade.notional()).sum();

    let vs_gross_pnl_pct = if total_gross_abs > Decimal::ZERO {
        MetricValue::Finite(total_commission / total_gross_abs * HUNDRED)
    } else if total_commission > Decimal::ZERO {
        MetricValue::Infinite
    } else {
        MetricValue::Undefined
    };

    let vs_notional_pct = if total_notional > Decimal::ZERO {
        total_commission / total_notional * HUNDRED
    } else {
        Decimal::ZERO
    };

    // Per-market mean break-even move, in MarketType::ALL order.
    let mut per_market: BTreeMap<usize, (u64, Decimal)> = BTreeMap::new();
    for (trade, _) in closed {
        let Some(break_even) = break_even_move_pct(trade) else {
            continue;
        };
        let Some(market_idx) = MarketType::ALL.iter().position(|m| *m == trade.market) else {
            continue;
        };
        let entry = per_market.entry(market_idx).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += break_even;
    }

    let break_even_by_market = per_market
        .into_iter()
        .map(|(market_idx, (trades, sum))| MarketBreakEven {
            market: MarketType::ALL[market_idx],
            trades,
            avg_break_even_pct: sum / Decimal::from(trades),
        })
        .collect();

    CommissionImpact {
        total_commission,
        vs_gross_pnl_pct,
        vs_notional_pct,
        break_even_by_market,
    }
}
