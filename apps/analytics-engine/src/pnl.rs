//! Market-aware gross P&L resolution.
//!
//! Leaf component: converts a trade plus its market conventions into a
//! signed gross P&L. Commission is deliberately NOT subtracted here so
//! gross and net P&L stay distinguishable; net is derived where needed.

use rust_decimal::Decimal;

use crate::config::ContractSpecs;
use crate::trade::{MarketType, Trade, TradeDirection};

/// Standard option contract size (100 underlying units).
const OPTION_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;

/// Resolve the per-unit contract multiplier for a trade.
///
/// Options are fixed at 100. Futures look up a per-symbol multiplier.
/// Everything else uses the configured lot multiplier. Unknown symbols
/// and unconfigured markets fall back to 1 rather than failing, to keep
/// batch computation resilient to partial data.
#[must_use]
pub fn contract_multiplier(trade: &Trade, specs: &ContractSpecs) -> Decimal {
    match trade.market {
        MarketType::Options => OPTION_MULTIPLIER,
        MarketType::Futures => specs
            .futures_multipliers
            .get(&trade.symbol)
            .copied()
            .unwrap_or(Decimal::ONE),
        MarketType::Stocks | MarketType::Forex | MarketType::Crypto => specs
            .lot_multipliers
            .get(&trade.market)
            .copied()
            .unwrap_or(Decimal::ONE),
    }
}

/// Direction-adjusted price move per unit.
#[must_use]
pub fn directional_move(direction: TradeDirection, entry: Decimal, price: Decimal) -> Decimal {
    match direction {
        TradeDirection::Buy => price - entry,
        TradeDirection::Sell => entry - price,
    }
}

/// Gross P&L of a closed trade under the given contract conventions.
///
/// Returns `None` while the position is open. Partial exits are summed
/// leg by leg; the final exit price applies to the remaining quantity.
#[must_use]
pub fn gross_pnl(trade: &Trade, specs: &ContractSpecs) -> Option<Decimal> {
    let exit_price = trade.exit_price?;
    let multiplier = contract_multiplier(trade, specs);

    let mut pnl = Decimal::ZERO;
    let mut remaining = trade.quantity;

    for partial in &trade.partial_exits {
        let qty = partial.quantity.min(remaining);
        if qty <= Decimal::ZERO {
            break;
        }
        pnl += directional_move(trade.direction, trade.entry_price, partial.price) * qty;
        remaining -= qty;
    }

    if remaining > Decimal::ZERO {
        pnl += directional_move(trade.direction, trade.entry_price, exit_price) * remaining;
    }

    Some(pnl * multiplier)
}

/// Net P&L (gross minus commission) of a closed trade.
#[must_use]
pub fn net_pnl(trade: &Trade, specs: &ContractSpecs) -> Option<Decimal> {
    gross_pnl(trade, specs).map(|gross| gross - trade.commission)
}
