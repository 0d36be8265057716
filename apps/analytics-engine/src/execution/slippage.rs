//! Direction-adjusted slippage math.
//!
//! Fill-vs-intention deviation is signed so that positive always means a
//! worse fill than intended, regardless of side: a long pays up on entry
//! and sells down on exit, a short mirrors both.

use rust_decimal::Decimal;

use crate::trade::{Trade, TradeDirection};

use super::types::SlippageRecord;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Entry slippage % vs the intended entry price.
///
/// `None` without an intended entry (or a degenerate intended price).
#[must_use]
pub fn entry_slippage_pct(trade: &Trade) -> Option<Decimal> {
    let intended = trade.intended_entry?;
    if intended <= Decimal::ZERO {
        return None;
    }
    // Entering long means buying: paying above intent is adverse.
    // Entering short means selling: filling below intent is adverse.
    let adverse = match trade.direction {
        TradeDirection::Buy => trade.entry_price - intended,
        TradeDirection::Sell => intended - trade.entry_price,
    };
    Some(adverse / intended * HUNDRED)
}

/// Exit slippage % vs the intended exit price.
///
/// `None` without an intended exit, or while the position is open.
#[must_use]
pub fn exit_slippage_pct(trade: &Trade) -> Option<Decimal> {
    let intended = trade.intended_exit?;
    let actual = trade.exit_price?;
    if intended <= Decimal::ZERO {
        return None;
    }
    // Exiting reverses the side: a long sells to close, a short buys to
    // cover.
    let adverse = match trade.direction {
        TradeDirection::Buy => intended - actual,
        TradeDirection::Sell => actual - intended,
    };
    Some(adverse / intended * HUNDRED)
}

/// Per-trade slippage record; `None` when neither side was measurable.
#[must_use]
pub fn slippage_record(trade: &Trade) -> Option<SlippageRecord> {
    let entry = entry_slippage_pct(trade);
    let exit = exit_slippage_pct(trade);
    if entry.is_none() && exit.is_none() {
        return None;
    }

    let total_slippage_pct =
        entry.unwrap_or(Decimal::ZERO) + exit.unwrap_or(Decimal::ZERO);
    let cost = total_slippage_pct / HUNDRED * trade.notional();

    Some(SlippageRecord {
        symbol: trade.symbol.clone(),
        market: trade.market,
        entry_slippage_pct: entry,
        exit_slippage_pct: exit,
        total_slippage_pct,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::MarketType;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn make_trade(
        direction: TradeDirection,
        entry: Decimal,
        intended_entry: Option<Decimal>,
        exit: Option<Decimal>,
        intended_exit: Option<Decimal>,
    ) -> Trade {
        Trade {
            symbol: "EURUSD".to_string(),
            direction,
            entry_price: entry,
            exit_price: exit,
            quantity: dec!(100),
            entry_time: Utc.with_ymd_and_hms(2024, 4, 8, 8, 0, 0).unwrap(),
            exit_time: exit.map(|_| Utc.with_ymd_and_hms(2024, 4, 8, 12, 0, 0).unwrap()),
            market: MarketType::Forex,
            commission: Decimal::ZERO,
            intended_entry,
            intended_exit,
            stop_loss: None,
            take_profit: None,
            partial_exits: Vec::new(),
            price_path: Vec::new(),
        }
    }

    #[test]
    fn test_long_entry_pays_up_is_positive() {
        let trade = make_trade(TradeDirection::Buy, dec!(100.50), Some(dec!(100)), None, None);
        assert_eq!(entry_slippage_pct(&trade), Some(dec!(0.50)));
    }

    #[test]
    fn test_short_entry_fills_down_is_positive() {
        let trade = make_trade(TradeDirection::Sell, dec!(99.50), Some(dec!(100)), None, None);
        assert_eq!(entry_slippage_pct(&trade), Some(dec!(0.50)));
    }

    #[test]
    fn test_price_improvement_is_negative() {
        let trade = make_trade(TradeDirection::Buy, dec!(99), Some(dec!(100)), None, None);
        assert_eq!(entry_slippage_pct(&trade), Some(dec!(-1)));
    }

    #[test]
    fn test_long_exit_sells_down_is_positive() {
        let trade = make_trade(
            TradeDirection::Buy,
            dec!(100),
            None,
            Some(dec!(104)),
            Some(dec!(105)),
        );
        // Wanted 105, got 104: 1/105 ~ 0.952% adverse.
        let Some(slip) = exit_slippage_pct(&trade) else {
            panic!("exit slippage should be measured");
        };
        assert!(slip > dec!(0.95) && slip < dec!(0.96));
    }

    #[test]
    fn test_short_exit_covers_up_is_positive() {
        let trade = make_trade(
            TradeDirection::Sell,
            dec!(100),
            None,
            Some(dec!(96)),
            Some(dec!(95)),
        );
        let Some(slip) = exit_slippage_pct(&trade) else {
            panic!("exit slippage should be measured");
        };
        assert!(slip > dec!(1.05) && slip < dec!(1.06));
    }

    #[test]
    fn test_open_trade_has_no_exit_slippage() {
        let trade = make_trade(TradeDirection::Buy, dec!(100), None, None, Some(dec!(105)));
        assert_eq!(exit_slippage_pct(&trade), None);
    }

    #[test]
    fn test_record_requires_an_intention() {
        let unmeasured = make_trade(TradeDirection::Buy, dec!(100), None, Some(dec!(105)), None);
        assert!(slippage_record(&unmeasured).is_none());

        let measured = make_trade(
            TradeDirection::Buy,
            dec!(100.50),
            Some(dec!(100)),
            Some(dec!(105)),
            None,
        );
        let Some(record) = slippage_record(&measured) else {
            panic!("record should exist with an intended entry");
        };
        assert_eq!(record.entry_slippage_pct, Some(dec!(0.50)));
        assert_eq!(record.exit_slippage_pct, None);
        assert_eq!(record.total_slippage_pct, dec!(0.50));
        // 0.5% of 10050 notional
        assert_eq!(record.cost, dec!(50.250));
    }
}
