//! Trade input records for the analytics engine.
//!
//! A [`Trade`] is an immutable record supplied by the caller (the storage
//! layer); the engine never mutates it. Optional fields carry explicit
//! nullability: an open position has no exit price, a trade without a
//! planned stop has no stop-loss, and so on.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TradeError;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    /// Long position (profit when price rises).
    Buy,
    /// Short position (profit when price falls).
    Sell,
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Market the trade was executed in.
///
/// Drives per-market contract conventions in P&L resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketType {
    /// Cash equities.
    Stocks,
    /// Option contracts (100 underlying units per contract).
    Options,
    /// Futures contracts (per-symbol multiplier).
    Futures,
    /// Spot FX.
    Forex,
    /// Crypto spot.
    Crypto,
}

impl MarketType {
    /// All market types, in display order.
    pub const ALL: [Self; 5] = [
        Self::Stocks,
        Self::Options,
        Self::Futures,
        Self::Forex,
        Self::Crypto,
    ];
}

impl std::fmt::Display for MarketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Stocks => "STOCKS",
            Self::Options => "OPTIONS",
            Self::Futures => "FUTURES",
            Self::Forex => "FOREX",
            Self::Crypto => "CRYPTO",
        };
        write!(f, "{name}")
    }
}

/// A partial exit leg closed before the final exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialExit {
    /// Fill price of the partial exit.
    pub price: Decimal,
    /// Quantity closed by this leg.
    pub quantity: Decimal,
    /// Fill timestamp.
    pub time: DateTime<Utc>,
}

/// An intraperiod price sample between entry and exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Sample timestamp.
    pub time: DateTime<Utc>,
    /// Observed price.
    pub price: Decimal,
}

/// An immutable trade record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Instrument symbol.
    pub symbol: String,
    /// Position direction.
    pub direction: TradeDirection,
    /// Entry fill price (> 0).
    pub entry_price: Decimal,
    /// Exit fill price; `None` while the position is open.
    #[serde(default)]
    pub exit_price: Option<Decimal>,
    /// Position quantity (> 0). Shares, contracts, lots or coins
    /// depending on `market`.
    pub quantity: Decimal,
    /// Entry timestamp.
    pub entry_time: DateTime<Utc>,
    /// Exit timestamp; `None` while the position is open.
    #[serde(default)]
    pub exit_time: Option<DateTime<Utc>>,
    /// Market the trade belongs to.
    pub market: MarketType,
    /// Total commission paid on the trade.
    #[serde(default)]
    pub commission: Decimal,
    /// Price the trader intended to enter at (for slippage analysis).
    #[serde(default)]
    pub intended_entry: Option<Decimal>,
    /// Price the trader intended to exit at (for slippage analysis).
    #[serde(default)]
    pub intended_exit: Option<Decimal>,
    /// Planned stop-loss level.
    #[serde(default)]
    pub stop_loss: Option<Decimal>,
    /// Planned take-profit level.
    #[serde(default)]
    pub take_profit: Option<Decimal>,
    /// Partial exits closed before the final exit.
    #[serde(default)]
    pub partial_exits: Vec<PartialExit>,
    /// Optional provided intraperiod price samples for excursion
    /// reconstruction.
    #[serde(default)]
    pub price_path: Vec<PricePoint>,
}

impl Trade {
    /// Whether the position has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.exit_price.is_some()
    }

    /// Position notional at entry (entry price x quantity).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.entry_price * self.quantity
    }

    /// Holding period in hours; `None` while open.
    #[must_use]
    pub fn holding_period_hours(&self) -> Option<Decimal> {
        let exit = self.exit_time?;
        let seconds = (exit - self.entry_time).num_seconds();
        if seconds < 0 {
            return None;
        }
        Some(Decimal::from(seconds) / Decimal::from(3600_u32))
    }

    /// Validate the record's structural invariants.
    pub fn validate(&self) -> Result<(), TradeError> {
        if self.entry_price <= Decimal::ZERO {
            return Err(TradeError::NonPositiveEntryPrice {
                symbol: self.symbol.clone(),
                price: self.entry_price,
            });
        }
        if self.quantity <= Decimal::ZERO {
            return Err(TradeError::NonPositiveQuantity {
                symbol: self.symbol.clone(),
                quantity: self.quantity,
            });
        }
        if self.exit_price.is_some() != self.exit_time.is_some() {
            return Err(TradeError::PartialExitState {
                symbol: self.symbol.clone(),
            });
        }
        if let Some(exit_time) = self.exit_time {
            if exit_time < self.entry_time {
                return Err(TradeError::ExitBeforeEntry {
                    symbol: self.symbol.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Filter to closed, well-formed trades, warning on exclusions.
///
/// Every analyzer operates on this subset; malformed or open records are
/// skipped rather than failing the batch.
pub fn closed_valid(trades: &[Trade]) -> Vec<&Trade> {
    trades
        .iter()
        .filter(|trade| {
            if let Err(err) = trade.validate() {
                tracing::warn!(symbol = %trade.symbol, reason = %err, "excluding malformed trade");
                return false;
            }
            trade.is_closed()
        })
        .collect()
}
