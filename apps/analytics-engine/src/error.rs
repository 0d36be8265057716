//! Error taxonomy for the analytics engine.
//!
//! Malformed trades are excluded per computation (never fatal); invalid
//! configuration is rejected up front. Compute entry points themselves
//! cannot fail on well-typed input and return plain values.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failure for a single trade record.
///
/// A trade failing validation is excluded from the affected computation
/// after a `warn!`; the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    /// Entry price must be strictly positive.
    #[error("trade {symbol}: entry price {price} must be positive")]
    NonPositiveEntryPrice {
        /// Trade symbol.
        symbol: String,
        /// Offending price.
        price: Decimal,
    },

    /// Quantity must be strictly positive.
    #[error("trade {symbol}: quantity {quantity} must be positive")]
    NonPositiveQuantity {
        /// Trade symbol.
        symbol: String,
        /// Offending quantity.
        quantity: Decimal,
    },

    /// Exit timestamp precedes entry timestamp.
    #[error("trade {symbol}: exit time precedes entry time")]
    ExitBeforeEntry {
        /// Trade symbol.
        symbol: String,
    },

    /// Closed trade missing an exit timestamp (or vice versa).
    #[error("trade {symbol}: exit price and exit time must be set together")]
    PartialExitState {
        /// Trade symbol.
        symbol: String,
    },
}

/// Invalid analytics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A value that must be strictly positive was not.
    #[error("config field {field}: {value} must be positive")]
    NonPositive {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// A fractional value fell outside its permitted range.
    #[error("config field {field}: {value} must be within ({min}, {max}]")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
        /// Lower bound (exclusive).
        min: Decimal,
        /// Upper bound (inclusive).
        max: Decimal,
    },

    /// Excursion bucket edges must be strictly increasing.
    #[error("config field excursion_buckets: edges must be strictly increasing and positive")]
    UnorderedBuckets,
}
