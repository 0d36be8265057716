//! Analytics configuration types.
//!
//! The engine takes all tunables as explicit structs passed by the caller;
//! there is no ambient or global state. Every field has a serde default so
//! callers can deserialize a partial config.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::trade::MarketType;

/// Per-market contract conventions for P&L resolution.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContractSpecs {
    /// Per-symbol futures contract multipliers (e.g., ES -> 50).
    pub futures_multipliers: HashMap<String, Decimal>,
    /// Optional per-market lot multipliers for Stocks/Forex/Crypto
    /// (e.g., standard FX lots). Unconfigured markets use 1.
    pub lot_multipliers: HashMap<MarketType, Decimal>,
}

/// Benchmark cutoffs used to grade metric cards.
///
/// Each pair is (good, warning): at or above `good` grades Good, at or
/// above `warning` grades Warning, below grades Danger. Drawdown is the
/// inverse (lower is better).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkThresholds {
    /// Win rate % cutoffs.
    pub win_rate_pct: (Decimal, Decimal),
    /// Profit factor cutoffs.
    pub profit_factor: (Decimal, Decimal),
    /// Sharpe ratio cutoffs.
    pub sharpe_ratio: (Decimal, Decimal),
    /// Max drawdown % cutoffs (lower is better).
    pub max_drawdown_pct: (Decimal, Decimal),
    /// Expectancy cutoffs (currency units).
    pub expectancy: (Decimal, Decimal),
    /// Consistency score cutoffs.
    pub consistency: (Decimal, Decimal),
}

impl Default for BenchmarkThresholds {
    fn default() -> Self {
        Self {
            win_rate_pct: (Decimal::new(50, 0), Decimal::new(40, 0)), // 50% / 40%
            profit_factor: (Decimal::new(15, 1), Decimal::new(1, 0)), // 1.5 / 1.0
            sharpe_ratio: (Decimal::new(1, 0), Decimal::new(5, 1)),   // 1.0 / 0.5
            max_drawdown_pct: (Decimal::new(10, 0), Decimal::new(20, 0)), // 10% / 20%
            expectancy: (Decimal::new(0, 0), Decimal::new(0, 0)),     // positive is good
            consistency: (Decimal::new(70, 0), Decimal::new(50, 0)),  // 70 / 50
        }
    }
}

/// Revenge-trading detection parameters.
///
/// The thresholds are deliberately configurable; the defaults are starting
/// points, not derived constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevengeConfig {
    /// Maximum number of trades inspected after a loss.
    pub window_trades: usize,
    /// Time bound of the detection window, in minutes from the loss exit.
    pub window_minutes: i64,
    /// Minimum number of indicators required to flag an incident.
    pub min_indicators: usize,
    /// Position-size spike threshold vs the trailing average notional.
    pub size_spike_factor: Decimal,
    /// Fast re-entry threshold vs the trailing average entry gap.
    pub fast_reentry_factor: Decimal,
    /// Trade-frequency spike threshold vs the baseline trades-per-hour.
    pub volume_spike_factor: Decimal,
    /// Aggressive-recovery threshold: notional increase over the trailing
    /// average, as a multiple of the triggering loss.
    pub recovery_ratio: Decimal,
}

impl Default for RevengeConfig {
    fn default() -> Self {
        Self {
            window_trades: 5,
            window_minutes: 120,
            min_indicators: 2,
            size_spike_factor: Decimal::new(15, 1),   // 1.5x
            fast_reentry_factor: Decimal::new(5, 1),  // 0.5x
            volume_spike_factor: Decimal::new(2, 0),  // 2x
            recovery_ratio: Decimal::new(1, 0),       // 1x the prior loss
        }
    }
}

/// Complete analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Starting equity for the reconstructed equity curve.
    pub starting_balance: Decimal,
    /// Annual risk-free rate (decimal, e.g. 0.04 = 4%/yr).
    pub risk_free_rate: Decimal,
    /// Trading days per year used for annualization.
    pub trading_days_per_year: Decimal,
    /// Fraction of capital whose loss defines ruin.
    pub ruin_threshold: Decimal,
    /// Metric grading cutoffs.
    pub benchmarks: BenchmarkThresholds,
    /// Revenge-trading detection parameters.
    pub revenge: RevengeConfig,
    /// Fraction of trades treated as outliers at each tail.
    pub outlier_decile: Decimal,
    /// Per-market contract conventions.
    pub contracts: ContractSpecs,
    /// Excursion distribution bucket edges, in % (strictly increasing).
    pub excursion_buckets: Vec<Decimal>,
    /// Tolerance (% of level) for counting an exit as a stop/target hit.
    pub slippage_tolerance_pct: Decimal,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            starting_balance: Decimal::new(10_000, 0),
            risk_free_rate: Decimal::new(4, 2),          // 0.04 = 4%/yr
            trading_days_per_year: Decimal::new(252, 0),
            ruin_threshold: Decimal::new(5, 1),          // 0.5 = half the capital
            benchmarks: BenchmarkThresholds::default(),
            revenge: RevengeConfig::default(),
            outlier_decile: Decimal::new(1, 1),          // 0.1 = top/bottom 10%
            contracts: ContractSpecs::default(),
            excursion_buckets: vec![
                Decimal::new(1, 0),
                Decimal::new(2, 0),
                Decimal::new(5, 0),
                Decimal::new(10, 0),
            ],
            slippage_tolerance_pct: Decimal::new(1, 1),  // 0.1%
        }
    }
}

impl AnalyticsConfig {
    /// Validate configuration bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_balance <= Decimal::ZERO {
            return Err(ConfigError::NonPositive {
                field: "starting_balance",
                value: self.starting_balance,
            });
        }
        if self.trading_days_per_year <= Decimal::ZERO {
            return Err(ConfigError::NonPositive {
                field: "trading_days_per_year",
                value: self.trading_days_per_year,
            });
        }
        Self::check_fraction("ruin_threshold", self.ruin_threshold)?;
        Self::check_fraction("outlier_decile", self.outlier_decile)?;
        if self.slippage_tolerance_pct <= Decimal::ZERO {
            return Err(ConfigError::NonPositive {
                field: "slippage_tolerance_pct",
                value: self.slippage_tolerance_pct,
            });
        }
        let mut prev = Decimal::ZERO;
        for edge in &self.excursion_buckets {
            if *edge <= prev {
                return Err(ConfigError::UnorderedBuckets);
            }
            prev = *edge;
        }
        Ok(())
    }

    fn check_fraction(field: &'static str, value: Decimal) -> Result<(), ConfigError> {
        if value <= Decimal::ZERO || value > Decimal::ONE {
            return Err(ConfigError::OutOfRange {
                field,
                value,
                min: Decimal::ZERO,
                max: Decimal::ONE,
            });
        }
        Ok(())
    }
}
