// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Analytics Engine - Rust Core Library
//!
//! Trading-performance analytics for the Volt trading journal.
//!
//! # Architecture
//!
//! Pure batch computation over an in-memory trade collection. The library
//! performs no I/O; callers hand it a `&[Trade]` and an [`AnalyticsConfig`]
//! and get immutable reports back. Every analyzer recomputes from scratch
//! per call and never mutates its input.
//!
//! ## Components
//!
//! - `pnl`: per-market gross/net P&L resolution (contract multipliers,
//!   partial exits)
//! - `metrics`: performance and risk statistics (win rate, profit factor,
//!   drawdown, Sharpe/Sortino/Calmar, Kelly, risk of ruin)
//! - `excursion`: per-trade MAE/MFE, edge ratio, exit efficiency
//! - `behavior`: streaks, daily consistency, revenge-trade detection,
//!   outlier dependence, Volt Score
//! - `execution`: slippage, stop/target hit rates, commission drag,
//!   execution score
//! - `report`: dashboard cards, text/CSV/JSON export
//! - `parallel`: Rayon helpers for large trade collections

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod behavior;
pub mod config;
pub mod error;
pub mod excursion;
pub mod execution;
pub mod metrics;
pub mod parallel;
pub mod pnl;
pub mod report;
pub mod trade;

pub use behavior::{BehavioralAnalyzer, BehavioralSnapshot, VoltScore};
pub use config::{AnalyticsConfig, BenchmarkThresholds, ContractSpecs, RevengeConfig};
pub use error::{ConfigError, TradeError};
pub use excursion::{ExcursionAnalyzer, ExcursionRecord, ExcursionSummary};
pub use execution::{ExecutionAnalyzer, ExecutionReport};
pub use metrics::{MetricValue, MetricsCalculator, MetricsReport};
pub use report::{AnalyticsReport, MetricResult, analyze};
pub use trade::{MarketType, Trade, TradeDirection};
