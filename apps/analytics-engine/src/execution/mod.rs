//! Execution-quality analysis.
//!
//! Measures how well orders were filled relative to intent: entry and
//! exit slippage against intended prices, stop and target hit rates
//! within a configured tolerance, and commission drag. The dimensions
//! blend into a single 0-100 execution score.

mod calculator;
mod costs;
mod slippage;
mod types;

pub use calculator::ExecutionAnalyzer;
pub use costs::{break_even_move_pct, commission_impact};
pub use slippage::{entry_slippage_pct, exit_slippage_pct, slippage_record};
pub use types::{
    CommissionImpact, ExecutionReport, HitRates, MarketBreakEven, MarketSlippage, SlippageRecord,
    SlippageSummary,
};
