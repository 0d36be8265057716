//! Composite Volt Score.
//!
//! Six sub-scores, each normalized to 0-100, blended with fixed weights:
//! win rate 20%, profit factor 20%, risk/reward 15%, consistency 20%,
//! recovery 15%, discipline 10%.

use rust_decimal::Decimal;

use crate::metrics::{MetricValue, MetricsReport};

use super::types::{ScoreBreakdown, ScoreLabel, VoltScore};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

const WEIGHT_WIN_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2); // 0.20
const WEIGHT_PROFIT_FACTOR: Decimal = Decimal::from_parts(20, 0, 0, false, 2); // 0.20
const WEIGHT_RISK_REWARD: Decimal = Decimal::from_parts(15, 0, 0, false, 2); // 0.15
const WEIGHT_CONSISTENCY: Decimal = Decimal::from_parts(20, 0, 0, false, 2); // 0.20
const WEIGHT_RECOVERY: Decimal = Decimal::from_parts(15, 0, 0, false, 2); // 0.15
const WEIGHT_DISCIPLINE: Decimal = Decimal::from_parts(10, 0, 0, false, 2); // 0.10

/// Ratio value that maps to a full sub-score (profit factor / payoff).
const RATIO_FULL_SCORE: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Recovery factor that maps to a full recovery sub-score.
const RECOVERY_FULL_SCORE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Compute the composite Volt Score.
///
/// `consistency_score` comes from daily analysis, `revenge_score` from
/// incident detection, `stop_compliance_pct` is the share of closed
/// trades that carried a stop-loss (the rule-compliance proxy).
#[must_use]
pub fn compute(
    metrics: &MetricsReport,
    consistency_score: Decimal,
    revenge_score: Decimal,
    stop_compliance_pct: Decimal,
) -> VoltScore {
    let breakdown = ScoreBreakdown {
        win_rate: metrics.win_rate_pct.clamp(Decimal::ZERO, HUNDRED),
        profit_factor: ratio_score(metrics.profit_factor),
        risk_reward: ratio_score(metrics.payoff_ratio),
        consistency: consistency_score.clamp(Decimal::ZERO, HUNDRED),
        recovery: recovery_score(revenge_score, metrics.recovery_factor),
        discipline: stop_compliance_pct.clamp(Decimal::ZERO, HUNDRED),
    };

    let value = (WEIGHT_WIN_RATE * breakdown.win_rate
        + WEIGHT_PROFIT_FACTOR * breakdown.profit_factor
        + WEIGHT_RISK_REWARD * breakdown.risk_reward
        + WEIGHT_CONSISTENCY * breakdown.consistency
        + WEIGHT_RECOVERY * breakdown.recovery
        + WEIGHT_DISCIPLINE * breakdown.discipline)
        .clamp(Decimal::ZERO, HUNDRED);

    VoltScore {
        value,
        label: ScoreLabel::for_score(value),
        breakdown,
    }
}

/// Map a tagged ratio to 0-100: full score at [`RATIO_FULL_SCORE`],
/// linear below, `Infinite` scores 100, `Undefined` scores 0.
fn ratio_score(value: MetricValue) -> Decimal {
    match value {
        MetricValue::Finite(v) => (v / RATIO_FULL_SCORE * HUNDRED).clamp(Decimal::ZERO, HUNDRED),
        MetricValue::Infinite => HUNDRED,
        MetricValue::Undefined => Decimal::ZERO,
    }
}

/// Blend inverse revenge severity with drawdown recovery speed.
fn recovery_score(revenge_score: Decimal, recovery_factor: Decimal) -> Decimal {
    let drawdown_component = if recovery_factor <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        (recovery_factor / RECOVERY_FULL_SCORE * HUNDRED).clamp(Decimal::ZERO, HUNDRED)
    };
    let blended = (revenge_score.clamp(Decimal::ZERO, HUNDRED) + drawdown_component) / Decimal::TWO;
    blended.clamp(Decimal::ZERO, HUNDRED)
}
