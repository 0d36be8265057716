//! Result types for behavioral analysis.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of a streak of consecutive same-sign outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreakKind {
    /// Consecutive wins (net P&L >= 0).
    Win,
    /// Consecutive losses (net P&L < 0).
    Loss,
    /// No closed trades yet.
    #[default]
    None,
}

/// The streak the trader is currently in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CurrentStreak {
    /// Win, loss, or none.
    pub kind: StreakKind,
    /// Trades in the streak.
    pub count: u64,
    /// Cumulative net P&L since the streak started.
    pub pnl: Decimal,
}

/// Streak statistics over the full trade history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StreakSummary {
    /// The streak in progress at the most recent trade.
    pub current: CurrentStreak,
    /// Longest run of consecutive wins.
    pub longest_win_streak: u64,
    /// Longest run of consecutive losses.
    pub longest_loss_streak: u64,
    /// Mean length of win streaks.
    pub avg_win_streak: Decimal,
    /// Mean length of loss streaks.
    pub avg_loss_streak: Decimal,
}

/// One calendar day of behavioral aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Calendar day (UTC).
    pub date: NaiveDate,
    /// Net P&L over the day.
    pub pnl: Decimal,
    /// Trades closed that day.
    pub trades: u64,
}

/// Daily consistency statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DailyConsistency {
    /// Per-day P&L series in date order.
    pub days: Vec<DayRecord>,
    /// Percentage of profitable days.
    pub profitable_days_pct: Decimal,
    /// Coefficient of variation of daily P&L (lower is better);
    /// `None` when undefined.
    pub coefficient_of_variation: Option<Decimal>,
    /// Day-level Sharpe-like ratio (mean / std dev of daily P&L).
    pub day_sharpe: Option<Decimal>,
    /// Bounded 0-100 consistency score.
    pub score: Decimal,
}

/// Which revenge indicators fired inside a detection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RevengeIndicators {
    /// Position size spiked vs the trailing average.
    pub position_size_increase: bool,
    /// Re-entry came unusually fast after the loss.
    pub reduced_time_between_trades: bool,
    /// Win rate inside the window fell below the trader's baseline.
    pub win_rate_below_baseline: bool,
    /// Trade frequency spiked vs the baseline.
    pub volume_spike: bool,
    /// Sizing escalated enough to recover the prior loss in one go.
    pub aggressive_recovery: bool,
}

impl RevengeIndicators {
    /// Number of indicators that fired.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.position_size_increase as usize
            + self.reduced_time_between_trades as usize
            + self.win_rate_below_baseline as usize
            + self.volume_spike as usize
            + self.aggressive_recovery as usize
    }
}

/// Severity of a revenge-trading incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevengeSeverity {
    /// Exactly the minimum indicator count.
    Low,
    /// One indicator above the minimum.
    Medium,
    /// Two or more indicators above the minimum.
    High,
}

/// A flagged revenge-trading incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevengeIncident {
    /// Exit time of the triggering loss.
    pub trigger_time: DateTime<Utc>,
    /// Symbol of the triggering loss.
    pub trigger_symbol: String,
    /// Net P&L of the triggering loss (negative).
    pub trigger_loss: Decimal,
    /// Indicators observed in the window.
    pub indicators: RevengeIndicators,
    /// Incident severity from the indicator count.
    pub severity: RevengeSeverity,
    /// Trades inspected inside the window.
    pub trades_in_window: u64,
}

/// Outlier dependency analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutlierAnalysis {
    /// Largest single winning trade.
    pub largest_win: Decimal,
    /// Largest single losing trade (negative).
    pub largest_loss: Decimal,
    /// Total net P&L over all closed trades.
    pub total_pnl: Decimal,
    /// Total net P&L with the top and bottom decile removed.
    pub pnl_without_outliers: Decimal,
    /// |decile P&L contribution| / |total P&L|, as %; 0 when total is 0.
    pub outlier_ratio_pct: Decimal,
    /// Trades counted as outliers (both tails).
    pub outlier_trades: u64,
}

/// Qualitative label for a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreLabel {
    /// Score >= 80.
    Excellent,
    /// Score >= 60.
    Good,
    /// Score >= 40.
    Average,
    /// Score < 40.
    NeedsImprovement,
}

impl ScoreLabel {
    /// Label for a 0-100 score.
    #[must_use]
    pub fn for_score(score: Decimal) -> Self {
        if score >= Decimal::from(80_u32) {
            Self::Excellent
        } else if score >= Decimal::from(60_u32) {
            Self::Good
        } else if score >= Decimal::from(40_u32) {
            Self::Average
        } else {
            Self::NeedsImprovement
        }
    }
}

impl std::fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Average => write!(f, "Average"),
            Self::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

/// The six weighted sub-scores behind the Volt Score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoreBreakdown {
    /// Win rate sub-score (weight 20%).
    pub win_rate: Decimal,
    /// Profit factor sub-score (weight 20%).
    pub profit_factor: Decimal,
    /// Risk/reward sub-score (weight 15%).
    pub risk_reward: Decimal,
    /// Daily consistency sub-score (weight 20%).
    pub consistency: Decimal,
    /// Recovery sub-score (weight 15%).
    pub recovery: Decimal,
    /// Discipline sub-score (weight 10%).
    pub discipline: Decimal,
}

/// Composite 0-100 trading-discipline score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltScore {
    /// Weighted composite, clamped to [0, 100].
    pub value: Decimal,
    /// Qualitative band.
    pub label: ScoreLabel,
    /// Sub-score breakdown.
    pub breakdown: ScoreBreakdown,
}

impl Default for VoltScore {
    fn default() -> Self {
        Self {
            value: Decimal::ZERO,
            label: ScoreLabel::NeedsImprovement,
            breakdown: ScoreBreakdown::default(),
        }
    }
}

/// Full behavioral snapshot over an ordered trade sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralSnapshot {
    /// Streak statistics.
    pub streaks: StreakSummary,
    /// Daily consistency statistics.
    pub daily: DailyConsistency,
    /// Revenge-trading incidents in chronological order.
    pub revenge_incidents: Vec<RevengeIncident>,
    /// 0-100 discipline sub-score from incident severity (100 = clean).
    pub revenge_score: Decimal,
    /// Outlier dependency analysis.
    pub outliers: OutlierAnalysis,
    /// Composite Volt Score.
    pub volt_score: VoltScore,
}

impl Default for BehavioralSnapshot {
    fn default() -> Self {
        Self {
            streaks: StreakSummary::default(),
            daily: DailyConsistency::default(),
            revenge_incidents: Vec::new(),
            // No incidents means a clean discipline score, not a failing one.
            revenge_score: Decimal::ONE_HUNDRED,
            outliers: OutlierAnalysis::default(),
            volt_score: VoltScore::default(),
        }
    }
}
