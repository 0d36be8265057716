//! Calendar-day aggregation and consistency scoring.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::metrics::{coefficient_of_variation, cov_score, mean, std_dev};

use super::types::{DailyConsistency, DayRecord};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Coefficient-of-variation cap: beyond this the stability component
/// scores zero.
const COV_CAP: Decimal = Decimal::TWO;

/// Weight of the profitable-days component in the consistency score.
const PROFITABLE_DAYS_WEIGHT: Decimal = Decimal::from_parts(6, 0, 0, false, 1); // 0.6

/// Aggregate net P&L per UTC calendar day and score consistency.
///
/// Input pairs are (exit date, net P&L) for each closed trade.
#[must_use]
pub fn analyze(outcomes: &[(NaiveDate, Decimal)]) -> DailyConsistency {
    if outcomes.is_empty() {
        return DailyConsistency::default();
    }

    let mut by_day: BTreeMap<NaiveDate, (Decimal, u64)> = BTreeMap::new();
    for (date, pnl) in outcomes {
        let entry = by_day.entry(*date).or_insert((Decimal::ZERO, 0));
        entry.0 += *pnl;
        entry.1 += 1;
    }

    let days: Vec<DayRecord> = by_day
        .into_iter()
        .map(|(date, (pnl, trades))| DayRecord { date, pnl, trades })
        .collect();

    let pnls: Vec<Decimal> = days.iter().map(|d| d.pnl).collect();
    let profitable = days.iter().filter(|d| d.pnl > Decimal::ZERO).count() as u64;
    let profitable_days_pct =
        Decimal::from(profitable) / Decimal::from(days.len() as u64) * HUNDRED;

    let cov = coefficient_of_variation(&pnls);
    let day_sharpe = match (mean(&pnls), std_dev(&pnls)) {
        (Some(avg), Some(std)) if std > Decimal::ZERO => Some(avg / std),
        _ => None,
    };

    let score = consistency_score(&pnls, profitable_days_pct, cov);

    DailyConsistency {
        days,
        profitable_days_pct,
        coefficient_of_variation: cov,
        day_sharpe,
        score,
    }
}

/// Blend profitable-days share with P&L stability into a 0-100 score.
fn consistency_score(
    pnls: &[Decimal],
    profitable_days_pct: Decimal,
    cov: Option<Decimal>,
) -> Decimal {
    let avg = mean(pnls).unwrap_or(Decimal::ZERO);
    if avg <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    // A single profitable day has no variation to penalize.
    let stability = if pnls.len() < 2 {
        HUNDRED
    } else {
        cov.map_or(Decimal::ZERO, |c| cov_score(c, COV_CAP))
    };

    let blended = PROFITABLE_DAYS_WEIGHT * profitable_days_pct
        + (Decimal::ONE - PROFITABLE_DAYS_WEIGHT) * stability;
    blended.clamp(Decimal::ZERO, HUNDRED)
}
