//! Revenge-trading incident detection.
//!
//! Every losing trade opens a detection window over the next few trades,
//! bounded both by trade count and by wall-clock minutes. An incident is
//! flagged when enough independent indicators fire inside the window;
//! winning trades never trigger a window.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::RevengeConfig;
use crate::metrics::mean;

use super::types::{RevengeIncident, RevengeIndicators, RevengeSeverity};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const SECONDS_PER_MINUTE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Trades inspected for the trailing baselines.
const TRAILING_WINDOW: usize = 10;

/// Incident penalties per severity band.
const PENALTY_LOW: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const PENALTY_MEDIUM: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
const PENALTY_HIGH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// A closed trade reduced to the fields the scan needs, in
/// exit-chronological order.
#[derive(Debug, Clone)]
pub struct TradePoint {
    /// Trade symbol.
    pub symbol: String,
    /// Entry timestamp.
    pub entry_time: DateTime<Utc>,
    /// Exit timestamp.
    pub exit_time: DateTime<Utc>,
    /// Entry notional (size proxy).
    pub notional: Decimal,
    /// Net P&L.
    pub net: Decimal,
}

/// Scan a chronological trade sequence for revenge-trading incidents.
///
/// Returns the incident list plus the 0-100 discipline sub-score
/// (100 = no incidents).
#[must_use]
pub fn detect(points: &[TradePoint], config: &RevengeConfig) -> (Vec<RevengeIncident>, Decimal) {
    if points.len() < 2 {
        return (Vec::new(), HUNDRED);
    }

    let baseline_win_rate = baseline_win_rate(points);
    let baseline_trades_per_hour = baseline_trades_per_hour(points);

    let mut incidents = Vec::new();

    for (idx, loss) in points.iter().enumerate() {
        if loss.net >= Decimal::ZERO {
            continue;
        }

        let window = collect_window(points, idx, config);
        if window.is_empty() {
            continue;
        }

        let trailing_start = idx.saturating_sub(TRAILING_WINDOW - 1);
        let trailing = &points[trailing_start..=idx];
        let indicators = evaluate_indicators(
            loss,
            &window,
            trailing,
            baseline_win_rate,
            baseline_trades_per_hour,
            config,
        );

        if indicators.count() >= config.min_indicators {
            let severity = severity_for(indicators.count(), config.min_indicators);
            warn!(
                symbol = %loss.symbol,
                trigger_loss = %loss.net,
                indicators = indicators.count(),
                severity = ?severity,
                "revenge-trading incident detected"
            );
            incidents.push(RevengeIncident {
                trigger_time: loss.exit_time,
                trigger_symbol: loss.symbol.clone(),
                trigger_loss: loss.net,
                indicators,
                severity,
                trades_in_window: window.len() as u64,
            });
        }
    }

    let score = discipline_score(&incidents);
    (incidents, score)
}

/// Trades after `idx` that fall inside the count and time bounds.
fn collect_window<'p>(
    points: &'p [TradePoint],
    idx: usize,
    config: &RevengeConfig,
) -> Vec<&'p TradePoint> {
    let loss_exit = points[idx].exit_time;
    points[idx + 1..]
        .iter()
        .take(config.window_trades)
        .take_while(|p| (p.entry_time - loss_exit).num_minutes() <= config.window_minutes)
        .collect()
}

fn evaluate_indicators(
    loss: &TradePoint,
    window: &[&TradePoint],
    trailing: &[TradePoint],
    baseline_win_rate: Decimal,
    baseline_trades_per_hour: Decimal,
    config: &RevengeConfig,
) -> RevengeIndicators {
    let trailing_notionals: Vec<Decimal> = trailing.iter().map(|p| p.notional).collect();
    let avg_notional = mean(&trailing_notionals).unwrap_or(Decimal::ZERO);

    let position_size_increase = avg_notional > Decimal::ZERO
        && window
            .iter()
            .any(|p| p.notional > config.size_spike_factor * avg_notional);

    let reduced_time_between_trades = match (trailing_entry_gap(trailing), window.first()) {
        (Some(avg_gap), Some(first)) if avg_gap > Decimal::ZERO => {
            minutes_between(loss.exit_time, first.entry_time) < config.fast_reentry_factor * avg_gap
        }
        _ => false,
    };

    let window_wins = window.iter().filter(|p| p.net > Decimal::ZERO).count();
    let window_win_rate =
        Decimal::from(window_wins as u64) / Decimal::from(window.len() as u64) * HUNDRED;
    let win_rate_below_baseline = window_win_rate < baseline_win_rate;

    let volume_spike = baseline_trades_per_hour > Decimal::ZERO
        && window_trades_per_hour(loss, window)
            .is_some_and(|rate| rate > config.volume_spike_factor * baseline_trades_per_hour);

    let aggressive_recovery = avg_notional > Decimal::ZERO
        && window
            .iter()
            .any(|p| p.notional - avg_notional >= config.recovery_ratio * loss.net.abs());

    RevengeIndicators {
        position_size_increase,
        reduced_time_between_trades,
        win_rate_below_baseline,
        volume_spike,
        aggressive_recovery,
    }
}

/// Overall win rate % (the trader's baseline).
fn baseline_win_rate(points: &[TradePoint]) -> Decimal {
    let wins = points.iter().filter(|p| p.net > Decimal::ZERO).count();
    Decimal::from(wins as u64) / Decimal::from(points.len() as u64) * HUNDRED
}

/// Overall trade frequency over the full history.
fn baseline_trades_per_hour(points: &[TradePoint]) -> Decimal {
    let Some(first) = points.first() else {
        return Decimal::ZERO;
    };
    let Some(last) = points.last() else {
        return Decimal::ZERO;
    };
    let seconds = (last.exit_time - first.entry_time).num_seconds();
    if seconds <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(points.len() as u64) / (Decimal::from(seconds) / SECONDS_PER_HOUR)
}

/// Trade frequency inside the window, from the loss exit to the last
/// window entry.
fn window_trades_per_hour(loss: &TradePoint, window: &[&TradePoint]) -> Option<Decimal> {
    let last = window.last()?;
    let seconds = (last.entry_time - loss.exit_time).num_seconds();
    // Sub-minute spans are floored to one minute so a tight burst reads
    // as a high finite rate instead of dividing by nothing.
    let seconds = seconds.max(60);
    Some(Decimal::from(window.len() as u64) / (Decimal::from(seconds) / SECONDS_PER_HOUR))
}

/// Mean entry-to-entry gap over the trailing trades, in minutes.
fn trailing_entry_gap(trailing: &[TradePoint]) -> Option<Decimal> {
    if trailing.len() < 2 {
        return None;
    }
    let gaps: Vec<Decimal> = trailing
        .windows(2)
        .map(|pair| minutes_between(pair[0].entry_time, pair[1].entry_time))
        .collect();
    mean(&gaps)
}

fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> Decimal {
    Decimal::from((to - from).num_seconds().max(0)) / SECONDS_PER_MINUTE
}

const fn severity_for(count: usize, min_indicators: usize) -> RevengeSeverity {
    if count >= min_indicators + 2 {
        RevengeSeverity::High
    } else if count == min_indicators + 1 {
        RevengeSeverity::Medium
    } else {
        RevengeSeverity::Low
    }
}

/// 100 minus severity-weighted incident penalties, floored at 0.
fn discipline_score(incidents: &[RevengeIncident]) -> Decimal {
    let penalty: Decimal = incidents
        .iter()
        .map(|incident| match incident.severity {
            RevengeSeverity::Low => PENALTY_LOW,
            RevengeSeverity::Medium => PENALTY_MEDIUM,
            RevengeSeverity::High => PENALTY_HIGH,
        })
        .sum();
    (HUNDRED - penalty).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ts(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap() + chrono::Duration::minutes(minute)
    }

    fn point(entry_min: i64, exit_min: i64, notional: Decimal, net: Decimal) -> TradePoint {
        TradePoint {
            symbol: "NQ".to_string(),
            entry_time: ts(entry_min),
            exit_time: ts(exit_min),
            notional,
            net,
        }
    }

    /// Calm sequence: evenly spaced winners, stable size.
    fn calm_history() -> Vec<TradePoint> {
        (0..6)
            .map(|i| point(i * 30, i * 30 + 20, dec!(10000), dec!(100)))
            .collect()
    }

    #[test]
    fn test_no_incidents_without_losses() {
        let config = RevengeConfig::default();
        let (incidents, score) = detect(&calm_history(), &config);
        assert!(incidents.is_empty());
        assert_eq!(score, dec!(100));
    }

    #[test]
    fn test_scenario_d_size_spike_and_fast_reentry() {
        // Evenly spaced 30-minute entries, then a loss followed by a
        // sub-minute re-entry and a size-doubled trade inside the run.
        let mut points = vec![
            point(0, 20, dec!(10000), dec!(100)),
            point(30, 50, dec!(10000), dec!(120)),
            point(60, 80, dec!(10000), dec!(90)),
            // The triggering loss.
            point(90, 110, dec!(10000), dec!(-300)),
        ];
        // Losing run: re-entry under a minute after the loss exit,
        // doubled size on the third trade of the run.
        points.push(point(110, 115, dec!(10000), dec!(-100)));
        points.push(point(118, 124, dec!(10000), dec!(-150)));
        points.push(point(126, 133, dec!(20000), dec!(-200)));
        points.push(point(140, 150, dec!(10000), dec!(-80)));
        points.push(point(155, 165, dec!(10000), dec!(-60)));

        let config = RevengeConfig::default();
        let (incidents, score) = detect(&points, &config);

        assert!(!incidents.is_empty());
        let incident = &incidents[0];
        assert_eq!(incident.trigger_loss, dec!(-300));
        assert!(incident.indicators.position_size_increase);
        assert!(incident.indicators.reduced_time_between_trades);
        assert!(incident.indicators.win_rate_below_baseline);
        assert!(score < dec!(100));
    }

    #[test]
    fn test_incidents_only_follow_losses() {
        let mut points = calm_history();
        // One aggressive burst after a WIN must not flag anything.
        points.push(point(181, 185, dec!(30000), dec!(50)));
        let config = RevengeConfig::default();
        let (incidents, _) = detect(&points, &config);
        assert!(incidents.is_empty());
    }

    #[test]
    fn test_window_respects_time_bound() {
        // A loss whose next trade starts past the window_minutes bound.
        let points = vec![
            point(0, 20, dec!(10000), dec!(100)),
            point(30, 50, dec!(10000), dec!(-200)),
            point(300, 320, dec!(20000), dec!(-100)), // 250 min later
        ];
        let config = RevengeConfig::default();
        let (incidents, _) = detect(&points, &config);
        assert!(incidents.is_empty());
    }

    #[test]
    fn test_isolated_loss_with_calm_followup_not_flagged() {
        let points = vec![
            point(0, 20, dec!(10000), dec!(100)),
            point(30, 50, dec!(10000), dec!(-80)),
            point(60, 80, dec!(10000), dec!(110)),
            point(90, 110, dec!(10000), dec!(95)),
        ];
        let config = RevengeConfig::default();
        let (incidents, score) = detect(&points, &config);
        assert!(incidents.is_empty());
        assert_eq!(score, dec!(100));
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(severity_for(2, 2), RevengeSeverity::Low);
        assert_eq!(severity_for(3, 2), RevengeSeverity::Medium);
        assert_eq!(severity_for(4, 2), RevengeSeverity::High);
        assert_eq!(severity_for(5, 2), RevengeSeverity::High);
    }
}
