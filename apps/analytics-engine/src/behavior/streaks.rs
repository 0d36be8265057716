//! Win/loss streak detection.
//!
//! Streak convention: a win is net P&L >= 0, so every closed trade
//! belongs to exactly one streak and streak lengths partition the
//! sequence.

use rust_decimal::Decimal;

use super::types::{CurrentStreak, StreakKind, StreakSummary};

/// Detect streaks over net P&L outcomes in chronological order.
#[must_use]
pub fn detect(outcomes: &[Decimal]) -> StreakSummary {
    if outcomes.is_empty() {
        return StreakSummary::default();
    }

    let mut win_streaks: Vec<u64> = Vec::new();
    let mut loss_streaks: Vec<u64> = Vec::new();
    let mut run_kind = kind_of(outcomes[0]);
    let mut run_len = 0u64;

    for outcome in outcomes {
        let kind = kind_of(*outcome);
        if kind == run_kind {
            run_len += 1;
        } else {
            push_run(&mut win_streaks, &mut loss_streaks, run_kind, run_len);
            run_kind = kind;
            run_len = 1;
        }
    }
    push_run(&mut win_streaks, &mut loss_streaks, run_kind, run_len);

    // Current streak: the trailing run, with its cumulative P&L.
    let current_kind = kind_of(outcomes[outcomes.len() - 1]);
    let mut current_count = 0u64;
    let mut current_pnl = Decimal::ZERO;
    for outcome in outcomes.iter().rev() {
        if kind_of(*outcome) != current_kind {
            break;
        }
        current_count += 1;
        current_pnl += *outcome;
    }

    StreakSummary {
        current: CurrentStreak {
            kind: current_kind,
            count: current_count,
            pnl: current_pnl,
        },
        longest_win_streak: win_streaks.iter().copied().max().unwrap_or(0),
        longest_loss_streak: loss_streaks.iter().copied().max().unwrap_or(0),
        avg_win_streak: avg_len(&win_streaks),
        avg_loss_streak: avg_len(&loss_streaks),
    }
}

fn kind_of(pnl: Decimal) -> StreakKind {
    if pnl.is_sign_negative() && !pnl.is_zero() {
        StreakKind::Loss
    } else {
        StreakKind::Win
    }
}

fn push_run(wins: &mut Vec<u64>, losses: &mut Vec<u64>, kind: StreakKind, len: u64) {
    if len == 0 {
        return;
    }
    match kind {
        StreakKind::Win => wins.push(len),
        StreakKind::Loss => losses.push(len),
        StreakKind::None => {}
    }
}

fn avg_len(streaks: &[u64]) -> Decimal {
    if streaks.is_empty() {
        return Decimal::ZERO;
    }
    let total: u64 = streaks.iter().sum();
    Decimal::from(total) / Decimal::from(streaks.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_sequence() {
        let summary = detect(&[]);
        assert_eq!(summary.current.kind, StreakKind::None);
        assert_eq!(summary.longest_win_streak, 0);
    }

    #[test]
    fn test_mixed_sequence() {
        // W W W L L W L W W
        let outcomes = vec![
            dec!(10), dec!(5), dec!(8), dec!(-4), dec!(-6), dec!(3), dec!(-2), dec!(7), dec!(9),
        ];
        let summary = detect(&outcomes);

        assert_eq!(summary.longest_win_streak, 3);
        assert_eq!(summary.longest_loss_streak, 2);
        assert_eq!(summary.current.kind, StreakKind::Win);
        assert_eq!(summary.current.count, 2);
        assert_eq!(summary.current.pnl, dec!(16));
        // Win streaks: 3, 1, 2 -> avg 2; loss streaks: 2, 1 -> avg 1.5
        assert_eq!(summary.avg_win_streak, dec!(2));
        assert_eq!(summary.avg_loss_streak, dec!(1.5));
    }

    #[test]
    fn test_breakeven_counts_as_win() {
        let summary = detect(&[dec!(-5), dec!(0)]);
        assert_eq!(summary.current.kind, StreakKind::Win);
        assert_eq!(summary.current.count, 1);
        assert_eq!(summary.longest_loss_streak, 1);
    }

    #[test]
    fn test_streak_lengths_partition_trades() {
        let outcomes = vec![dec!(1), dec!(-1), dec!(-2), dec!(3), dec!(4), dec!(-5)];
        let summary = detect(&outcomes);
        // longest streaks alone don't partition, so recheck through the
        // current streak path: all six trades are covered by some run.
        let all_losses = outcomes.iter().filter(|o| **o < Decimal::ZERO).count();
        let all_wins = outcomes.len() - all_losses;
        assert!(summary.longest_win_streak as usize <= all_wins);
        assert!(summary.longest_loss_streak as usize <= all_losses);
        assert_eq!(summary.current.kind, StreakKind::Loss);
    }

    #[test]
    fn test_all_wins() {
        let summary = detect(&[dec!(1), dec!(2), dec!(3)]);
        assert_eq!(summary.longest_win_streak, 3);
        assert_eq!(summary.longest_loss_streak, 0);
        assert_eq!(summary.current.count, 3);
        assert_eq!(summary.avg_loss_streak, Decimal::ZERO);
    }
}
