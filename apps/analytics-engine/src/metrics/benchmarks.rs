//! Benchmark grading for metric cards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::MetricValue;

/// Grading outcome against a benchmark cutoff pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricStatus {
    /// At or beyond the good cutoff.
    Good,
    /// Between the warning and good cutoffs.
    Warning,
    /// Past the warning cutoff.
    Danger,
    /// Not graded (no benchmark, or undefined value).
    Neutral,
}

/// Grade a value where higher is better.
///
/// `cutoffs` is the (good, warning) pair from the benchmark table.
#[must_use]
pub fn grade_higher(value: Decimal, cutoffs: (Decimal, Decimal)) -> MetricStatus {
    let (good, warning) = cutoffs;
    if value >= good {
        MetricStatus::Good
    } else if value >= warning {
        MetricStatus::Warning
    } else {
        MetricStatus::Danger
    }
}

/// Grade a value where lower is better (e.g., drawdown).
#[must_use]
pub fn grade_lower(value: Decimal, cutoffs: (Decimal, Decimal)) -> MetricStatus {
    let (good, warning) = cutoffs;
    if value <= good {
        MetricStatus::Good
    } else if value <= warning {
        MetricStatus::Warning
    } else {
        MetricStatus::Danger
    }
}

/// Grade a tagged ratio where higher is better.
///
/// `Infinite` beats any cutoff; `Undefined` is not graded.
#[must_use]
pub fn grade_ratio(value: MetricValue, cutoffs: (Decimal, Decimal)) -> MetricStatus {
    match value {
        MetricValue::Finite(v) => grade_higher(v, cutoffs),
        MetricValue::Infinite => MetricStatus::Good,
        MetricValue::Undefined => MetricStatus::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case(dec!(55), MetricStatus::Good; "above good")]
    #[test_case(dec!(45), MetricStatus::Warning; "between cutoffs")]
    #[test_case(dec!(35), MetricStatus::Danger; "below warning")]
    fn test_grade_higher(value: Decimal, expected: MetricStatus) {
        assert_eq!(grade_higher(value, (dec!(50), dec!(40))), expected);
    }

    #[test_case(dec!(5), MetricStatus::Good; "shallow drawdown")]
    #[test_case(dec!(15), MetricStatus::Warning; "moderate drawdown")]
    #[test_case(dec!(25), MetricStatus::Danger; "deep drawdown")]
    fn test_grade_lower(value: Decimal, expected: MetricStatus) {
        assert_eq!(grade_lower(value, (dec!(10), dec!(20))), expected);
    }

    #[test]
    fn test_grade_ratio_sentinels() {
        let cutoffs = (dec!(1.5), dec!(1));
        assert_eq!(grade_ratio(MetricValue::Infinite, cutoffs), MetricStatus::Good);
        assert_eq!(grade_ratio(MetricValue::Undefined, cutoffs), MetricStatus::Neutral);
        assert_eq!(
            grade_ratio(MetricValue::Finite(dec!(1.2)), cutoffs),
            MetricStatus::Warning
        );
    }
}
