//! Statistical math utilities for performance metric calculations.

use rust_decimal::Decimal;

use super::constants::{HUNDRED, TOLERANCE, TWO};

/// Calculate mean of a slice of decimals.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len() as u64))
}

/// Calculate standard deviation of a slice of decimals.
pub fn std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }

    let avg = mean(values)?;
    let variance_sum: Decimal = values.iter().map(|v| (*v - avg) * (*v - avg)).sum();
    let variance = variance_sum / Decimal::from((values.len() - 1) as u64);

    sqrt_decimal(variance)
}

/// Calculate downside deviation (only negative returns).
pub fn downside_deviation(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }

    let negative_returns: Vec<Decimal> = values
        .iter()
        .filter(|v| **v < Decimal::ZERO)
        .copied()
        .collect();

    if negative_returns.is_empty() {
        return Some(Decimal::ZERO);
    }

    let variance_sum: Decimal = negative_returns.iter().map(|v| *v * *v).sum();
    let variance = variance_sum / Decimal::from(values.len() as u64); // Use total count

    sqrt_decimal(variance)
}

/// Coefficient of variation (std dev / |mean|).
///
/// `None` when the mean is zero or the sample is too small.
pub fn coefficient_of_variation(values: &[Decimal]) -> Option<Decimal> {
    let avg = mean(values)?;
    if avg == Decimal::ZERO {
        return None;
    }
    let std = std_dev(values)?;
    Some(std / avg.abs())
}

/// Root-mean-square of a slice of decimals.
pub fn root_mean_square(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let square_sum: Decimal = values.iter().map(|v| *v * *v).sum();
    sqrt_decimal(square_sum / Decimal::from(values.len() as u64))
}

/// Map a coefficient of variation to a 0-100 stability score.
///
/// CoV 0 scores 100; CoV at or beyond `cap` scores 0, linear in between.
pub fn cov_score(cov: Decimal, cap: Decimal) -> Decimal {
    if cap <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let clamped = cov.min(cap).max(Decimal::ZERO);
    (Decimal::ONE - clamped / cap) * HUNDRED
}

/// Approximate square root using Newton's method.
pub fn sqrt_decimal(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO {
        return None;
    }
    if value == Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let mut guess = value / TWO;

    for _ in 0..50 {
        let next = (guess + value / guess) / TWO;
        if (next - guess).abs() < TOLERANCE {
            return Some(next);
        }
        guess = next;
    }

    Some(guess)
}
