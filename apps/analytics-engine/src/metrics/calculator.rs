//! Performance metrics calculator.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::pnl::{contract_multiplier, gross_pnl};
use crate::trade::{Trade, TradeDirection, closed_valid};

use super::constants::{DAYS_PER_YEAR, HUNDRED, ONE};
use super::math::{
    coefficient_of_variation, cov_score, downside_deviation, mean, root_mean_square, sqrt_decimal,
    std_dev,
};
use super::types::{DailyPnl, EquityPoint, MetricValue, MetricsReport, MonthlyReturn, SideMetrics};

/// Seconds per calendar day.
const SECONDS_PER_DAY: Decimal = Decimal::from_parts(86_400, 0, 0, false, 0);

/// Coefficient-of-variation cap for the consistency score.
const CONSISTENCY_COV_CAP: Decimal = Decimal::TWO;

/// A closed trade with its resolved P&L, in exit-chronological order.
struct ClosedTrade<'a> {
    trade: &'a Trade,
    exit_time: DateTime<Utc>,
    gross: Decimal,
    net: Decimal,
}

/// Performance metrics calculator.
///
/// Pure function of its input: `calculate` never mutates the trade
/// collection and holds no state between calls.
#[derive(Debug)]
pub struct MetricsCalculator<'a> {
    config: &'a AnalyticsConfig,
}

impl<'a> MetricsCalculator<'a> {
    /// Create a calculator over the given configuration.
    #[must_use]
    pub const fn new(config: &'a AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Calculate the full metrics report for a trade collection.
    ///
    /// Open and malformed trades are excluded; an empty remainder yields
    /// the neutral default report.
    #[must_use]
    pub fn calculate(&self, trades: &[Trade]) -> MetricsReport {
        let closed = self.resolve_closed(trades);
        if closed.is_empty() {
            return MetricsReport::default();
        }

        let (gross_profit, gross_loss, winning, losing, largest_win, largest_loss) =
            trade_stats(&closed);
        let count = closed.len() as u64;
        let count_dec = Decimal::from(count);

        let win_rate_pct = Decimal::from(winning) / count_dec * HUNDRED;
        let profit_factor = profit_factor_value(gross_profit, gross_loss);

        let avg_win = if winning > 0 {
            gross_profit / Decimal::from(winning)
        } else {
            Decimal::ZERO
        };
        let avg_loss = if losing > 0 {
            gross_loss / Decimal::from(losing)
        } else {
            Decimal::ZERO
        };
        let payoff_ratio = MetricValue::ratio(avg_win, avg_loss);

        let total_net_pnl: Decimal = closed.iter().map(|c| c.net).sum();
        let total_gross_pnl: Decimal = closed.iter().map(|c| c.gross).sum();
        let total_commission: Decimal = closed.iter().map(|c| c.trade.commission).sum();
        let expectancy = total_net_pnl / count_dec;

        let equity_curve = self.build_equity_curve(&closed);
        let drawdown = drawdown_metrics(&equity_curve, self.config.starting_balance);

        let recovery_factor = if drawdown.max_amount > Decimal::ZERO {
            total_net_pnl / drawdown.max_amount
        } else {
            Decimal::ZERO
        };

        let kelly_pct = kelly_percentage(win_rate_pct, avg_win, avg_loss);
        let risk_of_ruin_pct = self.risk_of_ruin(win_rate_pct, avg_win, avg_loss);
        let (avg_r_multiple, r_multiple_trades) = self.r_multiples(&closed);

        let daily = aggregate_daily(&closed);
        let daily_pnl: Vec<DailyPnl> = daily
            .iter()
            .map(|(date, agg)| DailyPnl {
                date: *date,
                pnl: agg.pnl,
                trades: agg.trades,
            })
            .collect();

        let daily_returns = self.daily_returns(&daily_pnl);
        let sharpe_ratio = self.sharpe(&daily_returns);
        let sortino_ratio = self.sortino(&daily_returns);

        let trading_period_days = trading_period(&closed);
        let annualized_return_pct =
            self.annualized_return_pct(total_net_pnl, trading_period_days);
        let calmar_ratio = if drawdown.max_pct > Decimal::ZERO {
            Some(annualized_return_pct / drawdown.max_pct)
        } else {
            None
        };

        let consistency_score = consistency(&daily_pnl);
        let monthly_returns = aggregate_monthly(&closed);

        let long_side = side_metrics(&closed, TradeDirection::Buy);
        let short_side = side_metrics(&closed, TradeDirection::Sell);

        let total_hours: Decimal = closed
            .iter()
            .filter_map(|c| c.trade.holding_period_hours())
            .sum();
        let avg_holding_period_hours = total_hours / count_dec;

        debug!(
            closed = count,
            win_rate = %win_rate_pct,
            net_pnl = %total_net_pnl,
            max_drawdown_pct = %drawdown.max_pct,
            "metrics computed"
        );

        MetricsReport {
            closed_trades: count,
            winning_trades: winning,
            losing_trades: losing,
            win_rate_pct,
            gross_profit,
            gross_loss,
            profit_factor,
            expectancy,
            avg_win,
            avg_loss,
            largest_win,
            largest_loss,
            payoff_ratio,
            total_gross_pnl,
            total_net_pnl,
            total_commission,
            equity_curve,
            max_drawdown_pct: drawdown.max_pct,
            max_drawdown_amount: drawdown.max_amount,
            avg_drawdown_pct: drawdown.avg_pct,
            ulcer_index: drawdown.ulcer,
            recovery_factor,
            kelly_pct,
            risk_of_ruin_pct,
            avg_r_multiple,
            r_multiple_trades,
            sharpe_ratio,
            sortino_ratio,
            calmar_ratio,
            annualized_return_pct,
            consistency_score,
            long_side,
            short_side,
            daily_pnl,
            monthly_returns,
            avg_holding_period_hours,
            trading_period_days,
        }
    }

    /// Resolve closed, well-formed trades with their P&L, sorted by exit.
    fn resolve_closed<'t>(&self, trades: &'t [Trade]) -> Vec<ClosedTrade<'t>> {
        let mut closed: Vec<ClosedTrade<'t>> = closed_valid(trades)
            .into_iter()
            .filter_map(|trade| {
                let gross = gross_pnl(trade, &self.config.contracts)?;
                let exit_time = trade.exit_time?;
                Some(ClosedTrade {
                    trade,
                    exit_time,
                    gross,
                    net: gross - trade.commission,
                })
            })
            .collect();
        closed.sort_by_key(|c| c.exit_time);
        closed
    }

    fn build_equity_curve(&self, closed: &[ClosedTrade<'_>]) -> Vec<EquityPoint> {
        let mut equity = self.config.starting_balance;
        closed
            .iter()
            .map(|c| {
                equity += c.net;
                EquityPoint {
                    time: c.exit_time,
                    equity,
                }
            })
            .collect()
    }

    /// Approximate risk of ruin via a simplified gambler's-ruin formula.
    ///
    /// With edge `e = p - (1 - p) / payoff` and `U` risk units (the
    /// capital fraction defining ruin divided into average-loss chunks):
    /// `RoR = ((1 - e) / (1 + e))^U`. No losing trades means no measurable
    /// ruin path (0); a non-positive edge means eventual ruin (100).
    fn risk_of_ruin(&self, win_rate_pct: Decimal, avg_win: Decimal, avg_loss: Decimal) -> Decimal {
        if avg_loss <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let p = (win_rate_pct / HUNDRED).to_f64().unwrap_or(0.0);
        let payoff = (avg_win / avg_loss).to_f64().unwrap_or(0.0);
        if payoff <= 0.0 {
            return HUNDRED;
        }

        let edge = p - (1.0 - p) / payoff;
        if edge <= 0.0 {
            return HUNDRED;
        }

        let units = (self.config.ruin_threshold * self.config.starting_balance / avg_loss)
            .to_f64()
            .unwrap_or(0.0);
        if units <= 0.0 {
            return HUNDRED;
        }

        let ruin = ((1.0 - edge) / (1.0 + edge)).powf(units) * 100.0;
        Decimal::try_from(ruin)
            .unwrap_or(Decimal::ZERO)
            .clamp(Decimal::ZERO, HUNDRED)
    }

    /// Mean R-multiple over trades with a stop-loss.
    fn r_multiples(&self, closed: &[ClosedTrade<'_>]) -> (Option<Decimal>, u64) {
        let values: Vec<Decimal> = closed
            .iter()
            .filter_map(|c| {
                let stop = c.trade.stop_loss?;
                let multiplier = contract_multiplier(c.trade, &self.config.contracts);
                let risk = (c.trade.entry_price - stop).abs() * c.trade.quantity * multiplier;
                if risk <= Decimal::ZERO {
                    return None;
                }
                Some(c.net / risk)
            })
            .collect();

        (mean(&values), values.len() as u64)
    }

    /// Daily returns against the running equity at each day's open.
    fn daily_returns(&self, daily: &[DailyPnl]) -> Vec<Decimal> {
        let mut equity = self.config.starting_balance;
        let mut returns = Vec::with_capacity(daily.len());
        for day in daily {
            if equity > Decimal::ZERO {
                returns.push(day.pnl / equity);
            }
            equity += day.pnl;
        }
        returns
    }

    /// Annualized Sharpe ratio over daily returns.
    fn sharpe(&self, returns: &[Decimal]) -> Option<Decimal> {
        if returns.len() < 2 {
            return None;
        }
        let avg = mean(returns)?;
        let std = std_dev(returns)?;
        if std == Decimal::ZERO {
            return None;
        }
        let excess = avg - self.config.risk_free_rate / self.config.trading_days_per_year;
        let annualize = sqrt_decimal(self.config.trading_days_per_year)?;
        Some(excess / std * annualize)
    }

    /// Annualized Sortino ratio over daily returns.
    fn sortino(&self, returns: &[Decimal]) -> Option<Decimal> {
        if returns.len() < 2 {
            return None;
        }
        let avg = mean(returns)?;
        let downside = downside_deviation(returns)?;
        if downside == Decimal::ZERO {
            return None;
        }
        let excess = avg - self.config.risk_free_rate / self.config.trading_days_per_year;
        let annualize = sqrt_decimal(self.config.trading_days_per_year)?;
        Some(excess / downside * annualize)
    }

    /// Compound annual growth rate in %, from total net P&L.
    fn annualized_return_pct(&self, total_net_pnl: Decimal, period_days: Decimal) -> Decimal {
        if period_days <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let growth = (self.config.starting_balance + total_net_pnl) / self.config.starting_balance;
        if growth <= Decimal::ZERO {
            return -HUNDRED;
        }
        let exponent = (DAYS_PER_YEAR / period_days).to_f64().unwrap_or(0.0);
        let cagr = growth.to_f64().unwrap_or(1.0).powf(exponent) - 1.0;
        Decimal::try_from(cagr * 100.0).unwrap_or(Decimal::ZERO)
    }
}

/// Profit factor with the explicit sentinel policy:
/// `Infinite` iff loss = 0 and profit > 0; `Finite(0)` when profit = 0.
fn profit_factor_value(gross_profit: Decimal, gross_loss: Decimal) -> MetricValue {
    if gross_loss > Decimal::ZERO {
        MetricValue::Finite(gross_profit / gross_loss)
    } else if gross_profit > Decimal::ZERO {
        MetricValue::Infinite
    } else {
        MetricValue::Finite(Decimal::ZERO)
    }
}

/// Kelly criterion %, clamped to [0, 100]; 0 without losses.
fn kelly_percentage(win_rate_pct: Decimal, avg_win: Decimal, avg_loss: Decimal) -> Decimal {
    if avg_loss <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let p = win_rate_pct / HUNDRED;
    let payoff = avg_win / avg_loss;
    if payoff <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let kelly = p - (ONE - p) / payoff;
    (kelly * HUNDRED).clamp(Decimal::ZERO, HUNDRED)
}

fn trade_stats(closed: &[ClosedTrade<'_>]) -> (Decimal, Decimal, u64, u64, Decimal, Decimal) {
    let mut gross_profit = Decimal::ZERO;
    let mut gross_loss = Decimal::ZERO;
    let mut winning = 0u64;
    let mut losing = 0u64;
    let mut largest_win = Decimal::ZERO;
    let mut largest_loss = Decimal::ZERO;

    for c in closed {
        if c.net > Decimal::ZERO {
            gross_profit += c.net;
            winning += 1;
            largest_win = largest_win.max(c.net);
        } else if c.net < Decimal::ZERO {
            gross_loss += c.net.abs();
            losing += 1;
            largest_loss = largest_loss.max(c.net.abs());
        }
    }

    (
        gross_profit,
        gross_loss,
        winning,
        losing,
        largest_win,
        largest_loss,
    )
}

struct DrawdownMetrics {
    max_pct: Decimal,
    max_amount: Decimal,
    avg_pct: Decimal,
    ulcer: Decimal,
}

/// Walk the equity curve tracking the running peak.
fn drawdown_metrics(curve: &[EquityPoint], starting_balance: Decimal) -> DrawdownMetrics {
    let mut peak = starting_balance;
    let mut max_pct = Decimal::ZERO;
    let mut max_amount = Decimal::ZERO;
    let mut nonzero = Vec::new();
    let mut all_pcts = Vec::with_capacity(curve.len());

    for point in curve {
        if point.equity > peak {
            peak = point.equity;
        }
        let amount = peak - point.equity;
        let pct = if peak > Decimal::ZERO {
            amount / peak * HUNDRED
        } else {
            Decimal::ZERO
        };
        all_pcts.push(pct);
        if pct > Decimal::ZERO {
            nonzero.push(pct);
        }
        if pct > max_pct {
            max_pct = pct;
        }
        max_amount = max_amount.max(amount);
    }

    DrawdownMetrics {
        max_pct,
        max_amount,
        avg_pct: mean(&nonzero).unwrap_or(Decimal::ZERO),
        ulcer: root_mean_square(&all_pcts).unwrap_or(Decimal::ZERO),
    }
}

struct DayAgg {
    pnl: Decimal,
    trades: u64,
    wins: u64,
}

fn aggregate_daily(closed: &[ClosedTrade<'_>]) -> BTreeMap<chrono::NaiveDate, DayAgg> {
    let mut days: BTreeMap<chrono::NaiveDate, DayAgg> = BTreeMap::new();
    for c in closed {
        let entry = days.entry(c.exit_time.date_naive()).or_insert(DayAgg {
            pnl: Decimal::ZERO,
            trades: 0,
            wins: 0,
        });
        entry.pnl += c.net;
        entry.trades += 1;
        if c.net > Decimal::ZERO {
            entry.wins += 1;
        }
    }
    days
}

fn aggregate_monthly(closed: &[ClosedTrade<'_>]) -> Vec<MonthlyReturn> {
    let mut months: BTreeMap<(i32, u32), DayAgg> = BTreeMap::new();
    for c in closed {
        let key = (c.exit_time.year(), c.exit_time.month());
        let entry = months.entry(key).or_insert(DayAgg {
            pnl: Decimal::ZERO,
            trades: 0,
            wins: 0,
        });
        entry.pnl += c.net;
        entry.trades += 1;
        if c.net > Decimal::ZERO {
            entry.wins += 1;
        }
    }

    months
        .into_iter()
        .map(|((year, month), agg)| MonthlyReturn {
            year,
            month,
            pnl: agg.pnl,
            trades: agg.trades,
            win_rate_pct: if agg.trades > 0 {
                Decimal::from(agg.wins) / Decimal::from(agg.trades) * HUNDRED
            } else {
                Decimal::ZERO
            },
        })
        .collect()
}

/// 0-100 consistency score from the coefficient of variation of daily
/// P&L. Non-positive mean daily P&L scores 0.
fn consistency(daily: &[DailyPnl]) -> Decimal {
    let values: Vec<Decimal> = daily.iter().map(|d| d.pnl).collect();
    let Some(avg) = mean(&values) else {
        return Decimal::ZERO;
    };
    if avg <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if values.len() < 2 {
        // Single profitable day: stable by construction.
        return HUNDRED;
    }
    coefficient_of_variation(&values)
        .map_or(Decimal::ZERO, |cov| cov_score(cov, CONSISTENCY_COV_CAP))
}

fn side_metrics(closed: &[ClosedTrade<'_>], direction: TradeDirection) -> SideMetrics {
    let side: Vec<&ClosedTrade<'_>> = closed
        .iter()
        .filter(|c| c.trade.direction == direction)
        .collect();
    if side.is_empty() {
        return SideMetrics::default();
    }

    let mut gross_profit = Decimal::ZERO;
    let mut gross_loss = Decimal::ZERO;
    let mut wins = 0u64;
    for c in &side {
        if c.net > Decimal::ZERO {
            gross_profit += c.net;
            wins += 1;
        } else if c.net < Decimal::ZERO {
            gross_loss += c.net.abs();
        }
    }

    let trades = side.len() as u64;
    SideMetrics {
        trades,
        win_rate_pct: Decimal::from(wins) / Decimal::from(trades) * HUNDRED,
        profit_factor: profit_factor_value(gross_profit, gross_loss),
    }
}

/// Calendar span from first entry to last exit, in days (minimum 1).
fn trading_period(closed: &[ClosedTrade<'_>]) -> Decimal {
    let Some(first_entry) = closed.iter().map(|c| c.trade.entry_time).min() else {
        return ONE;
    };
    let Some(last_exit) = closed.iter().map(|c| c.exit_time).max() else {
        return ONE;
    };
    let seconds = (last_exit - first_entry).num_seconds();
    if seconds <= 0 {
        return ONE;
    }
    (Decimal::from(seconds) / SECONDS_PER_DAY).max(ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::MarketType;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn make_trade(net: Decimal, day: u32, hour: u32) -> Trade {
        // Quantity 1 stock trade whose net P&L equals `net`.
        Trade {
            symbol: "AAPL".to_string(),
            direction: TradeDirection::Buy,
            entry_price: dec!(100),
            exit_price: Some(dec!(100) + net),
            quantity: Decimal::ONE,
            entry_time: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
            exit_time: Some(Utc.with_ymd_and_hms(2024, 1, day, hour + 1, 0, 0).unwrap()),
            market: MarketType::Stocks,
            commission: Decimal::ZERO,
            intended_entry: None,
            intended_exit: None,
            stop_loss: None,
            take_profit: None,
            partial_exits: Vec::new(),
            price_path: Vec::new(),
        }
    }

    #[test]
    fn test_empty_input_returns_neutral_report() {
        let config = AnalyticsConfig::default();
        let report = MetricsCalculator::new(&config).calculate(&[]);
        assert_eq!(report, MetricsReport::default());
    }

    #[test]
    fn test_scenario_a_win_rate_profit_factor_expectancy() {
        // 6 wins of +$100, 4 losses of -$50.
        let mut trades = Vec::new();
        for day in 1..=6 {
            trades.push(make_trade(dec!(100), day, 10));
        }
        for day in 7..=10 {
            trades.push(make_trade(dec!(-50), day, 10));
        }

        let config = AnalyticsConfig::default();
        let report = MetricsCalculator::new(&config).calculate(&trades);

        assert_eq!(report.closed_trades, 10);
        assert_eq!(report.win_rate_pct, dec!(60));
        assert_eq!(report.profit_factor, MetricValue::Finite(dec!(3)));
        assert_eq!(report.expectancy, dec!(40));
        assert_eq!(report.gross_profit, dec!(600));
        assert_eq!(report.gross_loss, dec!(200));
    }

    #[test]
    fn test_profit_factor_sentinels() {
        assert_eq!(
            profit_factor_value(dec!(100), Decimal::ZERO),
            MetricValue::Infinite
        );
        assert_eq!(
            profit_factor_value(Decimal::ZERO, Decimal::ZERO),
            MetricValue::Finite(Decimal::ZERO)
        );
        assert_eq!(
            profit_factor_value(Decimal::ZERO, dec!(50)),
            MetricValue::Finite(Decimal::ZERO)
        );
    }

    #[test]
    fn test_scenario_c_max_drawdown() {
        // Equity 10000 -> 10500 -> 9800 -> 11000.
        let trades = vec![
            make_trade(dec!(500), 1, 10),
            make_trade(dec!(-700), 2, 10),
            make_trade(dec!(1200), 3, 10),
        ];
        let config = AnalyticsConfig::default();
        let report = MetricsCalculator::new(&config).calculate(&trades);

        // (10500 - 9800) / 10500 = 6.666...%
        assert!(report.max_drawdown_pct > dec!(6.66) && report.max_drawdown_pct < dec!(6.67));
        assert_eq!(report.max_drawdown_amount, dec!(700));
    }

    #[test]
    fn test_max_drawdown_dominates_point_drawdowns() {
        let trades = vec![
            make_trade(dec!(300), 1, 10),
            make_trade(dec!(-200), 2, 10),
            make_trade(dec!(-100), 3, 10),
            make_trade(dec!(400), 4, 10),
        ];
        let config = AnalyticsConfig::default();
        let report = MetricsCalculator::new(&config).calculate(&trades);

        let mut peak = config.starting_balance;
        for point in &report.equity_curve {
            peak = peak.max(point.equity);
            let point_dd = (peak - point.equity) / peak * dec!(100);
            assert!(report.max_drawdown_pct >= point_dd);
        }
        assert!(report.avg_drawdown_pct > Decimal::ZERO);
        assert!(report.ulcer_index > Decimal::ZERO);
    }

    #[test]
    fn test_no_drawdown_on_monotonic_curve() {
        let trades = vec![
            make_trade(dec!(100), 1, 10),
            make_trade(dec!(200), 2, 10),
        ];
        let config = AnalyticsConfig::default();
        let report = MetricsCalculator::new(&config).calculate(&trades);
        assert_eq!(report.max_drawdown_pct, Decimal::ZERO);
        assert_eq!(report.recovery_factor, Decimal::ZERO);
        assert!(report.calmar_ratio.is_none());
    }

    #[test]
    fn test_kelly_clamped_and_zero_without_losses() {
        // 60% win rate, 2:1 payoff -> kelly = 0.6 - 0.4/2 = 40%.
        assert_eq!(kelly_percentage(dec!(60), dec!(100), dec!(50)), dec!(40));
        assert_eq!(kelly_percentage(dec!(60), dec!(100), Decimal::ZERO), Decimal::ZERO);
        // Negative edge clamps at zero.
        assert_eq!(kelly_percentage(dec!(20), dec!(50), dec!(100)), Decimal::ZERO);
    }

    #[test]
    fn test_risk_of_ruin_extremes() {
        let config = AnalyticsConfig::default();
        let calc = MetricsCalculator::new(&config);

        // No losses: no measurable ruin path.
        assert_eq!(calc.risk_of_ruin(dec!(100), dec!(100), Decimal::ZERO), Decimal::ZERO);
        // Negative edge: certain ruin.
        assert_eq!(calc.risk_of_ruin(dec!(30), dec!(50), dec!(100)), dec!(100));
        // Positive edge: strictly between the extremes.
        let ror = calc.risk_of_ruin(dec!(60), dec!(100), dec!(50));
        assert!(ror >= Decimal::ZERO && ror < dec!(100));
    }

    #[test]
    fn test_r_multiple_requires_stop() {
        let mut with_stop = make_trade(dec!(100), 1, 10);
        with_stop.stop_loss = Some(dec!(95)); // $5 risk on 1 share
        let without_stop = make_trade(dec!(50), 2, 10);

        let config = AnalyticsConfig::default();
        let report = MetricsCalculator::new(&config).calculate(&[with_stop, without_stop]);

        assert_eq!(report.r_multiple_trades, 1);
        assert_eq!(report.avg_r_multiple, Some(dec!(20))); // 100 / 5
    }

    #[test]
    fn test_side_split() {
        let mut short = make_trade(dec!(0), 2, 10);
        short.direction = TradeDirection::Sell;
        short.exit_price = Some(dec!(90)); // short wins +10

        let trades = vec![make_trade(dec!(100), 1, 10), short];
        let config = AnalyticsConfig::default();
        let report = MetricsCalculator::new(&config).calculate(&trades);

        assert_eq!(report.long_side.trades, 1);
        assert_eq!(report.long_side.win_rate_pct, dec!(100));
        assert_eq!(report.short_side.trades, 1);
        assert_eq!(report.short_side.win_rate_pct, dec!(100));
    }

    #[test]
    fn test_sharpe_requires_two_days() {
        let config = AnalyticsConfig::default();
        let single = MetricsCalculator::new(&config).calculate(&[make_trade(dec!(100), 1, 10)]);
        assert!(single.sharpe_ratio.is_none());
        assert!(single.sortino_ratio.is_none());

        let trades = vec![
            make_trade(dec!(100), 1, 10),
            make_trade(dec!(-50), 2, 10),
            make_trade(dec!(80), 3, 10),
        ];
        let multi = MetricsCalculator::new(&config).calculate(&trades);
        assert!(multi.sharpe_ratio.is_some());
        assert!(multi.sortino_ratio.is_some());
    }

    #[test]
    fn test_daily_and_monthly_aggregation() {
        let trades = vec![
            make_trade(dec!(100), 1, 10),
            make_trade(dec!(-30), 1, 12),
            make_trade(dec!(50), 2, 10),
        ];
        let config = AnalyticsConfig::default();
        let report = MetricsCalculator::new(&config).calculate(&trades);

        assert_eq!(report.daily_pnl.len(), 2);
        assert_eq!(report.daily_pnl[0].pnl, dec!(70));
        assert_eq!(report.daily_pnl[0].trades, 2);

        assert_eq!(report.monthly_returns.len(), 1);
        assert_eq!(report.monthly_returns[0].month, 1);
        assert_eq!(report.monthly_returns[0].pnl, dec!(120));
    }

    #[test]
    fn test_consistency_zero_when_losing() {
        let trades = vec![
            make_trade(dec!(-100), 1, 10),
            make_trade(dec!(-50), 2, 10),
        ];
        let config = AnalyticsConfig::default();
        let report = MetricsCalculator::new(&config).calculate(&trades);
        assert_eq!(report.consistency_score, Decimal::ZERO);
    }
}
