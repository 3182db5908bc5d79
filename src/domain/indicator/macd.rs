//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow), with EMA(fast) shifted by `slow - fast`
//! so both sides refer to the same bar
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line, aligned to the (shorter) signal line
//!
//! Default parameters: fast=12, slow=26, signal=9

use crate::domain::error::IndicatorError;
use crate::domain::indicator::{IndicatorKind, MacdSeries, calculate_ema, require_len, require_period};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Result<MacdSeries, IndicatorError> {
    let kind = IndicatorKind::Macd {
        fast,
        slow,
        signal: signal_period,
    };
    require_period(kind, fast)?;
    require_period(kind, slow)?;
    require_period(kind, signal_period)?;
    if fast >= slow {
        return Err(IndicatorError::InvalidPeriod {
            indicator: kind,
            reason: format!("fast period {} must be shorter than slow period {}", fast, slow),
        });
    }
    require_len(kind, prices.len(), slow + signal_period - 1)?;

    let fast_ema = calculate_ema(prices, fast)?;
    let slow_ema = calculate_ema(prices, slow)?;

    let offset = slow - fast;
    let macd: Vec<f64> = fast_ema[offset..]
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();

    let signal = calculate_ema(&macd, signal_period)?;

    let histogram: Vec<f64> = macd[signal_period - 1..]
        .iter()
        .zip(&signal)
        .map(|(m, s)| m - s)
        .collect();

    Ok(MacdSeries {
        macd,
        signal,
        histogram,
    })
}

pub fn calculate_macd_default(prices: &[f64]) -> Result<MacdSeries, IndicatorError> {
    calculate_macd(prices, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
