//! RSI (Relative Strength Index) with Wilder's smoothing.
//!
//! - Changes: D[i] = P[i+1] - P[i], split into gains and losses (both >= 0)
//! - Seed: avg_gain / avg_loss = simple mean of the first n gains / losses
//! - Each later change: avg = (avg * (n-1) + current) / n, then
//!   RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//!
//! The seed itself is not emitted; the first value comes from the (n+1)-th
//! change, so `n + 2` prices are needed and `len - n - 1` values come out.
//!
//! A zero average loss saturates RSI at 100. When both averages are zero
//! (no movement at all) the value is the neutral 50.

use crate::domain::error::IndicatorError;
use crate::domain::indicator::{IndicatorKind, require_len, require_period};

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(prices: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    let kind = IndicatorKind::Rsi(period);
    require_period(kind, period)?;
    require_len(kind, prices.len(), period + 2)?;

    let (gains, losses): (Vec<f64>, Vec<f64>) = prices
        .windows(2)
        .map(|pair| {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, change.abs())
            }
        })
        .unzip();

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    let smoothing = (period - 1) as f64;
    let mut values = Vec::with_capacity(gains.len() - period);

    for (gain, loss) in gains[period..].iter().zip(&losses[period..]) {
        avg_gain = (avg_gain * smoothing + gain) / period as f64;
        avg_loss = (avg_loss * smoothing + loss) / period as f64;
        values.push(rsi_from_averages(avg_gain, avg_loss));
    }

    Ok(values)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
}
