//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with the SMA of the first n prices, then
//! EMA[i] = P[i]*k + EMA[i-1]*(1-k), computed as EMA[i-1] + k*(P[i] - EMA[i-1])
//! so a constant series stays exactly constant.

use crate::domain::error::IndicatorError;
use crate::domain::indicator::{IndicatorKind, require_len, require_period};

pub fn calculate_ema(prices: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    let kind = IndicatorKind::Ema(period);
    require_period(kind, period)?;
    require_len(kind, prices.len(), period)?;

    let k = 2.0 / (period as f64 + 1.0);
    let mut values = Vec::with_capacity(prices.len() - period + 1);

    let mut ema = prices[..period].iter().sum::<f64>() / period as f64;
    values.push(ema);

    for &price in &prices[period..] {
        ema += k * (price - ema);
        values.push(ema);
    }

    Ok(values)
}
