//! Simple Moving Average.
//!
//! SMA(n)[j] = mean(P[j..j+n]), one value per complete window.

use crate::domain::error::IndicatorError;
use crate::domain::indicator::{IndicatorKind, require_len, require_period};

pub fn calculate_sma(prices: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    let kind = IndicatorKind::Sma(period);
    require_period(kind, period)?;
    require_len(kind, prices.len(), period)?;

    Ok(prices
        .windows(period)
        .map(|window| window.iter().sum::<f64>() / period as f64)
        .collect())
}
