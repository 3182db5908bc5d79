//! Stochastic Oscillator.
//!
//! %K = (Close - Lowest Low) / (Highest High - Lowest Low) * 100 over the
//! trailing k-period window; %D = SMA(%K, d).
//!
//! A window whose high and low coincide has no range to measure against, so
//! %K is reported at the midpoint (50).

use crate::domain::error::IndicatorError;
use crate::domain::indicator::{
    IndicatorKind, StochasticSeries, calculate_sma, require_aligned, require_len, require_period,
};

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

pub fn calculate_stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    d_period: usize,
) -> Result<StochasticSeries, IndicatorError> {
    let kind = IndicatorKind::Stochastic { k_period, d_period };
    require_period(kind, k_period)?;
    require_period(kind, d_period)?;
    require_aligned("highs", highs.len(), closes.len())?;
    require_aligned("lows", lows.len(), closes.len())?;
    require_len(kind, closes.len(), k_period + d_period - 1)?;

    let k: Vec<f64> = (k_period - 1..closes.len())
        .map(|i| {
            let start = i + 1 - k_period;
            let highest_high = highs[start..=i]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            let lowest_low = lows[start..=i].iter().copied().fold(f64::INFINITY, f64::min);

            let range = highest_high - lowest_low;
            if range == 0.0 {
                50.0
            } else {
                (closes[i] - lowest_low) / range * 100.0
            }
        })
        .collect();

    let d = calculate_sma(&k, d_period)?;

    Ok(StochasticSeries { k, d })
}
