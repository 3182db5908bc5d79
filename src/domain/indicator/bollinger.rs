//! Bollinger Bands.
//!
//! - Middle: SMA over n prices
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the population standard deviation of the same window. A window
//! with no variance collapses all three bands onto the middle.
//!
//! Default parameters: period=20, multiplier=2.0

use crate::domain::error::IndicatorError;
use crate::domain::indicator::stddev::population_stddev;
use crate::domain::indicator::{BollingerSeries, IndicatorKind, calculate_sma, require_len, require_period};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_STDDEV_MULT: f64 = 2.0;

pub fn calculate_bollinger(
    prices: &[f64],
    period: usize,
    stddev_mult: f64,
) -> Result<BollingerSeries, IndicatorError> {
    let kind = IndicatorKind::Bollinger {
        period,
        stddev_mult,
    };
    require_period(kind, period)?;
    require_len(kind, prices.len(), period)?;

    let middle = calculate_sma(prices, period)?;
    let mut upper = Vec::with_capacity(middle.len());
    let mut lower = Vec::with_capacity(middle.len());

    for (window, &mean) in prices.windows(period).zip(&middle) {
        let width = stddev_mult * population_stddev(window, mean);
        upper.push(mean + width);
        lower.push(mean - width);
    }

    Ok(BollingerSeries {
        upper,
        middle,
        lower,
    })
}
