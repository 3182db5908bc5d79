//! Technical indicator library.
//!
//! Every indicator is a pure function from oldest-first numeric sequences to
//! oldest-first output sequences. Warm-up samples are dropped rather than
//! padded, so outputs are shorter than their inputs:
//!
//! | indicator  | output length          |
//! |------------|------------------------|
//! | SMA / EMA  | `n - period + 1`       |
//! | RSI        | `n - period - 1`       |
//! | MACD       | `n - slow - signal + 2`|
//! | Bollinger  | `n - period + 1`       |
//! | Stochastic | `n - k - d + 2` (%D)   |
//! | VWAP       | `n`                    |
//!
//! Inputs too short for the requested periods are rejected with
//! [`IndicatorError::InsufficientData`].

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod stochastic;
pub mod vwap;

pub use bollinger::calculate_bollinger;
pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stochastic::calculate_stochastic;
pub use vwap::calculate_vwap;

use crate::domain::error::IndicatorError;
use std::fmt;

/// Indicator identity plus parameters, used to label errors and readouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorKind {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult: f64,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Vwap,
}

/// MACD output. `signal` and `histogram` share a length; `macd` is longer by
/// `signal_period - 1` leading samples.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Stochastic output. `d` is the SMA of `k`, so it is `d_period - 1` shorter.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma(period) => write!(f, "SMA({})", period),
            IndicatorKind::Ema(period) => write!(f, "EMA({})", period),
            IndicatorKind::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorKind::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorKind::Bollinger {
                period,
                stddev_mult,
            } => write!(f, "BOLLINGER({},{})", period, stddev_mult),
            IndicatorKind::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorKind::Vwap => write!(f, "VWAP"),
        }
    }
}

pub(crate) fn require_period(indicator: IndicatorKind, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod {
            indicator,
            reason: "period must be at least 1".into(),
        });
    }
    Ok(())
}

pub(crate) fn require_len(
    indicator: IndicatorKind,
    have: usize,
    need: usize,
) -> Result<(), IndicatorError> {
    if have < need {
        return Err(IndicatorError::InsufficientData {
            indicator,
            have,
            need,
        });
    }
    Ok(())
}

pub(crate) fn require_aligned(
    series: &'static str,
    len: usize,
    expected: usize,
) -> Result<(), IndicatorError> {
    if len != expected {
        return Err(IndicatorError::MisalignedInput {
            series,
            len,
            expected,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_kind_display_sma() {
        assert_eq!(IndicatorKind::Sma(20).to_string(), "SMA(20)");
    }

    #[test]
    fn indicator_kind_display_macd() {
        let macd = IndicatorKind::Macd {
            fast: 12,
            slow: 26,
            signal: 9,
        };
        assert_eq!(macd.to_string(), "MACD(12,26,9)");
    }

    #[test]
    fn indicator_kind_display_bollinger() {
        let boll = IndicatorKind::Bollinger {
            period: 20,
            stddev_mult: 2.0,
        };
        assert_eq!(boll.to_string(), "BOLLINGER(20,2)");
    }

    #[test]
    fn indicator_kind_display_stochastic_and_vwap() {
        let stoch = IndicatorKind::Stochastic {
            k_period: 14,
            d_period: 3,
        };
        assert_eq!(stoch.to_string(), "STOCHASTIC(14,3)");
        assert_eq!(IndicatorKind::Vwap.to_string(), "VWAP");
    }

    #[test]
    fn require_len_reports_shortfall() {
        let err = require_len(IndicatorKind::Rsi(14), 10, 16).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                indicator: IndicatorKind::Rsi(14),
                have: 10,
                need: 16,
            }
        );
        assert!(require_len(IndicatorKind::Rsi(14), 16, 16).is_ok());
    }

    #[test]
    fn require_period_rejects_zero() {
        assert!(matches!(
            require_period(IndicatorKind::Ema(0), 0),
            Err(IndicatorError::InvalidPeriod { .. })
        ));
    }
}
