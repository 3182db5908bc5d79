//! Signal generator: reduces one symbol's price history to a [`TradingSignal`].
//!
//! Canonical parameterisation: RSI(14), MACD(12,26,9), Bollinger(20,2),
//! SMA 20/50/200 and VWAP over the whole supplied series. Only the most
//! recent value of each indicator feeds the scoring rules.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::error::IndicatorError;
use crate::domain::indicator::{
    IndicatorKind, bollinger, calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi,
    calculate_sma, calculate_stochastic, calculate_vwap, macd, require_len, rsi, stochastic,
};
use crate::domain::scoring::{SignalContext, score, select_action};
use crate::domain::series::PriceSeries;
use crate::domain::signal::{
    BandReading, IndicatorSnapshot, MacdReading, MovingAverages, TradingSignal,
};

/// Longest warm-up of any indicator the generator uses (SMA 200).
pub const MIN_SIGNAL_BARS: usize = 200;

/// Bars averaged for the volume confirmation rule.
pub const VOLUME_WINDOW: usize = 20;

pub fn generate_signal(symbol: &str, series: &PriceSeries) -> Result<TradingSignal, IndicatorError> {
    generate_signal_at(symbol, series, Utc::now())
}

/// Deterministic core of [`generate_signal`]: identical inputs always yield an
/// identical signal.
pub fn generate_signal_at(
    symbol: &str,
    series: &PriceSeries,
    timestamp: DateTime<Utc>,
) -> Result<TradingSignal, IndicatorError> {
    let ctx = signal_context(series)?;
    let card = score(&ctx);
    let total = card.raw_total();
    let action = select_action(total, &ctx);

    tracing::debug!(symbol, %action, total, "signal generated");

    Ok(TradingSignal {
        symbol: symbol.to_string(),
        action,
        confidence: card.confidence(),
        reason: card.reason(),
        indicators: ctx.indicators,
        contributions: card.contributions,
        timestamp,
    })
}

/// Latest indicator readings plus volume context for the scoring rules.
pub fn signal_context(series: &PriceSeries) -> Result<SignalContext, IndicatorError> {
    require_len(IndicatorKind::Sma(MIN_SIGNAL_BARS), series.len(), MIN_SIGNAL_BARS)?;

    let closes = series.closes();
    let volumes = series.volumes();

    let rsi = last(calculate_rsi(closes, rsi::DEFAULT_PERIOD)?, IndicatorKind::Rsi(rsi::DEFAULT_PERIOD))?;

    let macd_kind = IndicatorKind::Macd {
        fast: macd::DEFAULT_FAST,
        slow: macd::DEFAULT_SLOW,
        signal: macd::DEFAULT_SIGNAL,
    };
    let macd_series = calculate_macd(
        closes,
        macd::DEFAULT_FAST,
        macd::DEFAULT_SLOW,
        macd::DEFAULT_SIGNAL,
    )?;
    let macd = MacdReading {
        macd: last(macd_series.macd, macd_kind)?,
        signal: last(macd_series.signal, macd_kind)?,
        histogram: last(macd_series.histogram, macd_kind)?,
    };

    let bands_kind = IndicatorKind::Bollinger {
        period: bollinger::DEFAULT_PERIOD,
        stddev_mult: bollinger::DEFAULT_STDDEV_MULT,
    };
    let bands = calculate_bollinger(
        closes,
        bollinger::DEFAULT_PERIOD,
        bollinger::DEFAULT_STDDEV_MULT,
    )?;
    let bollinger_bands = BandReading {
        upper: last(bands.upper, bands_kind)?,
        middle: last(bands.middle, bands_kind)?,
        lower: last(bands.lower, bands_kind)?,
    };

    let moving_averages = MovingAverages {
        sma20: latest_sma(closes, 20)?,
        sma50: latest_sma(closes, 50)?,
        sma200: latest_sma(closes, 200)?,
    };

    let vwap = last(
        calculate_vwap(series.highs(), series.lows(), closes, volumes)?,
        IndicatorKind::Vwap,
    )?;

    let recent_volume = &volumes[volumes.len() - VOLUME_WINDOW..];
    let average_volume = recent_volume.iter().sum::<f64>() / VOLUME_WINDOW as f64;

    Ok(SignalContext {
        price: closes[closes.len() - 1],
        indicators: IndicatorSnapshot {
            rsi,
            macd,
            bollinger_bands,
            moving_averages,
            vwap,
        },
        current_volume: volumes[volumes.len() - 1],
        average_volume,
    })
}

/// Latest value of every indicator in the library, for the readout command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReadout {
    pub price: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub rsi: f64,
    pub macd: MacdReading,
    pub bollinger_bands: BandReading,
    pub stochastic_k: f64,
    pub stochastic_d: f64,
    pub vwap: f64,
}

pub fn indicator_readout(series: &PriceSeries) -> Result<IndicatorReadout, IndicatorError> {
    let ctx = signal_context(series)?;
    let closes = series.closes();

    let stoch_kind = IndicatorKind::Stochastic {
        k_period: stochastic::DEFAULT_K_PERIOD,
        d_period: stochastic::DEFAULT_D_PERIOD,
    };
    let stoch = calculate_stochastic(
        series.highs(),
        series.lows(),
        closes,
        stochastic::DEFAULT_K_PERIOD,
        stochastic::DEFAULT_D_PERIOD,
    )?;

    Ok(IndicatorReadout {
        price: ctx.price,
        sma20: ctx.indicators.moving_averages.sma20,
        sma50: ctx.indicators.moving_averages.sma50,
        sma200: ctx.indicators.moving_averages.sma200,
        ema12: last(calculate_ema(closes, 12)?, IndicatorKind::Ema(12))?,
        ema26: last(calculate_ema(closes, 26)?, IndicatorKind::Ema(26))?,
        rsi: ctx.indicators.rsi,
        macd: ctx.indicators.macd,
        bollinger_bands: ctx.indicators.bollinger_bands,
        stochastic_k: last(stoch.k, stoch_kind)?,
        stochastic_d: last(stoch.d, stoch_kind)?,
        vwap: ctx.indicators.vwap,
    })
}

fn latest_sma(closes: &[f64], period: usize) -> Result<f64, IndicatorError> {
    last(calculate_sma(closes, period)?, IndicatorKind::Sma(period))
}

fn last(values: Vec<f64>, indicator: IndicatorKind) -> Result<f64, IndicatorError> {
    values
        .last()
        .copied()
        .ok_or(IndicatorError::InsufficientData {
            indicator,
            have: 0,
            need: 1,
        })
}
