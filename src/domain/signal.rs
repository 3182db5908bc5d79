//! Trading signal record produced by the signal generator.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Recommended action. `Hold` is the fallback whenever no pattern fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Short,
    #[default]
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
            Action::Short => write!(f, "SHORT"),
            Action::Hold => write!(f, "HOLD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandReading {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovingAverages {
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
}

/// Most recent value of every indicator the generator computes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub macd: MacdReading,
    pub bollinger_bands: BandReading,
    pub moving_averages: MovingAverages,
    pub vwap: f64,
}

/// One scoring rule's contribution to the confidence total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub rule: &'static str,
    pub points: u32,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingSignal {
    pub symbol: String,
    pub action: Action,
    /// 0..=100, the clamped sum of all contributions.
    pub confidence: u32,
    pub reason: String,
    pub indicators: IndicatorSnapshot,
    pub contributions: Vec<Contribution>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MacdBias {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BandBias {
    Oversold,
    Overbought,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VwapBias {
    Above,
    Below,
}

impl IndicatorSnapshot {
    pub fn macd_bias(&self) -> MacdBias {
        if self.macd.macd > self.macd.signal {
            MacdBias::Bullish
        } else {
            MacdBias::Bearish
        }
    }

    pub fn band_bias(&self, price: f64) -> BandBias {
        if price < self.bollinger_bands.lower {
            BandBias::Oversold
        } else if price > self.bollinger_bands.upper {
            BandBias::Overbought
        } else {
            BandBias::Neutral
        }
    }

    pub fn vwap_bias(&self, price: f64) -> VwapBias {
        if price > self.vwap {
            VwapBias::Above
        } else {
            VwapBias::Below
        }
    }
}

impl fmt::Display for MacdBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacdBias::Bullish => write!(f, "BULLISH"),
            MacdBias::Bearish => write!(f, "BEARISH"),
        }
    }
}

impl fmt::Display for BandBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandBias::Oversold => write!(f, "OVERSOLD"),
            BandBias::Overbought => write!(f, "OVERBOUGHT"),
            BandBias::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

impl fmt::Display for VwapBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VwapBias::Above => write!(f, "ABOVE"),
            VwapBias::Below => write!(f, "BELOW"),
        }
    }
}
