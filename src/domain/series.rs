//! Aligned price/volume sequences handed to the indicator library.

use crate::domain::error::IndicatorError;
use crate::domain::indicator::require_aligned;
use crate::domain::ohlcv::OhlcvBar;

/// Parallel close/high/low/volume sequences, oldest first.
///
/// All four sequences always have the same length; constructors reject
/// anything else with [`IndicatorError::MisalignedInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    closes: Vec<f64>,
    highs: Vec<f64>,
    lows: Vec<f64>,
    volumes: Vec<f64>,
}

impl PriceSeries {
    pub fn new(
        closes: Vec<f64>,
        highs: Vec<f64>,
        lows: Vec<f64>,
        volumes: Vec<f64>,
    ) -> Result<Self, IndicatorError> {
        require_aligned("highs", highs.len(), closes.len())?;
        require_aligned("lows", lows.len(), closes.len())?;
        require_aligned("volumes", volumes.len(), closes.len())?;
        Ok(Self {
            closes,
            highs,
            lows,
            volumes,
        })
    }

    /// Split bars (assumed oldest first) into aligned sequences.
    pub fn from_bars(bars: &[OhlcvBar]) -> Self {
        Self {
            closes: bars.iter().map(|b| b.close).collect(),
            highs: bars.iter().map(|b| b.high).collect(),
            lows: bars.iter().map(|b| b.low).collect(),
            volumes: bars.iter().map(|b| b.volume).collect(),
        }
    }

    /// Keep only the most recent `count` samples.
    pub fn tail(&self, count: usize) -> Self {
        let start = self.len().saturating_sub(count);
        Self {
            closes: self.closes[start..].to_vec(),
            highs: self.highs[start..].to_vec(),
            lows: self.lows[start..].to_vec(),
            volumes: self.volumes[start..].to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn highs(&self) -> &[f64] {
        &self.highs
    }

    pub fn lows(&self) -> &[f64] {
        &self.lows
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }
}
