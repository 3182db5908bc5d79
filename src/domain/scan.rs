//! Single-symbol analysis and bulk watch-list scans.
//!
//! A scan keeps going when one symbol fails: the failure is recorded as an
//! entry of its own and the remaining symbols are still analysed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::error::StockpickError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::series::PriceSeries;
use crate::domain::signal::{Action, TradingSignal};
use crate::domain::signal_generator::{MIN_SIGNAL_BARS, generate_signal_at};
use crate::ports::data_port::DataPort;

/// Confidence a BUY needs before it counts as a strong buy.
pub const STRONG_BUY_CONFIDENCE: u32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Most recent bars handed to the signal generator.
    pub lookback: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lookback: MIN_SIGNAL_BARS,
        }
    }
}

/// Latest-bar price summary shown next to each signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64,
}

impl Quote {
    pub fn from_bar(bar: &OhlcvBar) -> Self {
        Self {
            price: bar.close,
            change: bar.change(),
            change_percent: bar.change_percent(),
            volume: bar.volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub quote: Quote,
    pub signal: TradingSignal,
}

impl Analysis {
    /// BUY with high confidence that every indicator corroborates.
    pub fn is_strong_buy(&self) -> bool {
        let ind = &self.signal.indicators;
        let price = self.quote.price;
        self.signal.action == Action::Buy
            && self.signal.confidence >= STRONG_BUY_CONFIDENCE
            && ind.rsi < 40.0
            && ind.macd.macd > ind.macd.signal
            && price < ind.bollinger_bands.middle
            && price > ind.vwap
    }
}

/// Fetch, window and analyse one symbol.
pub fn analyze_symbol(
    data_port: &dyn DataPort,
    symbol: &str,
    config: &AnalysisConfig,
    timestamp: DateTime<Utc>,
) -> Result<Analysis, StockpickError> {
    let bars = data_port.fetch_ohlcv(symbol)?;
    let Some(latest) = bars.last() else {
        return Err(StockpickError::NoData {
            symbol: symbol.to_string(),
        });
    };
    let quote = Quote::from_bar(latest);

    let series = PriceSeries::from_bars(&bars).tail(config.lookback);
    let signal = generate_signal_at(symbol, &series, timestamp).map_err(|source| {
        StockpickError::Analysis {
            symbol: symbol.to_string(),
            source,
        }
    })?;

    tracing::info!(
        symbol,
        action = %signal.action,
        confidence = signal.confidence,
        bars = series.len(),
        "analysed"
    );

    Ok(Analysis { quote, signal })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScanOutcome {
    Ok(Analysis),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEntry {
    pub symbol: String,
    #[serde(flatten)]
    pub outcome: ScanOutcome,
}

impl ScanEntry {
    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.outcome {
            ScanOutcome::Ok(analysis) => Some(analysis),
            ScanOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total: usize,
    pub buy: usize,
    pub sell: usize,
    pub short: usize,
    pub hold: usize,
    pub failed: usize,
    pub strong_buy: usize,
}

impl ScanSummary {
    pub fn from_entries(entries: &[ScanEntry]) -> Self {
        let mut summary = Self {
            total: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            let Some(analysis) = entry.analysis() else {
                summary.failed += 1;
                continue;
            };
            match analysis.signal.action {
                Action::Buy => summary.buy += 1,
                Action::Sell => summary.sell += 1,
                Action::Short => summary.short += 1,
                Action::Hold => summary.hold += 1,
            }
            if analysis.is_strong_buy() {
                summary.strong_buy += 1;
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ScanEntry>,
    pub summary: ScanSummary,
}

pub fn run_scan(
    data_port: &dyn DataPort,
    symbols: &[String],
    config: &AnalysisConfig,
    timestamp: DateTime<Utc>,
) -> ScanReport {
    let entries: Vec<ScanEntry> = symbols
        .iter()
        .map(|symbol| {
            let outcome = match analyze_symbol(data_port, symbol, config, timestamp) {
                Ok(analysis) => ScanOutcome::Ok(analysis),
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "skipping symbol");
                    ScanOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            ScanEntry {
                symbol: symbol.clone(),
                outcome,
            }
        })
        .collect();

    let summary = ScanSummary::from_entries(&entries);
    tracing::info!(
        total = summary.total,
        failed = summary.failed,
        strong_buy = summary.strong_buy,
        "scan complete"
    );

    ScanReport {
        generated_at: timestamp,
        entries,
        summary,
    }
}
