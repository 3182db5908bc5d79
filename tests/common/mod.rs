#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
pub use stockpick::domain::ohlcv::OhlcvBar;
use stockpick::domain::error::StockpickError;
use stockpick::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(&self, symbol: &str) -> Result<Vec<OhlcvBar>, StockpickError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StockpickError::Data {
                reason: reason.clone(),
            });
        }
        self.data
            .get(symbol)
            .cloned()
            .ok_or_else(|| StockpickError::NoData {
                symbol: symbol.to_string(),
            })
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockpickError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

/// Bars with high = low = open = close, one per calendar day.
pub fn bars_from_closes(symbol: &str, closes: &[f64], volumes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| OhlcvBar {
            symbol: symbol.to_string(),
            date: start_date() + Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        })
        .collect()
}

pub fn flat_volumes(len: usize) -> Vec<f64> {
    vec![1000.0; len]
}

/// 170 bars at 100, then 30 bars falling one point a bar to 71.
pub fn declining_closes() -> Vec<f64> {
    let mut closes = vec![100.0; 170];
    closes.extend((0..30).map(|i| 100.0 - i as f64));
    closes
}

/// Mirror of [`declining_closes`]: 170 bars at 100, then up to 129.
pub fn rising_closes() -> Vec<f64> {
    let mut closes = vec![100.0; 170];
    closes.extend((0..30).map(|i| 100.0 + i as f64));
    closes
}

pub fn flat_closes(len: usize) -> Vec<f64> {
    vec![100.0; len]
}

pub fn write_symbol_csv(dir: &Path, symbol: &str, bars: &[OhlcvBar]) {
    let mut content = String::from("date,open,high,low,close,volume\n");
    for bar in bars {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.date.format("%Y-%m-%d"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }
    fs::write(dir.join(format!("{}.csv", symbol)), content).unwrap();
}
