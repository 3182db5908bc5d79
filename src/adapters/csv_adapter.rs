//! CSV file data adapter.
//!
//! One file per symbol, `<dir>/<SYMBOL>.csv`, with header
//! `date,open,high,low,close,volume` and ISO dates.

use crate::domain::error::StockpickError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
    line: u64,
    symbol: &str,
) -> Result<&'a str, StockpickError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| StockpickError::Data {
            reason: format!("{}.csv line {}: missing {} column", symbol, line, name),
        })
}

fn number(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: u64,
    symbol: &str,
) -> Result<f64, StockpickError> {
    let raw = field(record, index, name, line, symbol)?;
    let value: f64 = raw.parse().map_err(|e| StockpickError::Data {
        reason: format!("{}.csv line {}: invalid {} value '{}': {}", symbol, line, name, raw, e),
    })?;
    if !value.is_finite() {
        return Err(StockpickError::Data {
            reason: format!("{}.csv line {}: {} value '{}' is not finite", symbol, line, name, raw),
        });
    }
    Ok(value)
}

fn volume(record: &csv::StringRecord, line: u64, symbol: &str) -> Result<f64, StockpickError> {
    let value = number(record, 5, "volume", line, symbol)?;
    if value < 0.0 {
        return Err(StockpickError::Data {
            reason: format!("{}.csv line {}: negative volume {}", symbol, line, value),
        });
    }
    Ok(value)
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(&self, symbol: &str) -> Result<Vec<OhlcvBar>, StockpickError> {
        let path = self.csv_path(symbol);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StockpickError::NoData {
                    symbol: symbol.to_string(),
                });
            }
            Err(e) => {
                return Err(StockpickError::Data {
                    reason: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StockpickError::Data {
                reason: format!("{}.csv: CSV parse error: {}", symbol, e),
            })?;
            let line = record.position().map_or(0, |p| p.line());

            let date_str = field(&record, 0, "date", line, symbol)?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                StockpickError::Data {
                    reason: format!("{}.csv line {}: invalid date '{}': {}", symbol, line, date_str, e),
                }
            })?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open: number(&record, 1, "open", line, symbol)?,
                high: number(&record, 2, "high", line, symbol)?,
                low: number(&record, 3, "low", line, symbol)?,
                close: number(&record, 4, "close", line, symbol)?,
                volume: volume(&record, line, symbol)?,
            });
        }

        bars.sort_by_key(|b| b.date);
        tracing::debug!(symbol, bars = bars.len(), path = %path.display(), "loaded bars");
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockpickError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StockpickError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| StockpickError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
