//! CSV scan export implementing ReportPort.
//!
//! One row per scanned symbol. Failed symbols keep their row with `ERROR` in
//! the signal column and the error text as the reason.

use std::fs;
use std::path::Path;

use crate::domain::error::StockpickError;
use crate::domain::scan::{ScanEntry, ScanOutcome, ScanReport};
use crate::ports::report_port::ReportPort;

pub const HEADER: [&str; 12] = [
    "Symbol",
    "Price",
    "Change",
    "Change%",
    "Volume",
    "Signal",
    "Confidence",
    "RSI",
    "MACD Signal",
    "Bollinger Signal",
    "VWAP Signal",
    "Reason",
];

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn row(entry: &ScanEntry) -> Vec<String> {
        match &entry.outcome {
            ScanOutcome::Ok(analysis) => {
                let quote = &analysis.quote;
                let signal = &analysis.signal;
                let ind = &signal.indicators;
                vec![
                    entry.symbol.clone(),
                    format!("{:.2}", quote.price),
                    format!("{:.2}", quote.change),
                    format!("{:.2}", quote.change_percent),
                    format!("{:.0}", quote.volume),
                    signal.action.to_string(),
                    signal.confidence.to_string(),
                    format!("{:.2}", ind.rsi),
                    ind.macd_bias().to_string(),
                    ind.band_bias(quote.price).to_string(),
                    ind.vwap_bias(quote.price).to_string(),
                    signal.reason.clone(),
                ]
            }
            ScanOutcome::Failed { error } => {
                let mut row = vec![String::new(); HEADER.len()];
                row[0] = entry.symbol.clone();
                row[5] = "ERROR".to_string();
                row[11] = error.clone();
                row
            }
        }
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_error(e: csv::Error) -> StockpickError {
    StockpickError::Report {
        reason: format!("CSV write error: {}", e),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &ScanReport, output_path: &Path) -> Result<(), StockpickError> {
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(output_path).map_err(csv_error)?;
        writer.write_record(HEADER).map_err(csv_error)?;
        for entry in &report.entries {
            writer.write_record(Self::row(entry)).map_err(csv_error)?;
        }
        writer.flush()?;

        tracing::info!(path = %output_path.display(), rows = report.entries.len(), "wrote CSV report");
        Ok(())
    }
}
