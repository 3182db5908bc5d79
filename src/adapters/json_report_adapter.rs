//! JSON scan export implementing ReportPort.

use std::fs;
use std::path::Path;

use crate::domain::error::StockpickError;
use crate::domain::scan::ScanReport;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &ScanReport, output_path: &Path) -> Result<(), StockpickError> {
        let json = serde_json::to_string_pretty(report).map_err(|e| StockpickError::Report {
            reason: format!("JSON encode error: {}", e),
        })?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, json)?;

        tracing::info!(path = %output_path.display(), "wrote JSON report");
        Ok(())
    }
}
