//! Scan report port trait.

use crate::domain::error::StockpickError;
use crate::domain::scan::ScanReport;
use std::path::Path;

/// Port for exporting a bulk scan.
pub trait ReportPort {
    fn write(&self, report: &ScanReport, output_path: &Path) -> Result<(), StockpickError>;
}
