//! Configuration validation.
//!
//! Validates config fields before any analysis runs.

use crate::domain::error::StockpickError;
use crate::domain::signal_generator::MIN_SIGNAL_BARS;
use crate::domain::watchlist::parse_symbols;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LOOKBACK: i64 = MIN_SIGNAL_BARS as i64;
pub const OUTPUT_FORMATS: &[&str] = &["text", "json"];

/// Checks every key `validate` reports on, including `[data] dir`.
pub fn validate_config(config: &dyn ConfigPort) -> Result<(), StockpickError> {
    validate_data_dir(config)?;
    validate_analysis_config(config)
}

/// Checks the analysis and output keys. `[data] dir` may come from the
/// command line instead, so it is validated separately.
pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), StockpickError> {
    validate_lookback(config)?;
    validate_symbols(config)?;
    validate_output_format(config)?;
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), StockpickError> {
    match config.get_string("data", "dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(StockpickError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        }),
    }
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), StockpickError> {
    let Some(raw) = config.get_string("analysis", "lookback") else {
        return Ok(());
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| StockpickError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "lookback".to_string(),
            reason: format!("'{}' is not a whole number", raw.trim()),
        })?;
    if value < DEFAULT_LOOKBACK {
        return Err(StockpickError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "lookback".to_string(),
            reason: format!("lookback must be at least {}", MIN_SIGNAL_BARS),
        });
    }
    Ok(())
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), StockpickError> {
    match config.get_string("analysis", "symbols") {
        None => Ok(()),
        Some(s) => parse_symbols(&s)
            .map(|_| ())
            .map_err(|e| StockpickError::ConfigInvalid {
                section: "analysis".to_string(),
                key: "symbols".to_string(),
                reason: e.to_string(),
            }),
    }
}

fn validate_output_format(config: &dyn ConfigPort) -> Result<(), StockpickError> {
    match config.get_string("output", "format") {
        None => Ok(()),
        Some(s) if OUTPUT_FORMATS.contains(&s.trim().to_lowercase().as_str()) => Ok(()),
        Some(s) => Err(StockpickError::ConfigInvalid {
            section: "output".to_string(),
            key: "format".to_string(),
            reason: format!("unknown format '{}', expected text or json", s.trim()),
        }),
    }
}
