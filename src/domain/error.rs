//! Domain error types.

use crate::domain::indicator::IndicatorKind;
use crate::domain::watchlist::WatchListError;

/// Errors raised by the indicator library and the signal generator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndicatorError {
    #[error("insufficient data for {indicator}: have {have} samples, need {need}")]
    InsufficientData {
        indicator: IndicatorKind,
        have: usize,
        need: usize,
    },

    #[error("invalid period for {indicator}: {reason}")]
    InvalidPeriod {
        indicator: IndicatorKind,
        reason: String,
    },

    #[error("misaligned input: {series} has {len} samples, expected {expected}")]
    MisalignedInput {
        series: &'static str,
        len: usize,
        expected: usize,
    },
}

/// Top-level error type for stockpick.
#[derive(Debug, thiserror::Error)]
pub enum StockpickError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("analysis failed for {symbol}: {source}")]
    Analysis {
        symbol: String,
        #[source]
        source: IndicatorError,
    },

    #[error(transparent)]
    WatchList(#[from] WatchListError),

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockpickError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            StockpickError::Io(_) | StockpickError::Report { .. } => 1,
            StockpickError::ConfigParse { .. }
            | StockpickError::ConfigMissing { .. }
            | StockpickError::ConfigInvalid { .. } => 2,
            StockpickError::Data { .. } | StockpickError::NoData { .. } => 3,
            StockpickError::WatchList(_) => 4,
            StockpickError::Analysis { .. } => 5,
        }
    }
}

impl From<&StockpickError> for std::process::ExitCode {
    fn from(err: &StockpickError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
