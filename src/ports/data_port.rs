//! Price data port trait.

use crate::domain::error::StockpickError;
use crate::domain::ohlcv::OhlcvBar;

pub trait DataPort {
    /// Full daily history for `symbol`, oldest first.
    fn fetch_ohlcv(&self, symbol: &str) -> Result<Vec<OhlcvBar>, StockpickError>;

    fn list_symbols(&self) -> Result<Vec<String>, StockpickError>;
}
