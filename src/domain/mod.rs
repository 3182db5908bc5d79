//! Core domain types and logic.

pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod ohlcv;
pub mod scan;
pub mod scoring;
pub mod series;
pub mod signal;
pub mod signal_generator;
pub mod watchlist;
