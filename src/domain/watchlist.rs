//! Watch-list parsing.
//!
//! Turns free text (comma, semicolon, pipe or whitespace separated) into an
//! ordered, de-duplicated list of upper-case ticker symbols.

use std::collections::HashSet;

pub const MAX_SYMBOL_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchList {
    pub symbols: Vec<String>,
    /// Tokens that did not look like a ticker, upper-cased, in input order.
    pub rejected: Vec<String>,
}

impl WatchList {
    pub fn count(&self) -> usize {
        self.symbols.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchListError {
    #[error("no valid symbols in watch list")]
    Empty,

    #[error("invalid symbol '{0}'")]
    InvalidSymbol(String),
}

pub fn parse_symbols(input: &str) -> Result<WatchList, WatchListError> {
    let mut symbols = Vec::new();
    let mut rejected = Vec::new();
    let mut seen = HashSet::new();

    let tokens = input
        .split(|c: char| matches!(c, ',' | ';' | '|') || c.is_whitespace())
        .filter(|t| !t.is_empty());

    for token in tokens {
        let symbol = token.to_uppercase();
        if !is_valid_symbol(&symbol) {
            tracing::warn!(token = %symbol, "ignoring invalid symbol");
            rejected.push(symbol);
            continue;
        }
        if seen.insert(symbol.clone()) {
            symbols.push(symbol);
        }
    }

    if symbols.is_empty() {
        return Err(WatchListError::Empty);
    }

    Ok(WatchList { symbols, rejected })
}

/// Normalises a single ticker (trim, upper-case) and rejects anything
/// [`is_valid_symbol`] refuses.
pub fn parse_symbol(input: &str) -> Result<String, WatchListError> {
    let symbol = input.trim().to_uppercase();
    if is_valid_symbol(&symbol) {
        Ok(symbol)
    } else {
        Err(WatchListError::InvalidSymbol(symbol))
    }
}

/// Leading ASCII letter, then letters, digits, `.` or `-`; at most
/// [`MAX_SYMBOL_LEN`] characters.
pub fn is_valid_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    symbol.len() <= MAX_SYMBOL_LEN
        && first.is_ascii_uppercase()
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-')
}
