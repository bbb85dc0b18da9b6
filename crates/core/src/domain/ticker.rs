use std::fmt;

pub const MIN_TICKER_LEN: usize = 3;
pub const MAX_TICKER_LEN: usize = 4;
pub const MAX_TICKERS: usize = 3;

/// An accepted, uppercase ticker symbol. Only constructed through [`TickerSet::try_add`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerRejection {
    TooShort,
    TooLong,
    AtCapacity,
    Duplicate,
}

impl fmt::Display for TickerRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TickerRejection::TooShort => "Ticker must be at least 3 characters long.",
            TickerRejection::TooLong => "Ticker must be no more than 4 characters long.",
            TickerRejection::AtCapacity => "You can only add up to 3 tickers.",
            TickerRejection::Duplicate => "Ticker already added.",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for TickerRejection {}

/// Insertion-ordered, de-duplicated symbols, never more than [`MAX_TICKERS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerSet {
    symbols: Vec<TickerSymbol>,
}

impl TickerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `raw` and appends its uppercase form. The set is untouched on rejection.
    ///
    /// Length is measured after uppercasing, since that can expand a character (`ß` -> `SS`).
    pub fn try_add(&mut self, raw: &str) -> Result<&TickerSymbol, TickerRejection> {
        let normalized = raw.to_uppercase();
        let len = normalized.chars().count();
        if len < MIN_TICKER_LEN {
            return Err(TickerRejection::TooShort);
        }
        if len > MAX_TICKER_LEN {
            return Err(TickerRejection::TooLong);
        }
        if self.is_full() {
            return Err(TickerRejection::AtCapacity);
        }

        if self.symbols.iter().any(|s| s.0 == normalized) {
            return Err(TickerRejection::Duplicate);
        }

        self.symbols.push(TickerSymbol(normalized));
        let idx = self.symbols.len() - 1;
        Ok(&self.symbols[idx])
    }

    pub fn symbols(&self) -> &[TickerSymbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.symbols.len() >= MAX_TICKERS
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}
