use chrono::{DateTime, Utc};

use crate::domain::ticker::TickerSymbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub tickers: Vec<TickerSymbol>,
    pub generated_at: DateTime<Utc>,
    pub text: String,
}
