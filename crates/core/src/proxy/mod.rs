//! Client side of the two proxies, as seen by the fetch orchestrator.

pub mod http;

use crate::domain::chat::{ChatMessage, CompletionMessage};
use crate::domain::ticker::TickerSymbol;
use crate::time::DateRange;

#[async_trait::async_trait]
pub trait PriceProxy: Send + Sync {
    /// Raw response body for one ticker over the range.
    async fn fetch_prices(&self, ticker: &TickerSymbol, range: &DateRange) -> anyhow::Result<String>;
}

#[async_trait::async_trait]
pub trait ReportProxy: Send + Sync {
    async fn generate(&self, messages: &[ChatMessage]) -> anyhow::Result<CompletionMessage>;
}
