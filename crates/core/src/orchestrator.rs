use crate::domain::chat::ChatMessage;
use crate::domain::report::Report;
use crate::domain::ticker::TickerSymbol;
use crate::prompt::PromptTemplate;
use crate::proxy::{PriceProxy, ReportProxy};
use crate::time::DateRange;
use std::fmt;
use std::sync::Arc;

pub const PRICE_FETCH_FAILED: &str = "There was an error fetching stock data.";
pub const REPORT_FAILED: &str = "Unable to access AI. Please refresh and try again";

#[derive(Debug)]
pub enum ReportError {
    NoTickers,
    PriceFetch {
        ticker: TickerSymbol,
        source: anyhow::Error,
    },
    ReportGeneration(anyhow::Error),
}

impl ReportError {
    /// Generic text shown to the user. Details stay in logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ReportError::NoTickers | ReportError::PriceFetch { .. } => PRICE_FETCH_FAILED,
            ReportError::ReportGeneration(_) => REPORT_FAILED,
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::NoTickers => f.write_str("no tickers to report on"),
            ReportError::PriceFetch { ticker, source } => {
                write!(f, "price fetch failed for {ticker}: {source:#}")
            }
            ReportError::ReportGeneration(source) => {
                write!(f, "report generation failed: {source:#}")
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::NoTickers => None,
            ReportError::PriceFetch { source, .. } | ReportError::ReportGeneration(source) => {
                let source: &(dyn std::error::Error + 'static) = &**source;
                Some(source)
            }
        }
    }
}

/// Fans out one price request per ticker, joins them fail-fast, and turns the concatenated
/// payloads into a single report request.
#[derive(Clone)]
pub struct ReportOrchestrator {
    prices: Arc<dyn PriceProxy>,
    reports: Arc<dyn ReportProxy>,
    prompt: PromptTemplate,
}

impl ReportOrchestrator {
    pub fn new(prices: Arc<dyn PriceProxy>, reports: Arc<dyn ReportProxy>) -> Self {
        Self {
            prices,
            reports,
            prompt: PromptTemplate::default(),
        }
    }

    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// All price bodies concatenated in ticker order. The first failure wins; requests still in
    /// flight are dropped.
    pub async fn fetch_prices(
        &self,
        tickers: &[TickerSymbol],
        range: &DateRange,
    ) -> Result<String, ReportError> {
        if tickers.is_empty() {
            return Err(ReportError::NoTickers);
        }

        tracing::info!(tickers = tickers.len(), %range, "fetching prices");

        let requests = tickers.iter().map(|ticker| async move {
            self.prices
                .fetch_prices(ticker, range)
                .await
                .map_err(|source| ReportError::PriceFetch {
                    ticker: ticker.clone(),
                    source,
                })
        });
        let bodies = futures::future::try_join_all(requests).await?;

        Ok(bodies.concat())
    }

    pub fn messages(&self, price_data: &str) -> Vec<ChatMessage> {
        self.prompt.messages(price_data)
    }

    pub async fn request_report(
        &self,
        tickers: &[TickerSymbol],
        price_data: &str,
    ) -> Result<Report, ReportError> {
        let messages = self.messages(price_data);
        let completion = self
            .reports
            .generate(&messages)
            .await
            .map_err(ReportError::ReportGeneration)?;

        let text = completion
            .content
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ReportError::ReportGeneration(anyhow::anyhow!(
                    "completion message (role={}) had no text content",
                    completion.role
                ))
            })?;

        Ok(Report {
            tickers: tickers.to_vec(),
            generated_at: chrono::Utc::now(),
            text,
        })
    }

    pub async fn generate(
        &self,
        tickers: &[TickerSymbol],
        range: &DateRange,
    ) -> Result<Report, ReportError> {
        let price_data = self.fetch_prices(tickers, range).await?;
        self.request_report(tickers, &price_data).await
    }
}
