use crate::domain::chat::{ChatMessage, CompletionMessage};
use crate::domain::ticker::TickerSymbol;
use crate::error::{Endpoint, RemoteError};
use crate::proxy::{PriceProxy, ReportProxy};
use crate::time::DateRange;
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct HttpPriceProxy {
    http: reqwest::Client,
    url: String,
}

impl HttpPriceProxy {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl PriceProxy for HttpPriceProxy {
    async fn fetch_prices(&self, ticker: &TickerSymbol, range: &DateRange) -> anyhow::Result<String> {
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("ticker", ticker.as_str().to_string()),
                ("startDate", range.start_param()),
                ("endDate", range.end_param()),
            ])
            .send()
            .await
            .with_context(|| format!("price proxy request failed for {ticker}"))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read price proxy response")?;
        if !status.is_success() {
            return Err(RemoteError::http(Endpoint::PriceProxy, status, format!("Worker error: {text}")).into());
        }

        Ok(text)
    }
}

#[derive(Debug, Clone)]
pub struct HttpReportProxy {
    http: reqwest::Client,
    url: String,
}

impl HttpReportProxy {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: String,
}

#[async_trait::async_trait]
impl ReportProxy for HttpReportProxy {
    async fn generate(&self, messages: &[ChatMessage]) -> anyhow::Result<CompletionMessage> {
        let res = self
            .http
            .post(&self.url)
            .json(messages)
            .send()
            .await
            .context("report proxy request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read report proxy response")?;
        if !status.is_success() {
            let detail = serde_json::from_str::<ProxyErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(RemoteError::http(Endpoint::ReportProxy, status, format!("Worker error: {detail}")).into());
        }

        serde_json::from_str::<CompletionMessage>(&text).map_err(|e| {
            RemoteError::decode(Endpoint::ReportProxy, format!("unexpected completion message: {e}")).into()
        })
    }
}
