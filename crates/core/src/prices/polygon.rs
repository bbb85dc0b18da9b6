use crate::config::Settings;
use crate::error::{Endpoint, RemoteError};
use crate::prices::{strip_request_id, PriceDataProvider, PriceQuery};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

#[derive(Debug, Clone)]
pub struct PolygonProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PolygonProvider {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_polygon_api_key()?.to_string();
        let base_url = settings
            .polygon_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http = crate::config::http_client(settings.http_timeout())?;

        Ok(Self::new(http, base_url, api_key))
    }

    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// `{base}/v2/aggs/ticker/{ticker}/range/1/day/{start}/{end}`, each segment percent-encoded.
    fn url(&self, query: &PriceQuery) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid polygon base url: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("polygon base url cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend([
                "v2",
                "aggs",
                "ticker",
                query.ticker.as_str(),
                "range",
                "1",
                "day",
                query.start_date.as_str(),
                query.end_date.as_str(),
            ]);
        Ok(url)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl PriceDataProvider for PolygonProvider {
    fn provider_name(&self) -> &'static str {
        "polygon"
    }

    async fn fetch_daily_aggregates(&self, query: &PriceQuery) -> Result<Value> {
        let url = self.url(query)?;

        let res = self
            .http
            .get(url)
            .headers(self.headers()?)
            .send()
            .await
            .context("Polygon request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Polygon response body")?;
        if !status.is_success() {
            tracing::warn!(ticker = %query.ticker, %status, "Polygon returned an error status");
            return Err(RemoteError::http(
                Endpoint::Polygon,
                status,
                format!("Failed to fetch data from Polygon API. {text}"),
            )
            .into());
        }

        let body = serde_json::from_str::<Value>(&text)
            .map_err(|e| RemoteError::decode(Endpoint::Polygon, format!("response is not valid JSON: {e}")))?;
        Ok(strip_request_id(body))
    }
}
