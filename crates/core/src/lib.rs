pub mod domain;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod prices;
pub mod prompt;
pub mod proxy;
pub mod session;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
    pub const DEFAULT_PRICE_PROXY_URL: &str = "http://127.0.0.1:8787/";
    pub const DEFAULT_REPORT_PROXY_URL: &str = "http://127.0.0.1:8788/";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub polygon_api_key: Option<String>,
        pub polygon_base_url: Option<String>,
        pub openai_api_key: Option<String>,
        pub openai_base_url: Option<String>,
        pub openai_model: Option<String>,
        pub allowed_origin: Option<String>,
        pub price_proxy_url: Option<String>,
        pub report_proxy_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub http_timeout_secs: Option<u64>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let http_timeout_secs = match non_empty_var("HTTP_TIMEOUT_SECS") {
                Some(s) => Some(
                    s.parse::<u64>()
                        .with_context(|| format!("HTTP_TIMEOUT_SECS must be an integer (got {s})"))?,
                ),
                None => None,
            };

            Ok(Self {
                polygon_api_key: non_empty_var("POLYGON_API_KEY"),
                polygon_base_url: non_empty_var("POLYGON_BASE_URL"),
                openai_api_key: non_empty_var("OPENAI_API_KEY"),
                openai_base_url: non_empty_var("OPENAI_BASE_URL"),
                openai_model: non_empty_var("OPENAI_MODEL"),
                allowed_origin: non_empty_var("ALLOWED_ORIGIN"),
                price_proxy_url: non_empty_var("PRICE_PROXY_URL"),
                report_proxy_url: non_empty_var("REPORT_PROXY_URL"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                http_timeout_secs,
            })
        }

        pub fn require_polygon_api_key(&self) -> anyhow::Result<&str> {
            self.polygon_api_key
                .as_deref()
                .context("POLYGON_API_KEY is required")
        }

        pub fn require_openai_api_key(&self) -> anyhow::Result<&str> {
            self.openai_api_key
                .as_deref()
                .context("OPENAI_API_KEY is required")
        }

        pub fn allowed_origin(&self) -> &str {
            self.allowed_origin
                .as_deref()
                .unwrap_or(DEFAULT_ALLOWED_ORIGIN)
        }

        pub fn price_proxy_url(&self) -> &str {
            self.price_proxy_url
                .as_deref()
                .unwrap_or(DEFAULT_PRICE_PROXY_URL)
        }

        pub fn report_proxy_url(&self) -> &str {
            self.report_proxy_url
                .as_deref()
                .unwrap_or(DEFAULT_REPORT_PROXY_URL)
        }

        /// `None` means requests may wait forever on a stalled upstream.
        pub fn http_timeout(&self) -> Option<Duration> {
            self.http_timeout_secs.map(Duration::from_secs)
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    /// Builds the shared reqwest client, honoring the optional timeout.
    pub fn http_client(timeout: Option<Duration>) -> anyhow::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("failed to build reqwest client")
    }
}
