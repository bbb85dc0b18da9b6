use std::fmt;

/// Which remote hop a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Polygon,
    OpenAi,
    PriceProxy,
    ReportProxy,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Polygon => "polygon",
            Endpoint::OpenAi => "openai",
            Endpoint::PriceProxy => "price_proxy",
            Endpoint::ReportProxy => "report_proxy",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct RemoteError {
    pub endpoint: Endpoint,
    pub stage: &'static str,
    pub detail: String,
    pub status: Option<u16>,
}

impl RemoteError {
    pub fn http(endpoint: Endpoint, status: reqwest::StatusCode, detail: impl Into<String>) -> Self {
        Self {
            endpoint,
            stage: "http",
            detail: detail.into(),
            status: Some(status.as_u16()),
        }
    }

    pub fn decode(endpoint: Endpoint, detail: impl Into<String>) -> Self {
        Self {
            endpoint,
            stage: "decode",
            detail: detail.into(),
            status: None,
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "{} error (stage={}, status={status}): {}",
                self.endpoint, self.stage, self.detail
            ),
            None => write!(
                f,
                "{} error (stage={}): {}",
                self.endpoint, self.stage, self.detail
            ),
        }
    }
}

impl std::error::Error for RemoteError {}
