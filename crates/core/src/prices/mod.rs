pub mod polygon;

use serde_json::Value;

/// Upstream field dropped from every aggregate response so identical queries produce identical
/// bodies for the caching layer in front of the report proxy.
pub const STRIPPED_FIELD: &str = "request_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
}

impl PriceQuery {
    /// All three parts must be present and non-empty.
    pub fn from_parts(
        ticker: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        Some(Self {
            ticker: present(ticker)?,
            start_date: present(start_date)?,
            end_date: present(end_date)?,
        })
    }
}

#[async_trait::async_trait]
pub trait PriceDataProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Daily aggregates for the query, with [`STRIPPED_FIELD`] already removed.
    async fn fetch_daily_aggregates(&self, query: &PriceQuery) -> anyhow::Result<Value>;
}

pub fn strip_request_id(mut body: Value) -> Value {
    if let Value::Object(map) = &mut body {
        map.remove(STRIPPED_FIELD);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_only_request_id() {
        let body = json!({
            "ticker": "TSLA",
            "request_id": "6a7e466379af0a71039d60cc78e72282",
            "results": [{"o": 223.98, "c": 202.11}],
            "status": "OK",
        });
        let out = strip_request_id(body);
        assert_eq!(
            out,
            json!({
                "ticker": "TSLA",
                "results": [{"o": 223.98, "c": 202.11}],
                "status": "OK",
            })
        );
    }

    #[test]
    fn non_objects_pass_through() {
        assert_eq!(strip_request_id(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn query_requires_every_part() {
        let s = |v: &str| Some(v.to_string());
        assert!(PriceQuery::from_parts(s("TSLA"), s("2026-01-05"), s("2026-01-07")).is_some());
        assert!(PriceQuery::from_parts(None, s("2026-01-05"), s("2026-01-07")).is_none());
        assert!(PriceQuery::from_parts(s("TSLA"), s(""), s("2026-01-07")).is_none());
        assert!(PriceQuery::from_parts(s("TSLA"), s("2026-01-05"), None).is_none());
    }
}
