#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// Serves `app` on an ephemeral local port and returns its base url.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Debug, Clone)]
pub struct SeenAggregate {
    pub ticker: String,
    pub start: String,
    pub end: String,
    pub authorization: Option<String>,
    pub query: Option<String>,
}

#[derive(Clone, Default)]
pub struct FakePolygon {
    pub seen: Arc<Mutex<Vec<SeenAggregate>>>,
}

impl FakePolygon {
    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/v2/aggs/ticker/:ticker/range/1/day/:start/:end",
                get(aggregates),
            )
            .with_state(self.clone())
    }

    pub fn calls(&self) -> Vec<SeenAggregate> {
        self.seen.lock().unwrap().clone()
    }
}

async fn aggregates(
    State(fake): State<FakePolygon>,
    Path((ticker, start, end)): Path<(String, String, String)>,
    headers: HeaderMap,
    uri: axum::http::Uri,
) -> Response {
    fake.seen.lock().unwrap().push(SeenAggregate {
        ticker: ticker.clone(),
        start: start.clone(),
        end: end.clone(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        query: uri.query().map(str::to_string),
    });

    if ticker == "FAIL" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"status": "NOT_FOUND", "message": "ticker not found"})),
        )
            .into_response();
    }

    Json(json!({
        "ticker": ticker,
        "queryCount": 3,
        "resultsCount": 3,
        "adjusted": true,
        "results": [
            {"o": 223.98, "c": 215.0, "t": 1_767_571_200_000_i64},
            {"o": 215.0, "c": 210.4, "t": 1_767_657_600_000_i64},
            {"o": 210.4, "c": 202.11, "t": 1_767_744_000_000_i64},
        ],
        "status": "OK",
        "request_id": format!("req-{ticker}-{start}-{end}"),
        "count": 3,
    }))
    .into_response()
}

#[derive(Clone, Default)]
pub struct FakeOpenAi {
    pub seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    pub reply: Arc<Mutex<Option<(StatusCode, Value)>>>,
}

impl FakeOpenAi {
    pub fn replying(status: StatusCode, body: Value) -> Self {
        let fake = Self::default();
        *fake.reply.lock().unwrap() = Some((status, body));
        fake
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/chat/completions", post(chat_completions))
            .with_state(self.clone())
    }

    pub fn calls(&self) -> Vec<(Option<String>, Value)> {
        self.seen.lock().unwrap().clone()
    }
}

async fn chat_completions(
    State(fake): State<FakeOpenAi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.seen.lock().unwrap().push((auth, body));

    if let Some((status, body)) = fake.reply.lock().unwrap().clone() {
        return (status, Json(body)).into_response();
    }

    Json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "TSLA slid while AAPL climbed. Hold both."},
            "finish_reason": "stop",
        }],
    }))
    .into_response()
}
