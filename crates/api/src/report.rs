//! Report proxy: `POST /` with a chat message list, answered with the first completion message.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use tickerbrief_core::domain::chat::ChatMessage;
use tickerbrief_core::llm::LlmClient;

#[derive(Clone)]
pub struct ReportProxyState {
    pub llm: Arc<dyn LlmClient>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

pub fn router(state: ReportProxyState, allowed_origin: &str) -> anyhow::Result<Router> {
    let cors = crate::cors::single_origin(allowed_origin, [Method::POST, Method::OPTIONS])?;

    Ok(Router::new()
        .route(
            "/",
            post(generate_report)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/healthz", get(crate::healthz))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

// The body is taken raw so malformed input is reported like any other failure.
async fn generate_report(State(state): State<ReportProxyState>, body: Bytes) -> Response {
    let messages = match serde_json::from_slice::<Vec<ChatMessage>>(&body) {
        Ok(messages) => messages,
        Err(e) => {
            tracing::warn!(error = %e, "rejected malformed message list");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("invalid message list: {e}"),
            );
        }
    };

    match state.llm.complete_chat(&messages).await {
        Ok(message) => {
            tracing::info!(
                messages = messages.len(),
                provider = state.llm.provider_name(),
                "served chat completion"
            );
            Json(message).into_response()
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "chat completion failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}"))
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed(method: Method) -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{method} method not allowed."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    const ORIGIN: &str = "https://stocks.example.com";

    #[derive(Default)]
    struct FakeLlm {
        fail: bool,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    #[async_trait::async_trait]
    impl LlmClient for FakeLlm {
        fn provider_name(&self) -> &'static str {
            "fake"
        }

        async fn complete_chat(&self, messages: &[ChatMessage]) -> anyhow::Result<Value> {
            self.seen.lock().unwrap().push(messages.to_vec());
            if self.fail {
                anyhow::bail!("Incorrect API key provided");
            }
            Ok(json!({"role": "assistant", "content": "Buy TSLA."}))
        }
    }

    fn app(llm: Arc<FakeLlm>) -> Router {
        router(ReportProxyState { llm }, ORIGIN).unwrap()
    }

    async fn body_json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, ORIGIN)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn forwards_messages_and_returns_completion() {
        let llm = Arc::new(FakeLlm::default());
        let res = app(llm.clone())
            .oneshot(post_json(
                r#"[{"role":"system","content":"guru"},{"role":"user","content":"{}"}]"#,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
        assert_eq!(
            body_json(res).await,
            json!({"role": "assistant", "content": "Buy TSLA."})
        );

        let seen = llm.seen.lock().unwrap();
        assert_eq!(
            seen[0],
            vec![ChatMessage::system("guru"), ChatMessage::user("{}")]
        );
    }

    #[tokio::test]
    async fn get_is_method_not_allowed() {
        let res = app(Arc::new(FakeLlm::default()))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(res).await, json!({"error": "GET method not allowed."}));
    }

    #[tokio::test]
    async fn upstream_failure_is_json_server_error() {
        let llm = Arc::new(FakeLlm {
            fail: true,
            ..Default::default()
        });
        let res = app(llm).oneshot(post_json("[]")).await.unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(res).await,
            json!({"error": "Incorrect API key provided"})
        );
    }

    #[tokio::test]
    async fn malformed_body_is_server_error_without_upstream_call() {
        let llm = Arc::new(FakeLlm::default());
        let res = app(llm.clone())
            .oneshot(post_json(r#"{"role":"user"}"#))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid message list"));
        assert!(llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn preflight_allows_post_from_configured_origin() {
        let res = app(Arc::new(FakeLlm::default()))
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/")
                    .header(header::ORIGIN, ORIGIN)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let headers = res.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("POST"));
        let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("content-type"));
    }
}
