use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Single-origin CORS policy. Preflights are answered by the layer itself.
pub fn single_origin(origin: &str, methods: [Method; 2]) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("ALLOWED_ORIGIN is not a valid header value: {origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE]))
}
