//! Price-data proxy: `GET /?ticker=&startDate=&endDate=` forwarded to the aggregates provider.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use tickerbrief_core::prices::{PriceDataProvider, PriceQuery};

pub const MISSING_PARAMS: &str = "Missing required parameters";

#[derive(Clone)]
pub struct PriceProxyState {
    pub provider: Arc<dyn PriceDataProvider>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceParams {
    ticker: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

pub fn router(state: PriceProxyState, allowed_origin: &str) -> anyhow::Result<Router> {
    let cors = crate::cors::single_origin(allowed_origin, [Method::GET, Method::OPTIONS])?;

    Ok(Router::new()
        .route(
            "/",
            get(fetch_prices)
                // axum serves HEAD from the GET handler unless HEAD has its own route.
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/healthz", get(crate::healthz))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

async fn fetch_prices(
    State(state): State<PriceProxyState>,
    Query(params): Query<PriceParams>,
) -> Response {
    let Some(query) = PriceQuery::from_parts(params.ticker, params.start_date, params.end_date) else {
        return (StatusCode::BAD_REQUEST, MISSING_PARAMS).into_response();
    };

    match state.provider.fetch_daily_aggregates(&query).await {
        Ok(body) => {
            tracing::info!(
                ticker = %query.ticker,
                start_date = %query.start_date,
                end_date = %query.end_date,
                provider = state.provider.provider_name(),
                "served price aggregates"
            );
            Json(body).into_response()
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(ticker = %query.ticker, error = %err, "price fetch failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}")).into_response()
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed(method: Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{method} method not allowed."),
    )
        .into_response()
}
