use std::sync::Arc;

use tickerbrief_api::price::{router, PriceProxyState};
use tickerbrief_api::telemetry;
use tickerbrief_core::prices::polygon::PolygonProvider;

const DEFAULT_PORT: u16 = 8787;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = tickerbrief_core::config::Settings::from_env()?;
    let _sentry_guard = telemetry::init_sentry(&settings);
    telemetry::init_tracing();

    let provider = PolygonProvider::from_settings(&settings).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        e
    })?;

    tracing::info!(allowed_origin = settings.allowed_origin(), "starting price proxy");

    let state = PriceProxyState {
        provider: Arc::new(provider),
    };
    let app = router(state, settings.allowed_origin())?;

    tickerbrief_api::serve(app, "price_proxy", DEFAULT_PORT).await
}
