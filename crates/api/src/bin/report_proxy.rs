use std::sync::Arc;

use tickerbrief_api::report::{router, ReportProxyState};
use tickerbrief_api::telemetry;
use tickerbrief_core::llm::openai::OpenAiClient;

const DEFAULT_PORT: u16 = 8788;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = tickerbrief_core::config::Settings::from_env()?;
    let _sentry_guard = telemetry::init_sentry(&settings);
    telemetry::init_tracing();

    let llm = OpenAiClient::from_settings(&settings).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        e
    })?;

    tracing::info!(
        allowed_origin = settings.allowed_origin(),
        model = llm.model(),
        "starting report proxy"
    );

    let state = ReportProxyState { llm: Arc::new(llm) };
    let app = router(state, settings.allowed_origin())?;

    tickerbrief_api::serve(app, "report_proxy", DEFAULT_PORT).await
}
