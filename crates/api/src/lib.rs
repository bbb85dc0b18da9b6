pub mod cors;
pub mod price;
pub mod report;
pub mod telemetry;

use axum::Router;

pub async fn healthz() -> &'static str {
    "ok"
}

/// Binds `0.0.0.0:$PORT` (or `default_port`) and serves until ctrl-c.
pub async fn serve(app: Router, service: &'static str, default_port: u16) -> anyhow::Result<()> {
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_port);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, service, "proxy listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
