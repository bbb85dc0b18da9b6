use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tickerbrief_core::orchestrator::ReportOrchestrator;
use tickerbrief_core::proxy::http::{HttpPriceProxy, HttpReportProxy};
use tickerbrief_core::session::view::View;
use tickerbrief_core::session::Session;
use tickerbrief_core::time::{resolve_date_range, DateRange, DEFAULT_TRADING_DAYS};

mod command;
mod render;

use command::Command;

#[derive(Debug, Parser)]
#[command(name = "tickerbrief")]
struct Args {
    /// Ticker to add before generating (repeatable). Without any, an interactive prompt starts.
    #[arg(long = "ticker", short = 't')]
    tickers: Vec<String>,

    /// Price proxy URL. Defaults to PRICE_PROXY_URL, then a local proxy.
    #[arg(long)]
    price_proxy_url: Option<String>,

    /// Report proxy URL. Defaults to REPORT_PROXY_URL, then a local proxy.
    #[arg(long)]
    report_proxy_url: Option<String>,

    /// First day of price data (YYYY-MM-DD).
    #[arg(long)]
    start_date: Option<String>,

    /// Last day of price data (YYYY-MM-DD). Defaults to the last weekday before today (UTC).
    #[arg(long)]
    end_date: Option<String>,

    /// Number of weekdays to cover when --start-date is not given.
    #[arg(long, default_value_t = DEFAULT_TRADING_DAYS)]
    trading_days: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = tickerbrief_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let range = resolve_date_range(
        args.start_date.as_deref(),
        args.end_date.as_deref(),
        chrono::Utc::now(),
        args.trading_days,
    )?;

    let http = tickerbrief_core::config::http_client(settings.http_timeout())?;
    let price_url = args
        .price_proxy_url
        .clone()
        .unwrap_or_else(|| settings.price_proxy_url().to_string());
    let report_url = args
        .report_proxy_url
        .clone()
        .unwrap_or_else(|| settings.report_proxy_url().to_string());

    tracing::info!(%range, %price_url, %report_url, "tickerbrief starting");

    let orchestrator = ReportOrchestrator::new(
        Arc::new(HttpPriceProxy::new(http.clone(), price_url)),
        Arc::new(HttpReportProxy::new(http, report_url)),
    );

    let mut session = Session::new();
    if args.tickers.is_empty() {
        run_interactive(&mut session, &orchestrator, &range).await
    } else {
        run_batch(&mut session, &orchestrator, &range, &args.tickers).await
    }
}

/// Submits every `--ticker` through the same validator, then generates once.
async fn run_batch(
    session: &mut Session,
    orchestrator: &ReportOrchestrator,
    range: &DateRange,
    tickers: &[String],
) -> anyhow::Result<()> {
    let mut out = std::io::stdout();

    for raw in tickers {
        if let Err(err) = session.submit_ticker(raw) {
            anyhow::bail!("ticker {raw:?} rejected: {err}");
        }
    }

    session
        .generate_report(orchestrator, range, |s| {
            let _ = render::draw(&View::of(s), &mut out);
        })
        .await?;

    match View::of(session).error {
        Some(message) => anyhow::bail!(message),
        None => Ok(()),
    }
}

async fn run_interactive(
    session: &mut Session,
    orchestrator: &ReportOrchestrator,
    range: &DateRange,
) -> anyhow::Result<()> {
    let mut out = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render::draw(&View::of(session), &mut out)?;
    render::prompt(&mut out)?;

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Nothing => {}
            Command::Quit => break,
            Command::Help => render::help(&mut out)?,
            Command::Reset => {
                session.reset();
                render::draw(&View::of(session), &mut out)?;
            }
            Command::Generate => {
                let result = session
                    .generate_report(orchestrator, range, |s| {
                        let _ = render::draw(&View::of(s), &mut out);
                    })
                    .await;
                if result.is_err() {
                    // Rejected before loading; the notice carries the reason.
                    render::draw(&View::of(session), &mut out)?;
                }
            }
            Command::Submit(raw) => {
                let _ = session.submit_ticker(&raw);
                render::draw(&View::of(session), &mut out)?;
            }
        }
        render::prompt(&mut out)?;
    }

    out.flush()?;
    Ok(())
}

fn init_sentry(settings: &tickerbrief_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
