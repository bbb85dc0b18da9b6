//! Explicit per-user session state: the ticker store plus where the UI is in the
//! collect → load → report cycle.

pub mod view;

use crate::domain::report::Report;
use crate::domain::ticker::{TickerRejection, TickerSet, TickerSymbol};
use crate::orchestrator::{ReportError, ReportOrchestrator};
use crate::time::DateRange;
use std::fmt;

pub const QUERYING_STATUS: &str = "Querying Stocks API...";
pub const CREATING_REPORT_STATUS: &str = "Creating report...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    Loading { status: String },
    Failed { message: String },
    Ready { report: Report },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Rejected(TickerRejection),
    NotCollecting,
    NoTickers,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Rejected(r) => write!(f, "{r}"),
            SessionError::NotCollecting => f.write_str("Reset the session to add new tickers."),
            SessionError::NoTickers => f.write_str(
                "You must add at least one ticker. A ticker is a 3 letter or more code for a stock. E.g TSLA for Tesla.",
            ),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    tickers: TickerSet,
    phase: Phase,
    notice: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            tickers: TickerSet::new(),
            phase: Phase::Collecting,
            notice: None,
        }
    }

    pub fn tickers(&self) -> &TickerSet {
        &self.tickers
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Inline validation message for the input form, if the last action was rejected.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.phase, Phase::Collecting) && !self.tickers.is_full()
    }

    pub fn can_generate(&self) -> bool {
        matches!(self.phase, Phase::Collecting) && !self.tickers.is_empty()
    }

    pub fn submit_ticker(&mut self, raw: &str) -> Result<TickerSymbol, SessionError> {
        if !matches!(self.phase, Phase::Collecting) {
            return Err(self.reject(SessionError::NotCollecting));
        }

        match self.tickers.try_add(raw) {
            Ok(symbol) => {
                let symbol = symbol.clone();
                self.notice = None;
                tracing::debug!(%symbol, count = self.tickers.len(), "ticker added");
                Ok(symbol)
            }
            Err(rejection) => Err(self.reject(SessionError::Rejected(rejection))),
        }
    }

    /// Moves to the loading panel and hands back the tickers to fetch.
    pub fn begin_generation(&mut self) -> Result<Vec<TickerSymbol>, SessionError> {
        if !matches!(self.phase, Phase::Collecting) {
            return Err(self.reject(SessionError::NotCollecting));
        }
        if self.tickers.is_empty() {
            return Err(self.reject(SessionError::NoTickers));
        }

        self.notice = None;
        self.phase = Phase::Loading {
            status: QUERYING_STATUS.to_string(),
        };
        Ok(self.tickers.symbols().to_vec())
    }

    pub fn prices_fetched(&mut self) {
        if let Phase::Loading { status } = &mut self.phase {
            *status = CREATING_REPORT_STATUS.to_string();
        }
    }

    pub fn complete(&mut self, report: Report) {
        self.phase = Phase::Ready { report };
    }

    pub fn fail(&mut self, err: &ReportError) {
        tracing::error!(error = %err, "report generation failed");
        self.phase = Phase::Failed {
            message: err.user_message().to_string(),
        };
    }

    /// Clears everything. Valid from every phase.
    pub fn reset(&mut self) {
        self.tickers.clear();
        self.notice = None;
        self.phase = Phase::Collecting;
    }

    /// Runs the whole loading sequence, calling `on_change` after every transition.
    pub async fn generate_report(
        &mut self,
        orchestrator: &ReportOrchestrator,
        range: &DateRange,
        mut on_change: impl FnMut(&Session),
    ) -> Result<(), SessionError> {
        let tickers = self.begin_generation()?;
        on_change(&*self);

        let outcome = match orchestrator.fetch_prices(&tickers, range).await {
            Ok(price_data) => {
                self.prices_fetched();
                on_change(&*self);
                orchestrator.request_report(&tickers, &price_data).await
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(report) => self.complete(report),
            Err(err) => self.fail(&err),
        }
        on_change(&*self);
        Ok(())
    }

    fn reject(&mut self, err: SessionError) -> SessionError {
        self.notice = Some(err.to_string());
        err
    }
}
