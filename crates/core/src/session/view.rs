use crate::session::{Phase, Session};

pub const DEFAULT_LABEL: &str =
    "Add up to 3 stock tickers below to get a super accurate stock predictions report";
pub const DEFAULT_TICKER_TEXT: &str = "Your tickers will appear here...";
pub const RESET_LABEL: &str = "Add New Tickers";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Input,
    Loading,
    Output,
}

/// Everything a front-end needs to draw one frame. Derived from [`Session`], never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub panel: Panel,
    pub label: String,
    pub label_is_error: bool,
    pub tickers: Vec<String>,
    pub ticker_placeholder: Option<&'static str>,
    pub submit_enabled: bool,
    pub generate_enabled: bool,
    pub loading_status: Option<String>,
    pub error: Option<String>,
    pub report: Option<String>,
    pub reset_visible: bool,
}

impl View {
    pub fn of(session: &Session) -> Self {
        let tickers: Vec<String> = session
            .tickers()
            .symbols()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let ticker_placeholder = tickers.is_empty().then_some(DEFAULT_TICKER_TEXT);

        let (label, label_is_error) = match session.notice() {
            Some(notice) => (notice.to_string(), true),
            None => (DEFAULT_LABEL.to_string(), false),
        };

        let mut view = Self {
            panel: Panel::Input,
            label,
            label_is_error,
            tickers,
            ticker_placeholder,
            submit_enabled: session.can_submit(),
            generate_enabled: session.can_generate(),
            loading_status: None,
            error: None,
            report: None,
            reset_visible: false,
        };

        match session.phase() {
            Phase::Collecting => {}
            Phase::Loading { status } => {
                view.panel = Panel::Loading;
                view.loading_status = Some(status.clone());
            }
            Phase::Failed { message } => {
                view.error = Some(message.clone());
                view.reset_visible = true;
            }
            Phase::Ready { report } => {
                view.panel = Panel::Output;
                view.report = Some(report.text.clone());
                view.reset_visible = true;
            }
        }

        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::Report;
    use crate::orchestrator::ReportError;

    #[test]
    fn fresh_session_shows_input_placeholder() {
        let view = View::of(&Session::new());
        assert_eq!(view.panel, Panel::Input);
        assert_eq!(view.ticker_placeholder, Some(DEFAULT_TICKER_TEXT));
        assert!(view.submit_enabled);
        assert!(!view.generate_enabled);
        assert!(!view.reset_visible);
        assert!(!view.label_is_error);
    }

    #[test]
    fn rejected_input_turns_label_into_error() {
        let mut session = Session::new();
        let _ = session.submit_ticker("AB");
        let view = View::of(&session);
        assert!(view.label_is_error);
        assert_eq!(view.label, "Ticker must be at least 3 characters long.");
        assert_eq!(view.panel, Panel::Input);
    }

    #[test]
    fn panels_follow_phase() {
        let mut session = Session::new();
        session.submit_ticker("tsla").unwrap();
        assert_eq!(View::of(&session).tickers, ["TSLA"]);

        session.begin_generation().unwrap();
        let view = View::of(&session);
        assert_eq!(view.panel, Panel::Loading);
        assert!(!view.submit_enabled && !view.generate_enabled);
        assert_eq!(view.loading_status.as_deref(), Some("Querying Stocks API..."));

        session.complete(Report {
            tickers: session.tickers().symbols().to_vec(),
            generated_at: chrono::Utc::now(),
            text: "Buy.".to_string(),
        });
        let view = View::of(&session);
        assert_eq!(view.panel, Panel::Output);
        assert_eq!(view.report.as_deref(), Some("Buy."));
        assert!(view.reset_visible);

        session.reset();
        let view = View::of(&session);
        assert_eq!(view.panel, Panel::Input);
        assert!(view.report.is_none());
        assert!(view.submit_enabled);
    }

    #[test]
    fn failure_returns_to_input_with_error_and_reset() {
        let mut session = Session::new();
        session.submit_ticker("TSLA").unwrap();
        session.begin_generation().unwrap();
        session.fail(&ReportError::ReportGeneration(anyhow::anyhow!("boom")));

        let view = View::of(&session);
        assert_eq!(view.panel, Panel::Input);
        assert_eq!(
            view.error.as_deref(),
            Some("Unable to access AI. Please refresh and try again")
        );
        assert!(view.reset_visible);
        assert!(!view.submit_enabled);
    }
}
