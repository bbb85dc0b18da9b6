use std::io::{self, Write};

use tickerbrief_core::session::view::{Panel, View, RESET_LABEL};

pub fn draw(view: &View, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    match view.panel {
        Panel::Input => {
            if view.label_is_error {
                writeln!(out, "! {}", view.label)?;
            } else {
                writeln!(out, "{}", view.label)?;
            }
            match view.ticker_placeholder {
                Some(placeholder) => writeln!(out, "  {placeholder}")?,
                None => writeln!(out, "  [{}]", view.tickers.join("] ["))?,
            }
            if let Some(error) = &view.error {
                writeln!(out, "! {error}")?;
            }
            actions(view, out)?;
        }
        Panel::Loading => {
            if let Some(status) = &view.loading_status {
                writeln!(out, "... {status}")?;
            }
        }
        Panel::Output => {
            writeln!(out, "Your report 😜")?;
            writeln!(out)?;
            if let Some(report) = &view.report {
                writeln!(out, "{report}")?;
            }
            writeln!(out)?;
            actions(view, out)?;
        }
    }
    out.flush()
}

fn actions(view: &View, out: &mut impl Write) -> io::Result<()> {
    let mut hints = Vec::new();
    if view.submit_enabled {
        hints.push("type a ticker + Enter".to_string());
    }
    if view.generate_enabled {
        hints.push("/generate".to_string());
    }
    if view.reset_visible {
        hints.push(format!("/reset ({RESET_LABEL})"));
    }
    hints.push("/quit".to_string());
    writeln!(out, "  {}", hints.join(" | "))
}

pub fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

pub fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "  <TICKER>   add a 3-4 character ticker (up to 3)")?;
    writeln!(out, "  /generate  fetch prices and write the report")?;
    writeln!(out, "  /reset     clear tickers and report")?;
    writeln!(out, "  /quit      leave")?;
    out.flush()
}
