/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Nothing,
    Submit(String),
    Generate,
    Reset,
    Help,
    Quit,
}

impl Command {
    /// Lines starting with `/` are actions; anything else is a ticker submission.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Nothing;
        }

        match line.strip_prefix('/') {
            Some(action) => match action.to_ascii_lowercase().as_str() {
                "generate" | "g" => Command::Generate,
                "reset" | "r" => Command::Reset,
                "quit" | "q" | "exit" => Command::Quit,
                _ => Command::Help,
            },
            None => Command::Submit(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_and_tickers() {
        assert_eq!(Command::parse("  "), Command::Nothing);
        assert_eq!(Command::parse("tsla\n"), Command::Submit("tsla".to_string()));
        assert_eq!(Command::parse("/generate"), Command::Generate);
        assert_eq!(Command::parse("/R"), Command::Reset);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(Command::parse("/what"), Command::Help);
    }
}
