//! Static prompt data for report generation.

use crate::domain::chat::ChatMessage;

pub const SYSTEM_PROMPT: &str = "You are a stock trading guru. Given data on share prices over the past 3 days, write a report of no more than 150 words describing each stock's performance and recommending whether to buy, hold or sell. You should reference each of the stock tickers provided, no others. Use the examples provided between ### to set the style of your response.";

pub const STYLE_EXAMPLES: &[&str] = &[
    "Over the past three days, Tesla (TSLA) shares have plummetted. The stock opened at $223.98 and closed at $202.11 on the third day, with some jumping around in the meantime. This is a great time to buy! But not a great time to sell!",
    "Apple (AAPL) shot up from $150.22 to a jaw-dropping $175.36 by the close of day three. If you're sitting on AAPL stock, hold on to it because this baby is just getting warmed up! For AAPL, my advice is to stay in your position!",
];

const EXAMPLE_DELIMITER: &str = "###";

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub system: String,
    pub style_examples: Vec<String>,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            style_examples: STYLE_EXAMPLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PromptTemplate {
    /// `[system, user]`, where the user message is the price data followed by the
    /// `###`-delimited style examples.
    pub fn messages(&self, price_data: &str) -> Vec<ChatMessage> {
        let mut user = String::with_capacity(price_data.len() + 512);
        user.push_str(price_data);
        user.push('\n');
        user.push_str(EXAMPLE_DELIMITER);
        for example in &self.style_examples {
            user.push('\n');
            user.push_str(example);
            user.push('\n');
            user.push_str(EXAMPLE_DELIMITER);
        }

        vec![ChatMessage::system(self.system.clone()), ChatMessage::user(user)]
    }
}
