pub mod openai;

use crate::domain::chat::ChatMessage;

/// Fixed sampling parameters for report generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 350,
            temperature: 1.1,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Returns the first completion's message object exactly as the provider sent it.
    async fn complete_chat(&self, messages: &[ChatMessage]) -> anyhow::Result<serde_json::Value>;
}
