use crate::config::Settings;
use crate::domain::chat::ChatMessage;
use crate::error::{Endpoint, RemoteError};
use crate::llm::{LlmClient, SamplingParams};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    params: SamplingParams,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_openai_api_key()?.to_string();
        let base_url = settings
            .openai_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = settings
            .openai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let http = crate::config::http_client(settings.http_timeout())?;

        Ok(Self::new(http, base_url, api_key).with_model(model))
    }

    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            params: SamplingParams::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            presence_penalty: self.params.presence_penalty,
            frequency_penalty: self.params.frequency_penalty,
        }
    }

    async fn create_chat_completion(&self, req: &ChatCompletionRequest<'_>) -> anyhow::Result<Value> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let res = self
            .http
            .post(url)
            .headers(headers)
            .json(req)
            .send()
            .await
            .context("OpenAI request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read OpenAI response body")?;
        if !status.is_success() {
            return Err(RemoteError::http(Endpoint::OpenAi, status, error_message(&text)).into());
        }

        serde_json::from_str::<Value>(&text)
            .map_err(|e| RemoteError::decode(Endpoint::OpenAi, format!("response is not valid JSON: {e}")).into())
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    fn provider_name(&self) -> &'static str {
        "openai"
    }

    async fn complete_chat(&self, messages: &[ChatMessage]) -> anyhow::Result<Value> {
        let raw = self.create_chat_completion(&self.request(messages)).await?;
        first_message(raw)
    }
}

/// Pulls `choices[0].message` out of a completion response.
fn first_message(raw: Value) -> anyhow::Result<Value> {
    let parsed = serde_json::from_value::<ChatCompletionResponse>(raw)
        .map_err(|e| RemoteError::decode(Endpoint::OpenAi, format!("unexpected completion shape: {e}")))?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| RemoteError::decode(Endpoint::OpenAi, "completion returned no choices").into())
}

/// OpenAI error bodies look like `{"error": {"message": "..."}}`; fall back to the raw text.
fn error_message(text: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(text)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| text.to_string())
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f64,
    presence_penalty: f64,
    frequency_penalty: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Value,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_fixed_sampling_params() {
        let client = OpenAiClient::new(reqwest::Client::new(), "http://localhost", "k");
        let messages = vec![ChatMessage::system("s"), ChatMessage::user("u")];
        let v = serde_json::to_value(client.request(&messages)).unwrap();
        assert_eq!(v["model"], "gpt-4o-mini");
        assert_eq!(v["max_tokens"], 350);
        assert_eq!(v["presence_penalty"], 0.0);
        assert_eq!(v["frequency_penalty"], 0.0);
        assert!((v["temperature"].as_f64().unwrap() - 1.1).abs() < 1e-6);
        assert_eq!(v["messages"][1], json!({"role": "user", "content": "u"}));
    }

    #[test]
    fn first_message_is_returned_verbatim() {
        let raw = json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Buy TSLA.", "refusal": null}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}},
            ],
        });
        let msg = first_message(raw).unwrap();
        assert_eq!(msg, json!({"role": "assistant", "content": "Buy TSLA.", "refusal": null}));
    }

    #[test]
    fn empty_choices_is_an_error() {
        let err = first_message(json!({"choices": []})).unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn error_message_prefers_provider_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(error_message(body), "Incorrect API key provided");
        assert_eq!(error_message("upstream down"), "upstream down");
    }
}
