use std::sync::Arc;

use async_trait::async_trait;
use mnemo_core::{ChatModel, ChatPrompt, Completion, Message, MnemoError, TokenUsage};
use mnemo_models::{ProviderBackend, ProviderRequest, ProviderResponse};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Point at any OpenAI-compatible endpoint, e.g. a local Ollama server's
    /// `http://localhost:11434/v1`.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

pub struct OpenAiChatModel {
    config: OpenAiConfig,
    backend: Arc<dyn ProviderBackend>,
}

impl OpenAiChatModel {
    pub fn new(config: OpenAiConfig, backend: Arc<dyn ProviderBackend>) -> Self {
        Self { config, backend }
    }

    fn build_request(&self, prompt: &ChatPrompt) -> ProviderRequest {
        let messages: Vec<Value> = prompt.messages.iter().map(message_to_openai).collect();

        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
        });

        if let Some(max_tokens) = self.config.max_tokens {
            body["max_completion_tokens"] = json!(max_tokens);
        }
        if let Some(temp) = self.config.temperature {
            body["temperature"] = json!(temp);
        }

        ProviderRequest {
            url: format!("{}/chat/completions", self.config.base_url),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.api_key),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }
}

fn message_to_openai(msg: &Message) -> Value {
    json!({
        "role": msg.role().as_str(),
        "content": msg.content(),
    })
}

fn parse_response(resp: &ProviderResponse) -> Result<Completion, MnemoError> {
    check_error_status(resp)?;

    let content = resp.body["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string();
    let usage = parse_usage(&resp.body["usage"]);

    Ok(Completion {
        message: Message::assistant(content),
        usage,
    })
}

fn check_error_status(resp: &ProviderResponse) -> Result<(), MnemoError> {
    if resp.status == 429 || resp.status >= 500 {
        let msg = resp.body["error"]["message"]
            .as_str()
            .unwrap_or("service unavailable")
            .to_string();
        return Err(MnemoError::ProviderUnavailable(format!(
            "OpenAI API error ({}): {}",
            resp.status, msg
        )));
    }
    if resp.status >= 400 {
        let msg = resp.body["error"]["message"]
            .as_str()
            .unwrap_or("unknown API error")
            .to_string();
        return Err(MnemoError::Provider(format!(
            "OpenAI API error ({}): {}",
            resp.status, msg
        )));
    }
    Ok(())
}

fn parse_usage(usage: &Value) -> Option<TokenUsage> {
    if usage.is_null() {
        return None;
    }
    Some(TokenUsage {
        input_tokens: usage["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        output_tokens: usage["completion_tokens"].as_u64().unwrap_or(0) as u32,
        total_tokens: usage["total_tokens"].as_u64().unwrap_or(0) as u32,
    })
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn chat(&self, prompt: ChatPrompt) -> Result<Completion, MnemoError> {
        let provider_req = self.build_request(&prompt);
        let resp = self.backend.send(provider_req).await?;
        parse_response(&resp)
    }
}
