use std::sync::Arc;

use async_trait::async_trait;
use mnemo_core::{ChatModel, ChatPrompt, Completion, Message, MnemoError, TokenUsage};
use mnemo_models::{ProviderBackend, ProviderRequest, ProviderResponse};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub model: String,
    pub base_url: String,
}

impl OllamaConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: "http://localhost:11434".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Chat model backed by a local Ollama server's native `/api/chat` API.
/// No authentication; the server is assumed to be on a trusted network.
pub struct OllamaChatModel {
    config: OllamaConfig,
    backend: Arc<dyn ProviderBackend>,
}

impl OllamaChatModel {
    pub fn new(config: OllamaConfig, backend: Arc<dyn ProviderBackend>) -> Self {
        Self { config, backend }
    }

    fn build_request(&self, prompt: &ChatPrompt) -> ProviderRequest {
        let messages: Vec<Value> = prompt
            .messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role().as_str(),
                    "content": msg.content(),
                })
            })
            .collect();

        ProviderRequest {
            url: format!("{}/api/chat", self.config.base_url),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: json!({
                "model": self.config.model,
                "messages": messages,
                "stream": false,
            }),
        }
    }
}

fn parse_response(resp: &ProviderResponse) -> Result<Completion, MnemoError> {
    check_error_status(resp)?;

    let content = resp.body["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string();
    let usage = parse_usage(&resp.body);

    Ok(Completion {
        message: Message::assistant(content),
        usage,
    })
}

fn check_error_status(resp: &ProviderResponse) -> Result<(), MnemoError> {
    if resp.status >= 500 {
        let msg = resp.body["error"]
            .as_str()
            .unwrap_or("unknown Ollama error")
            .to_string();
        return Err(MnemoError::ProviderUnavailable(format!(
            "Ollama API error ({}): {}",
            resp.status, msg
        )));
    }
    if resp.status >= 400 {
        let msg = resp.body["error"]
            .as_str()
            .unwrap_or("unknown Ollama error")
            .to_string();
        return Err(MnemoError::Provider(format!(
            "Ollama API error ({}): {}",
            resp.status, msg
        )));
    }
    Ok(())
}

fn parse_usage(body: &Value) -> Option<TokenUsage> {
    let prompt = body["prompt_eval_count"].as_u64();
    let completion = body["eval_count"].as_u64();
    match (prompt, completion) {
        (Some(p), Some(c)) => Some(TokenUsage {
            input_tokens: p as u32,
            output_tokens: c as u32,
            total_tokens: (p + c) as u32,
        }),
        _ => None,
    }
}

#[async_trait]
impl ChatModel for OllamaChatModel {
    async fn chat(&self, prompt: ChatPrompt) -> Result<Completion, MnemoError> {
        let provider_req = self.build_request(&prompt);
        let resp = self.backend.send(provider_req).await?;
        parse_response(&resp)
    }
}
