use std::sync::Arc;

use mnemo_core::{ChatModel, ChatPrompt, Message, MnemoError};
use mnemo_models::{FakeBackend, ProviderResponse};
use mnemo_ollama::{OllamaChatModel, OllamaConfig};
use serde_json::json;

#[tokio::test]
async fn sends_non_streaming_chat_request() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_response(ProviderResponse {
        status: 200,
        body: json!({
            "message": {"role": "assistant", "content": "hello"},
            "prompt_eval_count": 10,
            "eval_count": 3,
        }),
    });

    let model = OllamaChatModel::new(OllamaConfig::new("qwen3:0.6b"), backend.clone());
    let completion = model
        .chat(ChatPrompt::single(Message::user("hi")))
        .await
        .unwrap();

    assert_eq!(completion.message.content(), "hello");
    let usage = completion.usage.unwrap();
    assert_eq!(usage.input_tokens, 10);
    assert_eq!(usage.total_tokens, 13);

    let requests = backend.requests().await;
    let req = &requests[0];
    assert_eq!(req.url, "http://localhost:11434/api/chat");
    assert_eq!(req.body["stream"], false);
    assert_eq!(req.body["model"], "qwen3:0.6b");
    assert_eq!(req.body["messages"][0]["role"], "user");
}

#[tokio::test]
async fn custom_base_url() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_response(ProviderResponse {
        status: 200,
        body: json!({"message": {"content": "ok"}}),
    });

    let model = OllamaChatModel::new(
        OllamaConfig::new("llama3.2").with_base_url("http://ollama.internal:11434"),
        backend.clone(),
    );
    model
        .chat(ChatPrompt::single(Message::user("ping")))
        .await
        .unwrap();

    let requests = backend.requests().await;
    assert_eq!(requests[0].url, "http://ollama.internal:11434/api/chat");
}

#[tokio::test]
async fn missing_model_is_a_provider_error() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_response(ProviderResponse {
        status: 404,
        body: json!({"error": "model 'nope' not found"}),
    });

    let model = OllamaChatModel::new(OllamaConfig::new("nope"), backend);
    let err = model
        .chat(ChatPrompt::single(Message::user("x")))
        .await
        .unwrap_err();
    match err {
        MnemoError::Provider(msg) => assert!(msg.contains("not found")),
        other => panic!("expected Provider error, got {other}"),
    }
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_response(ProviderResponse {
        status: 500,
        body: json!({"error": "out of memory"}),
    });

    let model = OllamaChatModel::new(OllamaConfig::new("m"), backend);
    let err = model
        .chat(ChatPrompt::single(Message::user("x")))
        .await
        .unwrap_err();
    assert!(matches!(err, MnemoError::ProviderUnavailable(_)));
}
