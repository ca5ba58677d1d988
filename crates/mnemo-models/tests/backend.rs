use std::time::Duration;

use mnemo_core::{ChatModel, ChatPrompt, Completion, Message, MnemoError};
use mnemo_models::{FakeBackend, HttpBackend, ProviderBackend, ProviderRequest, ProviderResponse};
use serde_json::json;

fn request(url: &str) -> ProviderRequest {
    ProviderRequest {
        url: url.to_string(),
        headers: vec![],
        body: json!({}),
    }
}

#[tokio::test]
async fn fake_backend_pops_responses_in_order() {
    let backend = FakeBackend::new();
    backend.push_response(ProviderResponse {
        status: 200,
        body: json!({"n": 1}),
    });
    backend.push_response(ProviderResponse {
        status: 200,
        body: json!({"n": 2}),
    });

    let first = backend.send(request("http://a")).await.unwrap();
    let second = backend.send(request("http://b")).await.unwrap();
    assert_eq!(first.body["n"], 1);
    assert_eq!(second.body["n"], 2);
}

#[tokio::test]
async fn fake_backend_records_requests() {
    let backend = FakeBackend::new();
    backend.push_response(ProviderResponse {
        status: 200,
        body: json!({}),
    });

    backend.send(request("http://example/chat")).await.unwrap();

    let seen = backend.requests().await;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].url, "http://example/chat");
}

#[tokio::test]
async fn fake_backend_yields_queued_errors() {
    let backend = FakeBackend::new();
    backend.push_error(MnemoError::ProviderUnavailable("down".into()));

    let err = backend.send(request("http://a")).await.unwrap_err();
    assert!(matches!(err, MnemoError::ProviderUnavailable(_)));
}

#[tokio::test]
async fn exhausted_fake_backend_errors() {
    let backend = FakeBackend::new();
    let err = backend.send(request("http://a")).await.unwrap_err();
    assert!(matches!(err, MnemoError::Provider(_)));
}

#[tokio::test]
async fn http_backend_bounds_requests_with_timeout() {
    // A server that accepts the connection but never responds.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    let backend = HttpBackend::with_timeout(Duration::from_millis(200));
    let err = backend
        .send(request(&format!("http://{addr}/chat")))
        .await
        .unwrap_err();
    assert!(matches!(err, MnemoError::Timeout(_)));
}

#[tokio::test]
async fn scripted_model_replays_and_records() {
    let model = mnemo_models::ScriptedChatModel::new(vec![Completion::assistant("canned")]);

    let prompt = ChatPrompt::new(vec![Message::user("hi")]);
    let completion = model.chat(prompt.clone()).await.unwrap();
    assert_eq!(completion.message.content(), "canned");

    let prompts = model.prompts().await;
    assert_eq!(prompts, vec![prompt]);

    // Exhausted script is a provider error, not a panic.
    let err = model
        .chat(ChatPrompt::single(Message::user("again")))
        .await
        .unwrap_err();
    assert!(matches!(err, MnemoError::Provider(_)));
}
