use std::sync::Arc;

use mnemo_chat::{ChatMode, ChatService, ChatTurnRequest, ProviderRegistry};
use mnemo_core::{Completion, MnemoError};
use mnemo_memory::InMemoryStore;
use mnemo_models::ScriptedChatModel;

/// Demonstrates why stateless LLM calls forget: the same three-turn
/// conversation is run twice against the same session, once per mode, over a
/// scripted model so the output is reproducible offline.
#[tokio::main]
async fn main() -> Result<(), MnemoError> {
    tracing_subscriber::fmt().init();

    let store = Arc::new(InMemoryStore::new());
    let model = ScriptedChatModel::new(vec![
        Completion::assistant("Nice to meet you, Alice!"),
        Completion::assistant("I don't know your name — you haven't told me."),
        Completion::assistant("Your name is Alice."),
    ]);
    let providers = ProviderRegistry::new().with("scripted", Arc::new(model.clone()));
    let service = ChatService::new(store, providers);

    let session = "demo-session";
    let turns = [
        ("My name is Alice", ChatMode::Stateless),
        ("What's my name?", ChatMode::Stateless),
        ("What's my name?", ChatMode::Stateful),
    ];

    for (message, mode) in turns {
        let response = service
            .chat(ChatTurnRequest {
                message: message.to_string(),
                mode,
                provider: "scripted".to_string(),
                session_id: Some(session.to_string()),
            })
            .await?;
        println!("[{mode}] user: {message}");
        println!("[{mode}] assistant: {} ({} stored)", response.response, response.message_count);
    }

    println!("\ncontext sent per turn:");
    for (i, prompt) in model.prompts().await.iter().enumerate() {
        let roles: Vec<_> = prompt.messages.iter().map(|m| m.role().as_str()).collect();
        println!("  turn {}: {} message(s) [{}]", i + 1, prompt.len(), roles.join(", "));
    }

    service.clear_session(session).await?;
    Ok(())
}
