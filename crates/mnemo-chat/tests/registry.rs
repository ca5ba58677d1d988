use std::sync::Arc;

use mnemo_chat::ProviderRegistry;
use mnemo_core::MnemoError;
use mnemo_models::ScriptedChatModel;

#[test]
fn lookup_by_registered_name() {
    let registry = ProviderRegistry::new()
        .with("openai", Arc::new(ScriptedChatModel::default()))
        .with("ollama", Arc::new(ScriptedChatModel::default()));

    assert!(registry.get("openai").is_ok());
    assert!(registry.get("ollama").is_ok());
    assert_eq!(registry.names(), ["ollama", "openai"]);
}

#[test]
fn unknown_name_is_provider_unavailable() {
    let registry = ProviderRegistry::new();
    assert!(registry.is_empty());

    let err = registry.get("nope").unwrap_err();
    match err {
        MnemoError::ProviderUnavailable(msg) => assert!(msg.contains("nope")),
        other => panic!("expected ProviderUnavailable, got {other}"),
    }
}

#[test]
fn re_registration_replaces() {
    let mut registry = ProviderRegistry::new();
    registry.register("m", Arc::new(ScriptedChatModel::default()));
    registry.register("m", Arc::new(ScriptedChatModel::default()));
    assert_eq!(registry.names(), ["m"]);
}
