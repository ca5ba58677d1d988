use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use mnemo_core::{ChatModel, ChatPrompt, Completion, MnemoError};
use tokio::sync::Mutex;

/// A chat model that pops canned completions in order and records every
/// prompt it receives, so tests can assert exactly which context was
/// assembled for each call.
#[derive(Clone, Default)]
pub struct ScriptedChatModel {
    completions: Arc<Mutex<VecDeque<Completion>>>,
    prompts: Arc<Mutex<Vec<ChatPrompt>>>,
}

impl ScriptedChatModel {
    pub fn new(completions: Vec<Completion>) -> Self {
        Self {
            completions: Arc::new(Mutex::new(VecDeque::from(completions))),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue another completion after construction.
    pub fn push(&self, completion: Completion) {
        self.completions
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(completion);
    }

    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<ChatPrompt> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn chat(&self, prompt: ChatPrompt) -> Result<Completion, MnemoError> {
        self.prompts.lock().await.push(prompt);
        let mut completions = self.completions.lock().await;
        completions
            .pop_front()
            .ok_or_else(|| MnemoError::Provider("scripted model exhausted responses".to_string()))
    }
}
