use std::{collections::HashMap, sync::Arc};

use mnemo_core::{ChatModel, MnemoError};

/// Name-keyed registry of interchangeable chat models.
///
/// Providers share the `ChatModel` contract, so the caller selects one per
/// turn by its registered name instead of branching on provider-specific
/// types.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn ChatModel>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under `name`, replacing any previous registration.
    pub fn register(&mut self, name: impl Into<String>, model: Arc<dyn ChatModel>) -> &mut Self {
        self.providers.insert(name.into(), model);
        self
    }

    /// Builder-style registration for construction sites.
    pub fn with(mut self, name: impl Into<String>, model: Arc<dyn ChatModel>) -> Self {
        self.register(name, model);
        self
    }

    /// Look up a provider. An unknown name is `ProviderUnavailable`, so the
    /// caller can distinguish it from store failures.
    pub fn get(&self, name: &str) -> Result<Arc<dyn ChatModel>, MnemoError> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| MnemoError::ProviderUnavailable(format!("unknown provider '{name}'")))
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
