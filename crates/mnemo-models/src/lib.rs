pub mod backend;
pub use backend::{FakeBackend, HttpBackend, ProviderBackend, ProviderRequest, ProviderResponse};

mod scripted;
pub use scripted::ScriptedChatModel;
