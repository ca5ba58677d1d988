//! Chat turn orchestration for Mnemo.
//!
//! [`ChatService`] ties a [`SessionStore`](mnemo_core::SessionStore) to a
//! [`ProviderRegistry`] of interchangeable [`ChatModel`](mnemo_core::ChatModel)
//! implementations. Each turn always records the user message and the
//! assistant reply; the mode only decides how much of the stored history is
//! sent to the provider:
//!
//! - **stateless**: exactly the new message, nothing else;
//! - **stateful**: the full stored history oldest-first, ending with the new
//!   message.
//!
//! Because the store records everything regardless of mode, switching modes
//! mid-conversation is lossless.

mod registry;
mod service;
mod wire;

pub use registry::ProviderRegistry;
pub use service::{ChatService, ChatServiceConfig};
pub use wire::{ChatMode, ChatTurnRequest, ChatTurnResponse, ClearSessionResponse};
