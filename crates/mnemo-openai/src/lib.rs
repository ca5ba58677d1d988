mod chat_model;

pub use chat_model::{OpenAiChatModel, OpenAiConfig};
