mod client;
mod types;

pub use client::{CompletionClient, OpenAiClient};
pub use types::{
    ChatCompletionChoice, ChatCompletionMessage, ChatCompletionRequest, ChatCompletionResponse,
    ChatMessage, UpstreamErrorBody,
};
