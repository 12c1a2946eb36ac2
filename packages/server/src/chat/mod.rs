mod client;
mod proxy;

pub use client::{ChatError, CompletionClient, OpenAiClient};
pub use proxy::{ChatProxy, HISTORY_LIMIT, SELECTION_QUOTE_LIMIT};
