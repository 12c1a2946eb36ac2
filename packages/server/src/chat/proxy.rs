use std::sync::Arc;

use crate::config::ChatConfig;
use crate::models::chat::{ChatContext, ChatMessage, Role};

use super::client::{ChatError, CompletionClient, OpenAiClient};

/// How many history entries are forwarded upstream.
pub const HISTORY_LIMIT: usize = 10;
/// How much of a text selection is echoed back in degraded replies.
pub const SELECTION_QUOTE_LIMIT: usize = 200;

const UNAVAILABLE_NOTE: &str = "(Note: AI chat temporarily unavailable)";

/// Turns a chat message plus document context into an assistant reply.
///
/// Every failure path resolves to a displayable string; callers never
/// see an error from this boundary.
pub struct ChatProxy {
    client: Option<Arc<dyn CompletionClient>>,
}

impl ChatProxy {
    pub fn new(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { client }
    }

    /// Build a proxy from configuration. Without a credential the proxy
    /// degrades to a setup notice and never issues an outbound call.
    pub fn from_config(cfg: &ChatConfig) -> Self {
        let client = cfg
            .api_key
            .as_ref()
            .map(|key| Arc::new(OpenAiClient::new(cfg, key.clone())) as Arc<dyn CompletionClient>);
        Self { client }
    }

    pub async fn complete(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: &ChatContext,
    ) -> String {
        let messages = build_messages(message, history, context);

        let result = match &self.client {
            Some(client) => client.complete(&messages).await,
            None => Err(ChatError::MissingCredentials),
        };

        match result {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!("chat completion failed: {err}");
                degraded_reply(&err, message, context)
            }
        }
    }
}

/// Assemble the upstream message list: system instruction, the last
/// [`HISTORY_LIMIT`] history entries, then the new user message.
fn build_messages(
    message: &str,
    history: &[ChatMessage],
    context: &ChatContext,
) -> Vec<ChatMessage> {
    let start = history.len().saturating_sub(HISTORY_LIMIT);
    let mut messages = Vec::with_capacity(history.len() - start + 2);
    messages.push(ChatMessage::new(Role::System, system_prompt(context)));
    messages.extend_from_slice(&history[start..]);
    messages.push(ChatMessage::new(Role::User, message));
    messages
}

fn system_prompt(context: &ChatContext) -> String {
    let selected = if context.selected_text.is_empty() {
        "None"
    } else {
        &context.selected_text
    };
    let total = if context.total_pages == 0 {
        "Unknown".to_string()
    } else {
        context.total_pages.to_string()
    };

    format!(
        "You are a helpful PDF assistant. You're helping the user understand a PDF document.\n\
         \n\
         Current PDF Context:\n\
         - Filename: {}\n\
         - Current Page: {} of {}\n\
         - Selected Text: {}\n\
         \n\
         You can help with:\n\
         - Explaining content and concepts\n\
         - Summarizing sections or pages\n\
         - Answering questions about the document\n\
         - Discussing selected text\n\
         - Providing context and analysis\n\
         \n\
         Be concise, helpful, and focus on the PDF content. If the user asks about \
         specific pages or sections, acknowledge the current page context.",
        context.filename, context.current_page, total, selected,
    )
}

fn degraded_reply(err: &ChatError, message: &str, context: &ChatContext) -> String {
    match err {
        ChatError::MissingCredentials => {
            "OpenAI API key not found. Set OPENAI_API_KEY (or chat.api_key in the \
             config) to enable AI chat."
                .to_string()
        }
        ChatError::Auth => {
            "Invalid OpenAI API key. Please check your configured credentials.".to_string()
        }
        ChatError::RateLimited => {
            "OpenAI API rate limit exceeded. Please try again in a moment.".to_string()
        }
        ChatError::Network => {
            "Network connection issue. Please check your internet connection and try again."
                .to_string()
        }
        ChatError::Api(_) => fallback_reply(message, context),
    }
}

/// Deterministic canned reply for unclassified upstream failures.
fn fallback_reply(message: &str, context: &ChatContext) -> String {
    if !context.selected_text.is_empty() {
        let quote: String = context
            .selected_text
            .chars()
            .take(SELECTION_QUOTE_LIMIT)
            .collect();
        let marker = if context.selected_text.chars().count() > SELECTION_QUOTE_LIMIT {
            "..."
        } else {
            ""
        };
        return format!(
            "I can see you've selected: \"{quote}{marker}\"\n\nWhat would you like me \
             to explain about this selection? {UNAVAILABLE_NOTE}"
        );
    }

    let lower = message.to_lowercase();
    if lower.contains("summary") {
        format!(
            "I'd be happy to provide a summary of page {} of this document. What \
             specific section interests you? {UNAVAILABLE_NOTE}",
            context.current_page
        )
    } else if lower.contains("explain") {
        format!(
            "I can help explain concepts from this PDF. Could you point me to the \
             specific section or concept you'd like me to clarify? {UNAVAILABLE_NOTE}"
        )
    } else {
        format!(
            "I'm here to help you understand this PDF document. Currently viewing \
             page {} of {}. What would you like to know? {UNAVAILABLE_NOTE}",
            context.current_page,
            context.total_pages_display(),
        )
    }
}
