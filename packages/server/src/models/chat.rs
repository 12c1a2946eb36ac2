use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message author, serialized the way the completion API expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of the client-held conversation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Read-only document snapshot attached to each chat request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatContext {
    pub filename: String,
    pub current_page: u32,
    pub total_pages: u32,
    pub selected_text: String,
}

impl Default for ChatContext {
    fn default() -> Self {
        Self {
            filename: "Unknown".to_string(),
            current_page: 1,
            total_pages: 0,
            selected_text: String::new(),
        }
    }
}

impl ChatContext {
    /// Total page count for display; `?` until the document is opened.
    pub fn total_pages_display(&self) -> String {
        if self.total_pages == 0 {
            "?".to_string()
        } else {
            self.total_pages.to_string()
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub context: ChatContext,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}
