use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use hermit_core::types::Role;

/// Fallback reply text used when a provider response carries no extractable
/// text payload.
pub const NO_RESPONSE: &str = "No response";

/// Role of a chat message sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl From<Role> for ChatRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => ChatRole::User,
            Role::Assistant => ChatRole::Assistant,
        }
    }
}

/// A single message in the prompt sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Request to the reply generator. Non-streaming only.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    /// System prompt, prepended before `messages`.
    pub system: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// Provider response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Extracted text, `None` when the response had no text-bearing payload.
    /// Callers substitute [`NO_RESPONSE`] (or their own literal) explicitly.
    pub content: Option<String>,
    pub model: String,
}

/// Common interface for reply generators.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Submit the ordered prompt, wait for the full response.
    async fn complete(&self, req: &ChatRequest) -> Result<ChatResponse, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}
