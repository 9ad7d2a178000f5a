use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix that marks a conversation id as a group chat.
pub const GROUP_ID_SUFFIX: &str = "@g.us";

/// Opaque identifier for a direct chat or group.
///
/// Stable for the conversation's lifetime. Group ids carry the `@g.us`
/// suffix; direct-chat ids carry the account's routing domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Group chats are identified by the `@g.us` routing suffix.
    pub fn is_group(&self) -> bool {
        self.0.ends_with(GROUP_ID_SUFFIX)
    }

    /// The part of the id before the `@` — used as a display-name fallback
    /// and for rendering mentions.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConversationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Who produced a context turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One recorded message in a conversation's context buffer.
///
/// Owned exclusively by the buffer for its conversation; never shared
/// across conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextTurn {
    /// Message text. Absent for non-text turns that still advanced the log.
    pub text: Option<String>,
    /// Transport-reported unix timestamp (seconds).
    pub timestamp: i64,
    pub role: Role,
}

/// A normalized inbound message, produced by the event classifier.
///
/// Transient — constructed per transport event, never persisted.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub conversation: ConversationId,
    pub is_group: bool,
    /// Resolved display name of the conversation (group subject, or the
    /// direct-chat peer's declared name).
    pub chat_name: String,
    /// Display name of the individual sender (same as `chat_name` for DMs).
    pub sender_name: String,
    pub text: String,
    /// True when the message came from the operator's own outgoing stream.
    pub from_operator: bool,
    /// Transport id of the message, used for deletion/recall and quoting.
    pub message_id: String,
    /// Text of a quoted/replied-to message, when present.
    pub quoted_text: Option<String>,
    /// First mentioned participant id, when the message tagged one.
    pub mentioned: Option<String>,
    pub timestamp: i64,
}
