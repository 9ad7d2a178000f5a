//! Inbound message envelopes, as delivered by the transport.
//!
//! The shapes mirror the wire client's message event: one event may carry
//! several envelopes, each with a routing key and an optional content body.

use hermit_core::types::ConversationId;
use serde::{Deserialize, Serialize};

/// Routing key of a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageKey {
    /// Conversation the message belongs to. Absent on some protocol-level
    /// notifications; such envelopes are not actionable.
    pub conversation: Option<ConversationId>,
    /// Transport-assigned message id.
    pub id: String,
    /// True when the message was sent from the operator's own account.
    pub from_operator: bool,
    /// In groups, the id of the participant who sent the message.
    pub participant: Option<String>,
}

/// Content of a quoted (replied-to) message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotedContent {
    pub text: Option<String>,
}

/// Message body. Text lives either in the plain field or in the
/// extended/styled field — the plain field wins when both are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageContent {
    /// Plain conversation text.
    pub text: Option<String>,
    /// Extended/styled text (replies, messages with mentions or previews).
    pub extended_text: Option<String>,
    /// Quoted message carried alongside extended text.
    pub quoted: Option<QuotedContent>,
    /// Participant ids mentioned in the message.
    #[serde(default)]
    pub mentions: Vec<String>,
}

impl MessageContent {
    /// Extract the message text, preferring the plain field.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().or(self.extended_text.as_deref())
    }
}

/// One delivered message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub key: MessageKey,
    /// Sender-declared display name, when the transport knows it.
    pub push_name: Option<String>,
    /// Unix timestamp (seconds) assigned by the transport.
    pub timestamp: i64,
    /// Absent for protocol notifications with no message payload.
    pub content: Option<MessageContent>,
}

impl Envelope {
    /// Text of the message, when it has any.
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.text())
    }

    /// Text of the quoted message, when this is a reply.
    pub fn quoted_text(&self) -> Option<&str> {
        self.content
            .as_ref()
            .and_then(|c| c.quoted.as_ref())
            .and_then(|q| q.text.as_deref())
    }

    /// First mentioned participant, when the message tagged one.
    pub fn first_mention(&self) -> Option<&str> {
        self.content
            .as_ref()
            .and_then(|c| c.mentions.first())
            .map(String::as_str)
    }
}

/// One inbound transport event: zero or more message envelopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    pub envelopes: Vec<Envelope>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> MessageKey {
        MessageKey {
            conversation: Some(ConversationId::new("1@s.whatsapp.net")),
            id: "m1".into(),
            from_operator: false,
            participant: None,
        }
    }

    #[test]
    fn plain_text_preferred_over_extended() {
        let content = MessageContent {
            text: Some("plain".into()),
            extended_text: Some("extended".into()),
            ..Default::default()
        };
        assert_eq!(content.text(), Some("plain"));
    }

    #[test]
    fn extended_text_is_fallback() {
        let content = MessageContent {
            extended_text: Some("extended".into()),
            ..Default::default()
        };
        assert_eq!(content.text(), Some("extended"));
    }

    #[test]
    fn envelope_without_content_has_no_text() {
        let env = Envelope {
            key: key(),
            push_name: None,
            timestamp: 0,
            content: None,
        };
        assert!(env.text().is_none());
        assert!(env.quoted_text().is_none());
    }

    #[test]
    fn quoted_and_mention_accessors() {
        let env = Envelope {
            key: key(),
            push_name: None,
            timestamp: 0,
            content: Some(MessageContent {
                extended_text: Some("reply".into()),
                quoted: Some(QuotedContent {
                    text: Some("original".into()),
                }),
                mentions: vec!["42@s.whatsapp.net".into()],
                ..Default::default()
            }),
        };
        assert_eq!(env.quoted_text(), Some("original"));
        assert_eq!(env.first_mention(), Some("42@s.whatsapp.net"));
    }
}
