//! Auto-reply path for allow-listed conversations.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use hermit_agent::provider::{ChatMessage, ChatRequest, NO_RESPONSE};
use hermit_core::types::{ContextTurn, InboundMessage, Role};
use hermit_transport::{MessageKey, OutboundPayload, SessionHandle};

use crate::runtime::Runtime;

impl Runtime {
    /// Evaluate the auto-reply path for a classified message.
    ///
    /// When the conversation is allow-listed, the inbound text is appended
    /// as a user turn first — even for operator messages, which advance the
    /// context without generating a reply. A generator failure leaves that
    /// turn in place; the message is not replayed.
    pub(crate) async fn auto_reply(&mut self, handle: &Arc<dyn SessionHandle>, msg: &InboundMessage) {
        if !self
            .allowlist
            .is_allowed(&msg.conversation, msg.is_group, &msg.chat_name)
        {
            return;
        }

        self.context.append(
            &msg.conversation,
            ContextTurn {
                text: Some(msg.text.clone()),
                timestamp: msg.timestamp,
                role: Role::User,
            },
        );

        if msg.from_operator {
            return;
        }

        debug!(sender = %msg.sender_name, chat = %msg.chat_name, "generating reply");

        let messages: Vec<ChatMessage> = self
            .context
            .recent(&msg.conversation)
            .iter()
            .map(|turn| {
                ChatMessage::new(turn.role.into(), turn.text.clone().unwrap_or_default())
            })
            .collect();

        let req = ChatRequest {
            model: self.model.clone(),
            system: self.persona.system().to_string(),
            messages,
            max_tokens: self.max_tokens,
        };

        let reply = match self.provider.complete(&req).await {
            Ok(resp) => resp.content.unwrap_or_else(|| NO_RESPONSE.to_string()),
            Err(e) => {
                warn!(conversation = %msg.conversation, error = %e, "reply generation failed");
                return;
            }
        };

        self.context.append(
            &msg.conversation,
            ContextTurn {
                text: Some(reply.clone()),
                timestamp: Utc::now().timestamp(),
                role: Role::Assistant,
            },
        );

        let quote = Some(MessageKey {
            conversation: Some(msg.conversation.clone()),
            id: msg.message_id.clone(),
            from_operator: false,
            participant: None,
        });

        if let Err(e) = handle
            .send(
                &msg.conversation,
                OutboundPayload::Text {
                    text: reply,
                    mentions: Vec::new(),
                    quote,
                },
            )
            .await
        {
            warn!(conversation = %msg.conversation, error = %e, "reply send failed");
        }
    }
}
