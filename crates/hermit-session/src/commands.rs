//! Operator command handlers.
//!
//! Per-event error policy: bad arguments drop the event silently (the
//! triggering message stays); once a handler commits to running, the
//! triggering message is recalled even when the collaborator call later
//! fails. Recall failure is logged, never escalated.

use std::sync::Arc;

use tracing::{info, warn};

use hermit_agent::provider::{ChatMessage, ChatRequest, ChatRole, NO_RESPONSE};
use hermit_fetch::{FetchKind, FetchPayload};
use hermit_core::types::InboundMessage;
use hermit_transport::{MessageKey, OutboundPayload, SessionHandle};

use crate::router::Command;
use crate::runtime::Runtime;
use crate::sched::DeliveryQueue;

/// Rating used by the question-API family when the command gives none.
const DEFAULT_RATING: &str = "pg13";

impl Runtime {
    pub(crate) async fn run_command(
        &mut self,
        handle: &Arc<dyn SessionHandle>,
        msg: &InboundMessage,
        command: Command,
        args: &str,
    ) {
        match command {
            Command::Start => {
                self.recall_trigger(handle, msg).await;
                let entry = allow_entry(msg);
                match self.allowlist.add(&entry) {
                    Ok(true) => {
                        info!(chat = %msg.chat_name, entry, "started responding")
                    }
                    Ok(false) => {}
                    Err(e) => warn!(entry, error = %e, "allow-list add failed"),
                }
            }
            Command::Stop => {
                self.recall_trigger(handle, msg).await;
                let entry = allow_entry(msg);
                match self.allowlist.remove(&entry) {
                    Ok(true) => {
                        info!(chat = %msg.chat_name, entry, "stopped responding")
                    }
                    Ok(false) => {}
                    Err(e) => warn!(entry, error = %e, "allow-list remove failed"),
                }
            }
            Command::Schedule => {
                let Some((timestamp, text)) = args.split_once(' ') else {
                    return;
                };
                let text = text.trim();
                if text.is_empty() {
                    return;
                }
                match DeliveryQueue::schedule(
                    handle.clone(),
                    msg.conversation.clone(),
                    text.to_string(),
                    timestamp.trim(),
                ) {
                    Ok(_) => self.recall_trigger(handle, msg).await,
                    Err(e) => {
                        warn!(conversation = %msg.conversation, error = %e, "schedule rejected")
                    }
                }
            }
            Command::Save => {
                let Some(quoted) = msg.quoted_text.as_deref() else {
                    return;
                };
                self.recall_trigger(handle, msg).await;
                if let Err(e) = self.saved.append(quoted) {
                    warn!(error = %e, "saving quote failed");
                }
            }
            Command::ListSaves => {
                self.recall_trigger(handle, msg).await;
                let text = match self.saved.list() {
                    Ok(Some(data)) => format!("Saved Messages:\n\n{data}"),
                    Ok(None) => "No saved messages.".to_string(),
                    Err(e) => {
                        warn!(error = %e, "listing saves failed");
                        return;
                    }
                };
                self.send_text(handle, msg, text).await;
            }
            Command::ClearSaves => {
                self.recall_trigger(handle, msg).await;
                if let Err(e) = self.saved.clear() {
                    warn!(error = %e, "clearing saves failed");
                }
            }
            Command::Poll => {
                let options: Vec<String> = args
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect();
                if options.len() < 2 {
                    return;
                }
                self.recall_trigger(handle, msg).await;
                let payload = OutboundPayload::Poll {
                    name: "Choose one!!".to_string(),
                    options,
                    selectable: 1,
                };
                if let Err(e) = handle.send(&msg.conversation, payload).await {
                    warn!(conversation = %msg.conversation, error = %e, "poll send failed");
                }
            }
            Command::Eli5 => {
                if args.is_empty() {
                    return;
                }
                self.recall_trigger(handle, msg).await;
                let req = ChatRequest {
                    model: self.model.clone(),
                    system: "explain like I'm 5".to_string(),
                    messages: vec![ChatMessage::new(
                        ChatRole::User,
                        format!("explain {args} in simple terms like I'm 5 years old."),
                    )],
                    max_tokens: self.max_tokens,
                };
                let reply = match self.provider.complete(&req).await {
                    Ok(resp) => resp.content.unwrap_or_else(|| NO_RESPONSE.to_string()),
                    Err(e) => {
                        warn!(error = %e, "eli5 generation failed");
                        return;
                    }
                };
                self.send_text(handle, msg, reply).await;
            }
            Command::Fetch(kind) => {
                self.run_fetch(handle, msg, kind, args).await;
            }
        }
    }

    async fn run_fetch(
        &self,
        handle: &Arc<dyn SessionHandle>,
        msg: &InboundMessage,
        kind: FetchKind,
        args: &str,
    ) {
        self.recall_trigger(handle, msg).await;

        let arg = if kind.takes_rating() && args.is_empty() {
            DEFAULT_RATING
        } else {
            args
        };

        let payload = match self.fetcher.fetch(kind, arg).await {
            Ok(Some(payload)) => payload,
            Ok(None) => FetchPayload::Text(kind.fallback().to_string()),
            Err(e) => {
                warn!(?kind, error = %e, "fetch failed");
                return;
            }
        };

        let outbound = match payload {
            FetchPayload::Text(text) => match (msg.is_group, msg.mentioned.as_deref()) {
                (true, Some(target)) => OutboundPayload::Text {
                    text: format!("@{} {text}", local_part(target)),
                    mentions: vec![target.to_string()],
                    quote: None,
                },
                _ => OutboundPayload::text(text),
            },
            FetchPayload::Image { bytes, caption } => OutboundPayload::Image { bytes, caption },
        };

        if let Err(e) = handle.send(&msg.conversation, outbound).await {
            warn!(conversation = %msg.conversation, ?kind, error = %e, "fetch send failed");
        }
    }

    /// Request deletion/recall of the triggering command message.
    async fn recall_trigger(&self, handle: &Arc<dyn SessionHandle>, msg: &InboundMessage) {
        let key = MessageKey {
            conversation: Some(msg.conversation.clone()),
            id: msg.message_id.clone(),
            from_operator: true,
            participant: None,
        };
        if let Err(e) = handle
            .send(&msg.conversation, OutboundPayload::Delete(key))
            .await
        {
            warn!(conversation = %msg.conversation, error = %e, "recall of command message failed");
        }
    }

    async fn send_text(&self, handle: &Arc<dyn SessionHandle>, msg: &InboundMessage, text: String) {
        if let Err(e) = handle
            .send(&msg.conversation, OutboundPayload::text(text))
            .await
        {
            warn!(conversation = %msg.conversation, error = %e, "send failed");
        }
    }
}

/// Allow-list entry for a conversation: groups toggle by exact id, direct
/// chats by resolved display name.
fn allow_entry(msg: &InboundMessage) -> String {
    if msg.is_group {
        msg.conversation.to_string()
    } else {
        msg.chat_name.clone()
    }
}

fn local_part(id: &str) -> &str {
    id.split('@').next().unwrap_or(id)
}
