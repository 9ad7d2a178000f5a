//! Console transport: a stdin/stdout stand-in for a real wire client.
//!
//! Each typed line becomes one inbound message in a single fixed
//! conversation. Lines starting with `/` arrive as operator messages so
//! commands route; everything else arrives as a peer message and exercises
//! the auto-reply path (type `/start` first to allow-list the console chat).
//! Outbound sends are printed to stdout.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use hermit_core::types::ConversationId;
use hermit_transport::{
    Envelope, InboundEvent, MessageContent, MessageKey, OutboundPayload, Session, SessionHandle,
    SessionState, Transport, TransportError, TransportEvent,
};

const CONSOLE_JID: &str = "console@s.whatsapp.net";
const CONSOLE_NAME: &str = "Console";

pub struct ConsoleTransport {
    // Keeps event channels open across stdin EOF so the supervisor idles
    // instead of reconnect-looping.
    keepalive: Mutex<Vec<mpsc::Sender<TransportEvent>>>,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self {
            keepalive: Mutex::new(Vec::new()),
        }
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn connect(&self, _credentials: Option<&[u8]>) -> Result<Session, TransportError> {
        let (tx, rx) = mpsc::channel(16);
        if let Ok(mut keepalive) = self.keepalive.lock() {
            keepalive.push(tx.clone());
        }

        tokio::spawn(async move {
            if tx
                .send(TransportEvent::StateChanged(SessionState::Open))
                .await
                .is_err()
            {
                return;
            }
            let counter = AtomicU64::new(0);
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let id = counter.fetch_add(1, Ordering::Relaxed);
                let event = TransportEvent::Messages(InboundEvent {
                    envelopes: vec![Envelope {
                        key: MessageKey {
                            conversation: Some(ConversationId::new(CONSOLE_JID)),
                            id: format!("console-{id}"),
                            from_operator: line.starts_with('/'),
                            participant: None,
                        },
                        push_name: Some(CONSOLE_NAME.to_string()),
                        timestamp: Utc::now().timestamp(),
                        content: Some(MessageContent {
                            text: Some(line),
                            ..Default::default()
                        }),
                    }],
                });
                if tx.send(event).await.is_err() {
                    return;
                }
            }
            debug!("stdin closed; console session idling");
        });

        Ok(Session {
            handle: Arc::new(ConsoleHandle),
            events: rx,
        })
    }
}

struct ConsoleHandle;

#[async_trait]
impl SessionHandle for ConsoleHandle {
    async fn send(
        &self,
        to: &ConversationId,
        payload: OutboundPayload,
    ) -> Result<(), TransportError> {
        match payload {
            OutboundPayload::Text { text, mentions, .. } => {
                if mentions.is_empty() {
                    println!("<< {text}");
                } else {
                    println!("<< {text}  (mentions: {})", mentions.join(", "));
                }
            }
            OutboundPayload::Image { bytes, caption } => {
                let caption = caption.unwrap_or_default();
                println!("<< [image, {} bytes] {caption}", bytes.len());
            }
            OutboundPayload::Poll { name, options, .. } => {
                println!("<< [poll] {name}: {}", options.join(" / "));
            }
            OutboundPayload::Delete(key) => {
                debug!(conversation = %to, id = %key.id, "recall requested");
            }
        }
        Ok(())
    }

    async fn group_subject(&self, id: &ConversationId) -> Result<String, TransportError> {
        Ok(id.local_part().to_string())
    }
}
