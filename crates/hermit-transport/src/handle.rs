//! Session lifecycle and outbound-send contract.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

use hermit_core::types::ConversationId;

use crate::envelope::{InboundEvent, MessageKey};
use crate::error::TransportError;

/// Why a session closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectCause {
    /// Credentials were explicitly revoked. Terminal — requires re-pairing.
    LoggedOut,
    ConnectionLost,
    ServerRestart,
    Timeout,
    Other(String),
}

impl DisconnectCause {
    /// Only a logged-out close is fatal; everything else is retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DisconnectCause::LoggedOut)
    }
}

impl std::fmt::Display for DisconnectCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisconnectCause::LoggedOut => write!(f, "logged out"),
            DisconnectCause::ConnectionLost => write!(f, "connection lost"),
            DisconnectCause::ServerRestart => write!(f, "server restart"),
            DisconnectCause::Timeout => write!(f, "timeout"),
            DisconnectCause::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Lifecycle of the single process-wide session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Closed(DisconnectCause),
}

/// Everything the transport can tell the runtime.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// Credential material changed; must be persisted immediately.
    CredentialsUpdated(Vec<u8>),
    /// No stored credentials — render this code so the operator can pair.
    PairingCode(String),
    StateChanged(SessionState),
    Messages(InboundEvent),
}

/// Payload of an outbound send.
#[derive(Debug, Clone)]
pub enum OutboundPayload {
    Text {
        text: String,
        /// Participant ids to tag (groups only).
        mentions: Vec<String>,
        /// Message to quote, when replying.
        quote: Option<MessageKey>,
    },
    Image {
        bytes: Vec<u8>,
        caption: Option<String>,
    },
    Poll {
        name: String,
        options: Vec<String>,
        selectable: u32,
    },
    /// Request deletion/recall of a previously sent message.
    Delete(MessageKey),
}

impl OutboundPayload {
    /// Plain text send with no mentions and no quote.
    pub fn text(text: impl Into<String>) -> Self {
        OutboundPayload::Text {
            text: text.into(),
            mentions: Vec::new(),
            quote: None,
        }
    }
}

/// Outbound half of an open session. Cheap to clone behind an `Arc`.
#[async_trait]
pub trait SessionHandle: Send + Sync {
    /// Best-effort single send. No retry at this layer.
    async fn send(
        &self,
        to: &ConversationId,
        payload: OutboundPayload,
    ) -> Result<(), TransportError>;

    /// Resolve a group conversation's display subject.
    async fn group_subject(&self, id: &ConversationId) -> Result<String, TransportError>;
}

/// An established session: a handle for sends plus the event stream.
pub struct Session {
    pub handle: Arc<dyn SessionHandle>,
    pub events: mpsc::Receiver<TransportEvent>,
}

/// Factory for sessions. The supervisor calls `connect` for the initial
/// session and again after every non-fatal disconnect.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Establish a session using `credentials` (persisted blob from a prior
    /// run), or begin a pairing flow when none exist.
    async fn connect(&self, credentials: Option<&[u8]>) -> Result<Session, TransportError>;
}
