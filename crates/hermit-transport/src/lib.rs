//! Transport/session boundary for the Hermit runtime.
//!
//! The core never speaks the wire protocol itself: a [`Transport`]
//! implementation turns network frames into [`TransportEvent`]s and exposes a
//! [`SessionHandle`] for outbound sends. Everything here is the contract; the
//! concrete network client lives outside this workspace.

pub mod creds;
pub mod envelope;
pub mod error;
pub mod handle;

pub use creds::CredentialStore;
pub use envelope::{Envelope, InboundEvent, MessageContent, MessageKey, QuotedContent};
pub use error::TransportError;
pub use handle::{
    DisconnectCause, OutboundPayload, Session, SessionHandle, SessionState, Transport,
    TransportEvent,
};
