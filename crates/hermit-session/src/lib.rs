//! Session/runtime orchestrator — the stateful core of Hermit.
//!
//! A [`supervisor::Supervisor`] owns the connection lifecycle against a
//! [`hermit_transport::Transport`] and feeds every inbound event, one at a
//! time, through a [`Runtime`]: classify, route operator commands, or
//! auto-reply in allow-listed conversations.

pub mod allowlist;
pub mod classify;
pub mod context;
pub mod error;
pub mod router;
pub mod saved;
pub mod sched;
pub mod supervisor;

mod commands;
mod reply;
mod runtime;

pub use error::SessionError;
pub use runtime::Runtime;
pub use supervisor::Supervisor;
