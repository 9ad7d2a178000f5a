//! Connection supervisor: owns the session lifecycle end to end.
//!
//! The supervisor connects, drives the event stream through the runtime,
//! and reconnects after any non-fatal close. Only a logged-out close (or a
//! shutdown signal) ends the loop. Events are consumed strictly one at a
//! time, so all runtime state mutation is single-threaded.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use hermit_transport::{
    CredentialStore, DisconnectCause, Session, SessionState, Transport, TransportEvent,
};

use crate::error::SessionError;
use crate::runtime::Runtime;

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Outcome of driving one session to its end.
enum SessionEnd {
    /// Non-fatal close; reconnect.
    Retry(DisconnectCause),
    /// Credentials revoked; do not reconnect.
    Fatal,
    /// Shutdown was requested.
    Shutdown,
}

pub struct Supervisor<T: Transport> {
    transport: T,
    creds: CredentialStore,
    runtime: Runtime,
    retry_delay: Duration,
}

impl<T: Transport> Supervisor<T> {
    pub fn new(transport: T, creds: CredentialStore, runtime: Runtime) -> Self {
        Self {
            transport,
            creds,
            runtime,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Run until shutdown is signalled or the session is logged out.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), SessionError> {
        loop {
            if *shutdown.borrow() {
                return Ok(());
            }

            let credentials = match self.creds.load() {
                Ok(blob) => blob,
                Err(e) => {
                    warn!(error = %e, "credential load failed, pairing fresh");
                    None
                }
            };

            let session = match self.transport.connect(credentials.as_deref()).await {
                Ok(session) => session,
                Err(e) => {
                    warn!(error = %e, "connect failed, retrying");
                    if self.pause(&mut shutdown).await {
                        return Ok(());
                    }
                    continue;
                }
            };

            match self.drive(session, &mut shutdown).await {
                SessionEnd::Retry(cause) => {
                    warn!(%cause, "session closed, reconnecting");
                    if self.pause(&mut shutdown).await {
                        return Ok(());
                    }
                }
                SessionEnd::Fatal => {
                    error!("session logged out; credentials must be re-paired");
                    return Err(SessionError::LoggedOut);
                }
                SessionEnd::Shutdown => return Ok(()),
            }
        }
    }

    /// Consume one session's events until it closes or shutdown arrives.
    async fn drive(&mut self, session: Session, shutdown: &mut watch::Receiver<bool>) -> SessionEnd {
        let Session { handle, mut events } = session;

        loop {
            let event = tokio::select! {
                event = events.recv() => event,
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        return SessionEnd::Shutdown;
                    }
                    continue;
                }
            };

            let Some(event) = event else {
                // The transport dropped its sender without a close event.
                return SessionEnd::Retry(DisconnectCause::ConnectionLost);
            };

            match event {
                TransportEvent::CredentialsUpdated(blob) => {
                    if let Err(e) = self.creds.save(&blob) {
                        warn!(error = %e, "credential persist failed");
                    }
                }
                TransportEvent::PairingCode(code) => {
                    info!(code, "pairing code issued");
                }
                TransportEvent::StateChanged(SessionState::Connecting) => {}
                TransportEvent::StateChanged(SessionState::Open) => {
                    info!("session open");
                }
                TransportEvent::StateChanged(SessionState::Closed(cause)) => {
                    if cause.is_fatal() {
                        return SessionEnd::Fatal;
                    }
                    return SessionEnd::Retry(cause);
                }
                TransportEvent::Messages(inbound) => {
                    self.runtime.handle_event(&handle, inbound).await;
                }
            }
        }
    }

    /// Sleep the retry delay; true when shutdown arrived during the pause.
    async fn pause(&self, shutdown: &mut watch::Receiver<bool>) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(self.retry_delay) => false,
            _ = shutdown.changed() => *shutdown.borrow(),
        }
    }

    /// Runtime access for inspection after `run` is not yet started.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}
