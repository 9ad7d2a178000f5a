use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect failed: {0}")]
    Connect(String),

    #[error("send failed: {0}")]
    Send(String),

    #[error("group metadata lookup failed: {0}")]
    GroupLookup(String),

    #[error("credential storage error: {0}")]
    Credentials(String),
}
