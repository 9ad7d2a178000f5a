use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session credentials revoked — re-pairing required")]
    LoggedOut,
}

pub type Result<T> = std::result::Result<T, SessionError>;
