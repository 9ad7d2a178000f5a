//! Data-fetch boundary for fetch-and-forward commands.
//!
//! Each [`FetchKind`] is one external source returning text or binary plus an
//! optional caption. Sources are pure request → response calls; the per-kind
//! fallback literal is applied by the command handler, not here.

pub mod http;
pub mod kind;

pub use http::HttpFetcher;
pub use kind::FetchKind;

use async_trait::async_trait;
use thiserror::Error;

/// What a source returned.
#[derive(Debug, Clone)]
pub enum FetchPayload {
    Text(String),
    Image {
        bytes: Vec<u8>,
        caption: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

/// A collection of external data sources, addressed by [`FetchKind`].
///
/// `Ok(None)` means the call succeeded but the expected payload field was
/// absent — the caller substitutes the kind's documented fallback literal.
#[async_trait]
pub trait FetchSource: Send + Sync {
    async fn fetch(&self, kind: FetchKind, arg: &str) -> Result<Option<FetchPayload>, FetchError>;
}
