use mockbridge_core::{AppError, HttpMethod};
use thiserror::Error;

/// Outcome of a call no mock answered, or whose mock failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection refused by callbacks mock: {method} {url} matches no registration")]
    ConnectionRefused { method: HttpMethod, url: String },
    #[error("no mock address: {method} {url}")]
    NoMockAddress { method: HttpMethod, url: String },
    #[error("unmocked request: {method} {url}")]
    Unmocked { method: HttpMethod, url: String },
    #[error("mock callback failed: {0}")]
    Callback(#[source] AppError),
}

impl TransportError {
    /// Whether the call reached no mock at all.
    pub fn is_unmatched(&self) -> bool {
        !matches!(self, TransportError::Callback(_))
    }
}
