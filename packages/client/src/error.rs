//! Error types for the Sumi client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The hub refused the participant because every color is taken
    #[error("Rejected by server: {0}")]
    CapacityRejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Gave up after repeated connection losses
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),

    /// Outgoing message could not be encoded
    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
