//! Errors of edge requests.

use ems_common::{JsonrpcError, JsonrpcParseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    /// The edge (or backend) answered with a JSON-RPC error.
    #[error("request rejected: {0}")]
    Rejected(#[from] JsonrpcError),

    #[error("websocket is not connected")]
    NotConnected,

    /// The websocket closed before the response arrived.
    #[error("websocket connection closed")]
    ConnectionClosed,

    #[error("websocket send failed: {0}")]
    Transport(String),

    #[error("failed to serialize request: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(#[from] JsonrpcParseError),
}

impl RequestError {
    /// Text shown to the user: the remote message for rejections, the error itself otherwise.
    pub fn message(&self) -> String {
        match self {
            RequestError::Rejected(e) => e.message.clone(),
            other => other.to_string(),
        }
    }
}
