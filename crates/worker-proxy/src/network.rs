//! The network seam.

use async_trait::async_trait;
use worker_core::{Request, Response};

/// Errors from the network layer.
///
/// A `NetworkError` means the request never produced a response (connection
/// refused, DNS failure, host-level timeout). A response with a non-2xx
/// status is *not* an error: it is returned to the caller as `Ok` and simply
/// never cached.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Connection-level failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// The host runtime's own request timeout fired. The proxy defines no
    /// independent timeout layer.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The request could not be issued.
    #[error("request error: {0}")]
    Request(String),
}

/// Outbound fetch client provided by the embedding runtime.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Issue a request and wait for its response.
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError>;
}
