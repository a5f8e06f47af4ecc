//! HTTP Client port

use std::future::Future;

use apitester_domain::{RequestSpec, ResponseSpec};

/// Errors reported by an HTTP client adapter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpClientError {
    /// The URL could not be parsed by the client.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout {
        /// The configured timeout.
        timeout_secs: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS resolution failed: {0}")]
    DnsError(String),

    /// The server refused the connection.
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    /// The connection failed for another reason.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The TLS handshake failed.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// The request body could not be encoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("Request failed: {0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// The request is sent exactly as given. Placeholder substitution
    /// happens before this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other transport problems. HTTP error statuses are
    /// not errors.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}
