//! Execute Request Use Case
//!
//! Resolves placeholders, validates the target URL and dispatches the
//! request through the `HttpClient` port.

use std::sync::Arc;

use apitester_domain::{Environment, RequestSpec, ResponseSpec};
use thiserror::Error;
use tracing::debug;

use crate::ports::{HttpClient, HttpClientError};
use crate::variable_resolver::VariableResolver;

/// Error type for the execute request use case.
#[derive(Debug, Clone, Error)]
pub enum ExecuteRequestError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is invalid.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL after substitution.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// HTTP request failed.
    #[error("{0}")]
    HttpError(#[from] HttpClientError),
}

/// A completed exchange together with what substitution did.
#[derive(Debug, Clone)]
pub struct ExecuteOutput {
    /// The response received.
    pub response: ResponseSpec,
    /// The URL actually dispatched.
    pub resolved_url: String,
    /// Placeholder names that had no value.
    pub unresolved: Vec<String>,
}

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let use_case = ExecuteRequest::new(Arc::new(ReqwestHttpClient::new()?));
/// let env = Environment::new().with("host", "api.example.com");
///
/// let request = RequestSpec::get("https://{{host}}/users");
/// let output = use_case.execute(&request, &env).await?;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Substitutes placeholders in the URL and header values, then sends the request.
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError` on validation or transport failures.
    /// An HTTP error status is a successful execution.
    pub async fn execute(
        &self,
        request: &RequestSpec,
        env: &Environment,
    ) -> Result<ExecuteOutput, ExecuteRequestError> {
        let (resolved, unresolved) = VariableResolver::new(env).resolve_request(request);
        if !unresolved.is_empty() {
            debug!(?unresolved, "placeholders left unresolved");
        }

        Self::validate(&resolved)?;

        debug!(method = %resolved.method, url = %resolved.url, "dispatching request");
        let response = self.client.execute(&resolved).await?;

        Ok(ExecuteOutput {
            response,
            resolved_url: resolved.url,
            unresolved,
        })
    }

    fn validate(request: &RequestSpec) -> Result<(), ExecuteRequestError> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(ExecuteRequestError::EmptyUrl);
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ExecuteRequestError::InvalidUrl {
                url: request.url.clone(),
                reason: "URL must start with http:// or https://".to_string(),
            });
        }

        Ok(())
    }
}
