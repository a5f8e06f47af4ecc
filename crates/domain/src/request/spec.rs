//! Request specification type

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::HttpMethod;
use crate::error::{DomainError, DomainResult};

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Request headers in insertion order.
pub type Headers = IndexMap<String, String>;

/// Query parameters in insertion order.
pub type QueryParams = IndexMap<String, String>;

/// Basic authentication credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl BasicAuth {
    /// Creates new credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parses `user:password`, splitting on the first colon.
    ///
    /// Returns `None` when there is no colon.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        input
            .split_once(':')
            .map(|(user, password)| Self::new(user, password))
    }
}

/// How a request body goes over the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyPayload<'a> {
    /// Serialized as JSON with `Content-Type: application/json`.
    Json(&'a Value),
    /// Sent verbatim.
    Raw(Cow<'a, str>),
}

/// A fully described HTTP request, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL, possibly containing `{{placeholders}}`.
    pub url: String,
    /// Request headers.
    pub headers: Headers,
    /// Query parameters appended to the URL.
    pub params: QueryParams,
    /// Optional body. Objects and arrays are sent as JSON, strings raw.
    pub body: Option<Value>,
    /// Optional basic auth credentials.
    pub auth: Option<BasicAuth>,
    /// Timeout in seconds.
    pub timeout_secs: u64,
    /// Whether TLS certificates are verified.
    pub verify_tls: bool,
}

impl RequestSpec {
    /// Creates a request with default timeout and TLS verification on.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            params: QueryParams::new(),
            body: None,
            auth: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_tls: true,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a query parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Sets the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets basic auth (builder pattern).
    #[must_use]
    pub fn with_auth(mut self, auth: BasicAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the timeout in seconds (builder pattern).
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Enables or disables TLS verification (builder pattern).
    #[must_use]
    pub const fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Returns how the body should be sent, if there is one.
    #[must_use]
    pub fn body_payload(&self) -> Option<BodyPayload<'_>> {
        match self.body.as_ref()? {
            Value::Null => None,
            value @ (Value::Object(_) | Value::Array(_)) => Some(BodyPayload::Json(value)),
            Value::String(text) => Some(BodyPayload::Raw(Cow::Borrowed(text))),
            scalar => Some(BodyPayload::Raw(Cow::Owned(scalar.to_string()))),
        }
    }

    /// Interprets body text: JSON when it parses, a plain string otherwise.
    #[must_use]
    pub fn parse_body(text: &str) -> Value {
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }
}

/// Splits `key<sep>value` on the first separator and trims both sides.
///
/// # Errors
///
/// Returns `DomainError::InvalidPair` if the separator is missing.
pub fn parse_pair(input: &str, separator: char) -> DomainResult<(String, String)> {
    input
        .split_once(separator)
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| DomainError::InvalidPair {
            input: input.to_string(),
            separator,
        })
}
