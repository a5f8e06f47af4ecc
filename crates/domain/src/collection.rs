//! Named collections of saved requests.
//!
//! On disk a collection is `{ "name": ..., "requests": [...] }`, and each
//! request is `{method, url, headers, params, body}` plus optional `tests`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::request::{Headers, HttpMethod, QueryParams, RequestSpec};

/// A request definition stored in a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SavedRequest {
    /// HTTP method (defaults to GET).
    #[serde(default)]
    pub method: HttpMethod,
    /// URL as typed, placeholders unresolved.
    #[serde(default)]
    pub url: String,
    /// Headers as typed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: Headers,
    /// Query parameters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: QueryParams,
    /// Body: JSON value, raw string, or null.
    #[serde(default)]
    pub body: Option<Value>,
    /// Assertions to evaluate when the collection runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<String>,
}

impl SavedRequest {
    /// Captures a request definition with its assertions.
    #[must_use]
    pub fn from_spec(spec: &RequestSpec, tests: Vec<String>) -> Self {
        Self {
            method: spec.method,
            url: spec.url.clone(),
            headers: spec.headers.clone(),
            params: spec.params.clone(),
            body: spec.body.clone(),
            tests,
        }
    }

    /// Builds a dispatchable request with default timeout and TLS settings.
    #[must_use]
    pub fn to_spec(&self) -> RequestSpec {
        RequestSpec {
            headers: self.headers.clone(),
            params: self.params.clone(),
            body: self.body.clone().filter(|b| !b.is_null()),
            ..RequestSpec::new(self.method, self.url.clone())
        }
    }
}

/// A named, ordered list of requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name.
    pub name: String,
    /// Requests in run order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub requests: Vec<SavedRequest>,
}

impl Collection {
    /// Creates an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidName` if the name cannot be used as a
    /// file name.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            requests: Vec::new(),
        })
    }

    /// Appends a request.
    pub fn push(&mut self, request: SavedRequest) {
        self.requests.push(request);
    }

    /// Number of requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if there are no requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Checks that a collection or environment name is usable as a file stem.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` for empty names, names with path
/// separators, and `.` / `..`.
pub fn validate_name(name: &str) -> DomainResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        return Err(DomainError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
