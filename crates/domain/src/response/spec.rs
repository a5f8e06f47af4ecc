//! Response specification type
//!
//! Contains types for representing HTTP responses including
//! status codes, headers, body, and timing information.

use std::borrow::Cow;
use std::time::Duration;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true for any status below 400.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.0 < 400
    }

    /// Returns true if this is any error status (4xx or 5xx).
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.0 >= 400
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Response headers in the order the server sent them.
pub type ResponseHeaders = Vec<(String, String)>;

/// A completed HTTP response.
///
/// Read-only once built; the assertion runner and the renderer only borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase (e.g., "OK", "Not Found").
    pub status_text: String,
    /// Response headers.
    pub headers: ResponseHeaders,
    /// Raw response body.
    pub body: Vec<u8>,
    /// Time from dispatch until the body was fully read.
    pub elapsed: Duration,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` using the canonical reason phrase.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: ResponseHeaders,
        body: Vec<u8>,
        elapsed: Duration,
    ) -> Self {
        let status = status.into();
        Self {
            status: status.as_u16(),
            status_text: String::new(),
            headers,
            body,
            elapsed,
        }
    }

    /// Overrides the reason phrase (builder pattern).
    #[must_use]
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    /// Returns the status as a `StatusCode`.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode(self.status)
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Looks up a header value (case-insensitive). The first match wins.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the elapsed time in seconds.
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(
            status,
            vec![("Content-Type".to_string(), "application/json".to_string())],
            body.as_bytes().to_vec(),
            Duration::from_millis(120),
        )
    }

    #[test]
    fn test_status_text_is_empty_until_set() {
        assert_eq!(response(404, "").status_text, "");
        assert_eq!(
            response(200, "").with_status_text("Fine").status_text,
            "Fine"
        );
    }

    #[test]
    fn test_status_categories() {
        assert!(StatusCode(399).is_ok());
        assert!(StatusCode(400).is_error());
        assert_eq!(StatusCode(201).to_string(), "201");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let resp = response(200, "{}");
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn test_json_body() {
        let resp = response(200, r#"{"id": 1}"#);
        assert_eq!(resp.json().unwrap()["id"], 1);
        assert!(response(200, "plain text").json().is_err());
    }

    #[test]
    fn test_elapsed_secs() {
        assert!((response(200, "").elapsed_secs() - 0.12).abs() < f64::EPSILON);
    }
}
