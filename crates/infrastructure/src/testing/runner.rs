//! Test runner implementation.
//!
//! Parses assertion strings and evaluates them against a response.

use apitester_application::ports::AssertionEvaluator;
use apitester_domain::{Assertion, AssertionResult, FailureReason, ResponseSpec, TestResults};
use serde_json::Value;

/// Test runner that executes assertions against responses.
///
/// The response body is parsed as JSON at most once per batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a single parsed assertion against a response.
    #[must_use]
    pub fn run_assertion(
        &self,
        source: &str,
        assertion: Assertion,
        response: &ResponseSpec,
        body: &mut LazyBody<'_>,
    ) -> AssertionResult {
        let failure = match &assertion {
            Assertion::StatusCode { expected } => Self::check_status_code(*expected, response),
            Assertion::BodyPath { path, expected } => {
                Self::check_body_path(path, expected, body.get())
            }
            Assertion::Malformed { reason } => Some(FailureReason::Error(reason.clone())),
            Assertion::Unrecognized => Some(FailureReason::Unrecognized),
        };

        match failure {
            None => AssertionResult::pass(source, assertion),
            Some(reason) => AssertionResult::fail(source, assertion, reason),
        }
    }

    fn check_status_code(expected: i64, response: &ResponseSpec) -> Option<FailureReason> {
        (i64::from(response.status) != expected).then(|| FailureReason::Mismatch {
            actual: response.status.to_string(),
        })
    }

    fn check_body_path(
        path: &[String],
        expected: &str,
        body: Option<&Value>,
    ) -> Option<FailureReason> {
        let Some(value) = body.and_then(|json| lookup_path(json, path)) else {
            return Some(FailureReason::InvalidPathOrNotJson);
        };

        let actual = stringify(value);
        (actual != expected).then_some(FailureReason::Mismatch { actual })
    }
}

impl AssertionEvaluator for TestRunner {
    fn evaluate(&self, response: &ResponseSpec, assertions: &[String]) -> TestResults {
        let mut body = LazyBody::new(response);
        let results = assertions
            .iter()
            .map(|source| self.run_assertion(source, Assertion::parse(source), response, &mut body))
            .collect();
        TestResults::new(results)
    }
}

/// Parses the response body as JSON on first use.
#[derive(Debug)]
pub struct LazyBody<'a> {
    response: &'a ResponseSpec,
    parsed: Option<Option<Value>>,
}

impl<'a> LazyBody<'a> {
    /// Wraps a response without parsing it yet.
    #[must_use]
    pub const fn new(response: &'a ResponseSpec) -> Self {
        Self {
            response,
            parsed: None,
        }
    }

    /// Returns the parsed body, or `None` if it is not JSON.
    pub fn get(&mut self) -> Option<&Value> {
        self.parsed
            .get_or_insert_with(|| self.response.json().ok())
            .as_ref()
    }
}

/// Walks `path` from `root`.
///
/// On an object each segment is a key. On an array a segment that parses
/// as an index selects that element. Anything else fails the walk.
#[must_use]
pub fn lookup_path<'v>(root: &'v Value, path: &[String]) -> Option<&'v Value> {
    path.iter().try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Renders a JSON value for comparison against an expected string.
///
/// Strings are used raw. Everything else uses compact JSON text.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
