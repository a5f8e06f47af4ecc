//! Response assertions.
//!
//! An assertion is written as a short string, either `status_code == 200` or
//! `body.data.user.id == '42'`. Each string is parsed into an [`Assertion`]
//! variant before evaluation so that syntax problems and evaluation failures
//! are kept apart.

use std::fmt;

/// Prefix of status code assertions.
pub const STATUS_CODE_PREFIX: &str = "status_code";

/// Prefix of body field assertions.
pub const BODY_PREFIX: &str = "body.";

/// Equality operator shared by both assertion forms.
pub const EQUALS: &str = "==";

/// A parsed assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// `status_code == <int>`.
    StatusCode {
        /// Expected status code.
        expected: i64,
    },
    /// `body.<dotted.path> == <literal>`.
    BodyPath {
        /// Path segments below the body root.
        path: Vec<String>,
        /// Expected value, compared as a string.
        expected: String,
    },
    /// A recognised prefix whose operands could not be parsed.
    Malformed {
        /// Why parsing failed.
        reason: String,
    },
    /// Neither recognised prefix.
    Unrecognized,
}

impl Assertion {
    /// Parses an assertion string.
    ///
    /// Never fails: problems are captured as [`Assertion::Malformed`] or
    /// [`Assertion::Unrecognized`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim_start();
        if input.starts_with(STATUS_CODE_PREFIX) {
            Self::parse_status_code(input)
        } else if let Some(rest) = input.strip_prefix(BODY_PREFIX) {
            Self::parse_body_path(rest)
        } else {
            Self::Unrecognized
        }
    }

    fn parse_status_code(input: &str) -> Self {
        let Some((_, rhs)) = input.split_once(EQUALS) else {
            return Self::missing_operator();
        };
        let rhs = rhs.trim();
        match rhs.parse::<i64>() {
            Ok(expected) => Self::StatusCode { expected },
            Err(e) => Self::Malformed {
                reason: format!("invalid status code '{rhs}': {e}"),
            },
        }
    }

    fn parse_body_path(rest: &str) -> Self {
        let Some((lhs, rhs)) = rest.split_once(EQUALS) else {
            return Self::missing_operator();
        };
        Self::BodyPath {
            path: lhs.trim().split('.').map(str::to_string).collect(),
            expected: strip_quotes(rhs.trim()).to_string(),
        }
    }

    fn missing_operator() -> Self {
        Self::Malformed {
            reason: format!("missing '{EQUALS}' operator"),
        }
    }
}

/// Removes one matching pair of surrounding single or double quotes.
#[must_use]
pub fn strip_quotes(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Why an assertion failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The observed value differs from the expected one.
    Mismatch {
        /// The value actually observed.
        actual: String,
    },
    /// The body is not JSON or the path does not resolve.
    InvalidPathOrNotJson,
    /// The assertion could not be evaluated.
    Error(String),
    /// The assertion matches no known form.
    Unrecognized,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch { actual } => write!(f, "got {actual}"),
            Self::InvalidPathOrNotJson => f.write_str("invalid path or response not JSON"),
            Self::Error(message) => write!(f, "error: {message}"),
            Self::Unrecognized => f.write_str("unrecognized assertion form"),
        }
    }
}

/// Outcome of one assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// The assertion exactly as written.
    pub source: String,
    /// The parsed form.
    pub assertion: Assertion,
    /// `None` when the assertion passed.
    pub failure: Option<FailureReason>,
}

impl AssertionResult {
    /// Creates a passed result.
    #[must_use]
    pub fn pass(source: impl Into<String>, assertion: Assertion) -> Self {
        Self {
            source: source.into(),
            assertion,
            failure: None,
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn fail(source: impl Into<String>, assertion: Assertion, reason: FailureReason) -> Self {
        Self {
            source: source.into(),
            assertion,
            failure: Some(reason),
        }
    }

    /// Whether the assertion passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// The display line: the source, followed by `(reason)` on failure.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.failure {
            None => self.source.clone(),
            Some(reason) => format!("{} ({reason})", self.source),
        }
    }
}

/// Results of evaluating a batch of assertions, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestResults {
    /// One result per input assertion.
    pub results: Vec<AssertionResult>,
}

impl TestResults {
    /// Wraps evaluated results.
    #[must_use]
    pub const fn new(results: Vec<AssertionResult>) -> Self {
        Self { results }
    }

    /// Messages of passed assertions, in input order.
    #[must_use]
    pub fn passed(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.passed())
            .map(AssertionResult::message)
            .collect()
    }

    /// Messages of failed assertions with their reasons, in input order.
    #[must_use]
    pub fn failed(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| !r.passed())
            .map(AssertionResult::message)
            .collect()
    }

    /// Total number of assertions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of failed assertions.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }

    /// Check if all tests passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(AssertionResult::passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_status_code() {
        assert_eq!(
            Assertion::parse("status_code == 200"),
            Assertion::StatusCode { expected: 200 }
        );
        assert_eq!(
            Assertion::parse("status_code==404"),
            Assertion::StatusCode { expected: 404 }
        );
    }

    #[test]
    fn test_parse_status_code_bad_rhs() {
        let parsed = Assertion::parse("status_code == ok");
        assert!(
            matches!(parsed, Assertion::Malformed { ref reason } if reason.contains("'ok'")),
            "{parsed:?}"
        );
    }

    #[test]
    fn test_parse_missing_operator() {
        assert_eq!(
            Assertion::parse("status_code 200"),
            Assertion::Malformed {
                reason: "missing '==' operator".to_string()
            }
        );
        assert!(matches!(
            Assertion::parse("body.id"),
            Assertion::Malformed { .. }
        ));
    }

    #[test]
    fn test_parse_body_path() {
        assert_eq!(
            Assertion::parse("body.data.user.id == '42'"),
            Assertion::BodyPath {
                path: vec!["data".into(), "user".into(), "id".into()],
                expected: "42".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_body_path_keeps_inner_equals() {
        assert_eq!(
            Assertion::parse(r#"body.query == "a==b""#),
            Assertion::BodyPath {
                path: vec!["query".into()],
                expected: "a==b".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(Assertion::parse("header.x == 1"), Assertion::Unrecognized);
        assert_eq!(Assertion::parse("body == 1"), Assertion::Unrecognized);
        assert_eq!(Assertion::parse(""), Assertion::Unrecognized);
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'x'"), "x");
        assert_eq!(strip_quotes("\"x\""), "x");
        assert_eq!(strip_quotes("''x''"), "'x'");
        assert_eq!(strip_quotes("'x\""), "'x\"");
        assert_eq!(strip_quotes("'"), "'");
        assert_eq!(strip_quotes("42"), "42");
    }

    #[test]
    fn test_failure_messages() {
        let failed = AssertionResult::fail(
            "status_code == 200",
            Assertion::StatusCode { expected: 200 },
            FailureReason::Mismatch {
                actual: "404".to_string(),
            },
        );
        assert_eq!(failed.message(), "status_code == 200 (got 404)");
        assert_eq!(
            FailureReason::InvalidPathOrNotJson.to_string(),
            "invalid path or response not JSON"
        );
        assert_eq!(
            FailureReason::Error("boom".to_string()).to_string(),
            "error: boom"
        );
    }

    #[test]
    fn test_results_partition_preserves_order() {
        let results = TestResults::new(vec![
            AssertionResult::pass("a", Assertion::Unrecognized),
            AssertionResult::fail("b", Assertion::Unrecognized, FailureReason::Unrecognized),
            AssertionResult::pass("c", Assertion::Unrecognized),
        ]);
        assert_eq!(results.passed(), vec!["a", "c"]);
        assert_eq!(results.failed(), vec!["b (unrecognized assertion form)"]);
        assert_eq!(results.total(), 3);
        assert_eq!(results.failed_count(), 1);
        assert!(!results.all_passed());
    }
}
