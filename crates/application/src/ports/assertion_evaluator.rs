//! Assertion evaluator port

use apitester_domain::{ResponseSpec, TestResults};

/// Evaluates assertion strings against a completed response.
///
/// Implementations must be total: every assertion yields exactly one
/// result, in input order, and a bad assertion never aborts the batch.
pub trait AssertionEvaluator: Send + Sync {
    /// Evaluates all assertions against the response.
    fn evaluate(&self, response: &ResponseSpec, assertions: &[String]) -> TestResults;
}
