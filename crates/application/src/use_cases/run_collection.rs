//! Run collection use case
//!
//! Replays every saved request of a collection, one after another.

use std::sync::Arc;

use apitester_domain::{Collection, Environment, ResponseSpec, SavedRequest, TestResults};
use tracing::{info, warn};

use super::execute_request::{ExecuteRequest, ExecuteRequestError};
use super::record_history::RecordHistory;
use crate::ports::{AssertionEvaluator, Clock, HistoryRepository, HttpClient};

/// Progress notifications emitted while a collection runs.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// A request is about to be sent. `index` is 1-based.
    Started {
        /// Position in the collection, starting at 1.
        index: usize,
        /// Number of requests in the collection.
        total: usize,
        /// The saved definition being sent.
        request: &'a SavedRequest,
    },
    /// A response was received.
    Completed {
        /// Position in the collection, starting at 1.
        index: usize,
        /// The saved definition that was sent.
        request: &'a SavedRequest,
        /// The response received.
        response: &'a ResponseSpec,
        /// Results of the request's saved tests.
        tests: &'a TestResults,
        /// Status below 400 and every saved test passed.
        passed: bool,
    },
    /// The request could not be sent.
    Failed {
        /// Position in the collection, starting at 1.
        index: usize,
        /// The saved definition that failed.
        request: &'a SavedRequest,
        /// What went wrong.
        error: &'a ExecuteRequestError,
    },
}

/// Tally of a collection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Requests that passed.
    pub passed: usize,
    /// Requests that failed or errored.
    pub failed: usize,
    /// Requests in the collection.
    pub total: usize,
}

impl RunSummary {
    /// Returns true if nothing failed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Sequentially executes a collection.
///
/// One failing request never stops the run. Every response received is
/// recorded in history under its saved, unsubstituted URL.
pub struct RunCollection<C: HttpClient, E, H, K> {
    executor: ExecuteRequest<C>,
    evaluator: E,
    history: RecordHistory<H, K>,
}

impl<C, E, H, K> RunCollection<C, E, H, K>
where
    C: HttpClient,
    E: AssertionEvaluator,
    H: HistoryRepository,
    K: Clock,
{
    /// Creates the use case.
    pub const fn new(client: Arc<C>, evaluator: E, history: RecordHistory<H, K>) -> Self {
        Self {
            executor: ExecuteRequest::new(client),
            evaluator,
            history,
        }
    }

    /// Runs every request in order, reporting progress through `on_event`.
    pub async fn execute<F>(
        &self,
        collection: &Collection,
        env: &Environment,
        mut on_event: F,
    ) -> RunSummary
    where
        F: FnMut(RunEvent<'_>),
    {
        let total = collection.len();
        let mut summary = RunSummary {
            total,
            ..RunSummary::default()
        };
        info!(collection = %collection.name, total, "running collection");

        for (offset, request) in collection.requests.iter().enumerate() {
            let index = offset + 1;
            on_event(RunEvent::Started {
                index,
                total,
                request,
            });

            match self.executor.execute(&request.to_spec(), env).await {
                Ok(output) => {
                    let response = output.response;
                    let tests = self.evaluator.evaluate(&response, &request.tests);
                    let passed = response.status_code().is_ok() && tests.all_passed();

                    if passed {
                        summary.passed += 1;
                    } else {
                        summary.failed += 1;
                    }

                    if let Err(e) = self
                        .history
                        .record(request.method, &request.url, &response)
                        .await
                    {
                        warn!(error = %e, "failed to record history");
                    }

                    on_event(RunEvent::Completed {
                        index,
                        request,
                        response: &response,
                        tests: &tests,
                        passed,
                    });
                }
                Err(error) => {
                    summary.failed += 1;
                    on_event(RunEvent::Failed {
                        index,
                        request,
                        error: &error,
                    });
                }
            }
        }

        summary
    }
}
