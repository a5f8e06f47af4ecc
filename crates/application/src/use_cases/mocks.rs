//! In-memory port implementations shared by the use case tests.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::significant_drop_tightening,
    missing_docs
)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use apitester_domain::{
    Assertion, AssertionResult, Collection, Environment, FailureReason, HistoryEntry,
    RequestHistory, RequestSpec, ResponseSpec, TestResults,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::ports::{
    AssertionEvaluator, Clock, CollectionError, CollectionRepository, CollectionSummary,
    EnvironmentError, EnvironmentRepository, HistoryError, HistoryRepository, HttpClient,
    HttpClientError,
};

pub fn response(status: u16, body: &str) -> ResponseSpec {
    ResponseSpec::new(status, Vec::new(), body.as_bytes().to_vec(), Duration::from_millis(5))
}

/// Replays queued results and records every request it receives.
#[derive(Default)]
pub struct MockHttpClient {
    results: Mutex<VecDeque<Result<ResponseSpec, HttpClientError>>>,
    pub requests: Mutex<Vec<RequestSpec>>,
}

impl MockHttpClient {
    pub fn with_results(results: Vec<Result<ResponseSpec, HttpClientError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(response(200, "")))
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Passes assertions spelled `ok`, fails everything else.
pub struct KeywordEvaluator;

impl AssertionEvaluator for KeywordEvaluator {
    fn evaluate(&self, _response: &ResponseSpec, assertions: &[String]) -> TestResults {
        let results = assertions
            .iter()
            .map(|source| {
                if source == "ok" {
                    AssertionResult::pass(source, Assertion::Unrecognized)
                } else {
                    AssertionResult::fail(source, Assertion::Unrecognized, FailureReason::Unrecognized)
                }
            })
            .collect();
        TestResults::new(results)
    }
}

#[derive(Default)]
pub struct MockHistoryRepository {
    pub entries: Mutex<Option<Vec<HistoryEntry>>>,
    pub fail_save: bool,
}

impl MockHistoryRepository {
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(None),
            fail_save: true,
        }
    }

    pub fn stored(&self) -> Vec<HistoryEntry> {
        self.entries.lock().unwrap().clone().unwrap_or_default()
    }
}

impl HistoryRepository for MockHistoryRepository {
    async fn load(&self) -> Result<Option<RequestHistory>, HistoryError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .clone()
            .map(|entries| RequestHistory::from_entries(entries, 100)))
    }

    async fn save(&self, history: &RequestHistory) -> Result<(), HistoryError> {
        if self.fail_save {
            return Err(HistoryError::FileSystem("disk full".to_string()));
        }
        *self.entries.lock().unwrap() = Some(history.entries().iter().cloned().collect());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockCollectionRepository {
    pub collections: Mutex<BTreeMap<String, Collection>>,
}

impl MockCollectionRepository {
    pub fn with(collections: Vec<Collection>) -> Self {
        Self {
            collections: Mutex::new(
                collections
                    .into_iter()
                    .map(|c| (c.name.clone(), c))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, name: &str) -> Option<Collection> {
        self.collections.lock().unwrap().get(name).cloned()
    }
}

impl CollectionRepository for MockCollectionRepository {
    async fn load(&self, name: &str) -> Result<Collection, CollectionError> {
        self.get(name)
            .ok_or_else(|| CollectionError::NotFound(name.to_string()))
    }

    async fn save(&self, collection: &Collection) -> Result<(), CollectionError> {
        self.collections
            .lock()
            .unwrap()
            .insert(collection.name.clone(), collection.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CollectionSummary>, CollectionError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .values()
            .map(|c| CollectionSummary {
                name: c.name.clone(),
                request_count: c.len(),
            })
            .collect())
    }

    async fn exists(&self, name: &str) -> bool {
        self.collections.lock().unwrap().contains_key(name)
    }
}

#[derive(Default)]
pub struct MockEnvironmentRepository {
    pub named: Mutex<HashMap<String, Environment>>,
    pub files: Mutex<HashMap<PathBuf, Environment>>,
    pub active: Mutex<Option<String>>,
}

impl MockEnvironmentRepository {
    pub fn add_named(&self, name: &str, env: Environment) {
        self.named.lock().unwrap().insert(name.to_string(), env);
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, env: Environment) {
        self.files.lock().unwrap().insert(path.into(), env);
    }

    pub fn set_active_name(&self, name: &str) {
        *self.active.lock().unwrap() = Some(name.to_string());
    }
}

#[async_trait]
impl EnvironmentRepository for MockEnvironmentRepository {
    async fn load(&self, name: &str) -> Result<Environment, EnvironmentError> {
        self.named
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| EnvironmentError::NotFound(name.to_string()))
    }

    async fn load_file(&self, path: &Path) -> Result<Option<Environment>, EnvironmentError> {
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    async fn import(&self, name: &str, source: &Path) -> Result<(), EnvironmentError> {
        let env = self
            .files
            .lock()
            .unwrap()
            .get(source)
            .cloned()
            .ok_or_else(|| EnvironmentError::SourceNotFound(source.display().to_string()))?;
        self.add_named(name, env);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, EnvironmentError> {
        let mut names: Vec<String> = self.named.lock().unwrap().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn active(&self) -> Result<Option<String>, EnvironmentError> {
        Ok(self.active.lock().unwrap().clone())
    }

    async fn set_active(&self, name: &str) -> Result<(), EnvironmentError> {
        self.set_active_name(name);
        Ok(())
    }
}
