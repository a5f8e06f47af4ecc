//! Request history persistence.
//!
//! History is a single JSON array, newest entry first.

use std::path::PathBuf;

use apitester_application::ports::{FileSystem, HistoryError, HistoryRepository};
use apitester_domain::{HistoryEntry, RequestHistory};

use crate::config::AppConfig;
use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Repository for request history persistence.
#[derive(Debug, Clone)]
pub struct FileHistoryRepository<F> {
    fs: F,
    path: PathBuf,
    limit: usize,
}

impl<F: FileSystem> FileHistoryRepository<F> {
    /// Creates a repository for the configured history file.
    pub fn new(fs: F, config: &AppConfig) -> Self {
        Self {
            fs,
            path: config.history_file.clone(),
            limit: config.history_limit,
        }
    }
}

impl<F: FileSystem> HistoryRepository for FileHistoryRepository<F> {
    async fn load(&self) -> Result<Option<RequestHistory>, HistoryError> {
        let content = match self.fs.read_file(&self.path).await {
            Ok(content) => content,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(HistoryError::FileSystem(e.to_string())),
        };

        let entries: Vec<HistoryEntry> =
            from_json_bytes(&content).map_err(|e| HistoryError::Serialization(e.to_string()))?;
        Ok(Some(RequestHistory::from_entries(entries, self.limit)))
    }

    async fn save(&self, history: &RequestHistory) -> Result<(), HistoryError> {
        let bytes = to_json_stable_bytes(history.entries())
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;
        self.fs
            .write_file(&self.path, &bytes)
            .await
            .map_err(|e| HistoryError::FileSystem(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::persistence::TokioFileSystem;
    use apitester_domain::{HttpMethod, ResponseSpec};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tempfile::TempDir;

    fn repository(temp: &TempDir) -> FileHistoryRepository<TokioFileSystem> {
        FileHistoryRepository::new(TokioFileSystem, &AppConfig::with_root(temp.path()))
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(repository(&temp).load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let repo = repository(&temp);
        let response = ResponseSpec::new(404, Vec::new(), Vec::new(), Duration::ZERO)
            .with_status_text("Not Found");

        let mut history = RequestHistory::default();
        history.add(HistoryEntry::new(
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            HttpMethod::Get,
            "http://a",
            &response,
        ));
        repo.save(&history).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, history);

        let raw = std::fs::read_to_string(temp.path().join("history.json")).unwrap();
        assert!(raw.trim_start().starts_with('['));
        assert!(raw.contains("\"status_text\": \"Not Found\""));
    }

    #[tokio::test]
    async fn test_reads_naive_timestamps() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("history.json"),
            r#"[{"timestamp": "2024-03-01T10:20:30.123456", "method": "get",
                 "url": "http://x", "status_code": 200, "status_text": "OK"}]"#,
        )
        .unwrap();

        let loaded = repository(&temp).load().await.unwrap().unwrap();
        let entry = &loaded.entries()[0];
        assert_eq!(entry.method, HttpMethod::Get);
        assert_eq!(entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-01 10:20:30");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("history.json"), "{not json").unwrap();
        assert!(matches!(
            repository(&temp).load().await,
            Err(HistoryError::Serialization(_))
        ));
    }
}
