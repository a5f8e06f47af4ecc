//! File system based collection repository implementation.
//!
//! Each collection is one pretty-printed JSON file named `<name>.json`.

use std::path::{Path, PathBuf};

use apitester_application::ports::{
    CollectionError, CollectionRepository, CollectionSummary, FileSystem,
};
use apitester_domain::{Collection, validate_name};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const COLLECTION_EXTENSION: &str = "json";

/// File system based implementation of `CollectionRepository`.
#[derive(Debug, Clone)]
pub struct FileSystemCollectionRepository<F> {
    fs: F,
    dir: PathBuf,
}

impl<F: FileSystem> FileSystemCollectionRepository<F> {
    /// Creates a repository over the configured collections directory.
    pub fn new(fs: F, config: &AppConfig) -> Self {
        Self {
            fs,
            dir: config.collections_dir.clone(),
        }
    }

    fn collection_path(&self, name: &str) -> Result<PathBuf, CollectionError> {
        validate_name(name).map_err(|e| CollectionError::InvalidName(e.to_string()))?;
        Ok(self.dir.join(format!("{name}.{COLLECTION_EXTENSION}")))
    }

    async fn read(&self, path: &Path, name: &str) -> Result<Collection, CollectionError> {
        let content = self.fs.read_file(path).await.map_err(|e| {
            if e.is_not_found() {
                CollectionError::NotFound(name.to_string())
            } else {
                CollectionError::FileSystem(e.to_string())
            }
        })?;
        from_json_bytes(&content).map_err(|e| CollectionError::Serialization(e.to_string()))
    }
}

impl<F: FileSystem> CollectionRepository for FileSystemCollectionRepository<F> {
    async fn load(&self, name: &str) -> Result<Collection, CollectionError> {
        let path = self.collection_path(name)?;
        self.read(&path, name).await
    }

    async fn save(&self, collection: &Collection) -> Result<(), CollectionError> {
        let path = self.collection_path(&collection.name)?;
        let bytes = to_json_stable_bytes(collection)
            .map_err(|e| CollectionError::Serialization(e.to_string()))?;
        self.fs
            .write_file(&path, &bytes)
            .await
            .map_err(|e| CollectionError::FileSystem(e.to_string()))?;
        debug!(path = %path.display(), requests = collection.len(), "collection written");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CollectionSummary>, CollectionError> {
        let mut paths: Vec<PathBuf> = match self.fs.read_dir(&self.dir).await {
            Ok(entries) => entries
                .into_iter()
                .filter(|p| p.extension().is_some_and(|ext| ext == COLLECTION_EXTENSION))
                .collect(),
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(CollectionError::FileSystem(e.to_string())),
        };
        paths.sort();

        let mut summaries = Vec::with_capacity(paths.len());
        for path in paths {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            match self.read(&path, &stem).await {
                Ok(collection) => summaries.push(CollectionSummary {
                    name: if collection.name.is_empty() {
                        stem
                    } else {
                        collection.name
                    },
                    request_count: collection.requests.len(),
                }),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable collection"),
            }
        }
        Ok(summaries)
    }

    async fn exists(&self, name: &str) -> bool {
        match self.collection_path(name) {
            Ok(path) => self.fs.is_file(&path).await,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::persistence::TokioFileSystem;
    use apitester_domain::{HttpMethod, RequestSpec, SavedRequest};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn repository(temp: &TempDir) -> FileSystemCollectionRepository<TokioFileSystem> {
        FileSystemCollectionRepository::new(TokioFileSystem, &AppConfig::with_root(temp.path()))
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let repo = repository(&temp);

        let mut collection = Collection::new("users").unwrap();
        collection.push(SavedRequest::from_spec(
            &RequestSpec::new(HttpMethod::Post, "{{base}}/users")
                .with_header("Content-Type", "application/json")
                .with_body(json!({"name": "ada"})),
            vec!["status_code == 201".to_string()],
        ));
        repo.save(&collection).await.unwrap();

        assert!(repo.exists("users").await);
        assert_eq!(repo.load("users").await.unwrap(), collection);

        let raw = std::fs::read_to_string(temp.path().join("collections/users.json")).unwrap();
        assert!(raw.ends_with('\n'));
        assert!(raw.contains("  \"name\": \"users\""));
    }

    #[tokio::test]
    async fn test_load_missing() {
        let temp = TempDir::new().unwrap();
        let result = repository(&temp).load("nope").await;
        assert!(matches!(result, Err(CollectionError::NotFound(name)) if name == "nope"));
    }

    #[tokio::test]
    async fn test_invalid_name() {
        let temp = TempDir::new().unwrap();
        let repo = repository(&temp);
        assert!(matches!(
            repo.load("../etc").await,
            Err(CollectionError::InvalidName(_))
        ));
        assert!(!repo.exists("../etc").await);
    }

    #[tokio::test]
    async fn test_list_sorted_and_skips_junk() {
        let temp = TempDir::new().unwrap();
        let repo = repository(&temp);
        repo.save(&Collection::new("zeta").unwrap()).await.unwrap();
        let mut alpha = Collection::new("alpha").unwrap();
        alpha.push(SavedRequest::from_spec(&RequestSpec::get("http://a"), Vec::new()));
        repo.save(&alpha).await.unwrap();

        let dir = temp.path().join("collections");
        std::fs::write(dir.join("broken.json"), "not json").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(
            listed,
            vec![
                CollectionSummary {
                    name: "alpha".to_string(),
                    request_count: 1
                },
                CollectionSummary {
                    name: "zeta".to_string(),
                    request_count: 0
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_without_directory() {
        let temp = TempDir::new().unwrap();
        assert!(repository(&temp).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_legacy_layout() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("collections");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("legacy.json"),
            r#"{"name": "legacy", "requests": [
                {"method": "get", "url": "http://x", "headers": null, "params": {}, "body": null}
            ]}"#,
        )
        .unwrap();

        let collection = repository(&temp).load("legacy").await.unwrap();
        assert_eq!(collection.requests[0].method, HttpMethod::Get);
        assert!(collection.requests[0].headers.is_empty());
        assert_eq!(collection.requests[0].body, None);
    }
}
