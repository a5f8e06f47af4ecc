//! Filesystem-backed repositories and collection exchange.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use apitester_application::ports::{
    CollectionRepository, EnvironmentError, EnvironmentRepository, HistoryRepository,
};
use apitester_application::{
    LoadEnvironment, LoadEnvironmentInput, RecordHistory, SaveEnvironment, SaveToCollection,
    SwitchEnvironment,
};
use apitester_domain::{
    Collection, Environment, HttpMethod, RequestSpec, ResponseSpec, SavedRequest,
};
use apitester_infrastructure::{
    AppConfig, ExchangeError, ExchangeFormat, FileEnvironmentRepository, FileHistoryRepository,
    FileSystemCollectionRepository, SystemClock, TokioFileSystem, export_collection,
    import_collection,
};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tempfile::TempDir;

fn setup() -> (TempDir, AppConfig) {
    let temp = TempDir::new().unwrap();
    let config = AppConfig::with_root(temp.path().join("data"))
        .with_env_file(temp.path().join(".env"));
    (temp, config)
}

fn env_repo(config: &AppConfig) -> FileEnvironmentRepository<TokioFileSystem> {
    FileEnvironmentRepository::new(TokioFileSystem, config)
}

#[tokio::test]
async fn test_environment_layers_from_disk() {
    let (temp, config) = setup();
    std::fs::write(&config.default_env_file, "HOST=dotenv\nTOKEN=dotenv\n").unwrap();
    let staging = temp.path().join("staging.env");
    std::fs::write(&staging, "TOKEN=staging\n").unwrap();

    SaveEnvironment::new(env_repo(&config))
        .execute("staging", &staging)
        .await
        .unwrap();
    SwitchEnvironment::new(env_repo(&config))
        .execute("staging")
        .await
        .unwrap();

    let output = LoadEnvironment::new(env_repo(&config))
        .execute(LoadEnvironmentInput {
            process: Environment::new().with("HOST", "process").with("ONLY", "process"),
            env_file: config.default_env_file.clone(),
            selected: None,
        })
        .await
        .unwrap();

    assert_eq!(output.applied.as_deref(), Some("staging"));
    assert_eq!(output.environment.get("ONLY"), Some("process"));
    assert_eq!(output.environment.get("HOST"), Some("dotenv"));
    assert_eq!(output.environment.get("TOKEN"), Some("staging"));
    assert_eq!(
        std::fs::read_to_string(&config.active_env_file).unwrap(),
        "staging\n"
    );
}

#[tokio::test]
async fn test_environment_store_lists_and_rejects_unknown() {
    let (temp, config) = setup();
    let repo = env_repo(&config);
    assert!(repo.list().await.unwrap().is_empty());
    assert_eq!(repo.active().await.unwrap(), None);

    let source = temp.path().join("x.env");
    std::fs::write(&source, "A=1").unwrap();
    repo.import("prod", &source).await.unwrap();
    repo.import("dev", &source).await.unwrap();

    assert_eq!(repo.list().await.unwrap(), vec!["dev", "prod"]);
    assert_eq!(repo.load("prod").await.unwrap().name(), Some("prod"));

    let result = SwitchEnvironment::new(env_repo(&config)).execute("ghost").await;
    assert!(matches!(result, Err(EnvironmentError::NotFound(_))));
    assert!(!config.active_env_file.exists());

    let result = repo.import("qa", Path::new("/definitely/missing.env")).await;
    assert!(matches!(result, Err(EnvironmentError::SourceNotFound(_))));
}

#[tokio::test]
async fn test_history_is_capped_on_disk() {
    let (_temp, config) = setup();
    let record = RecordHistory::new(
        FileHistoryRepository::new(TokioFileSystem, &config),
        SystemClock,
    );
    let response = ResponseSpec::new(200, Vec::new(), Vec::new(), Duration::ZERO);

    for i in 0..105 {
        record
            .record(HttpMethod::Get, &format!("http://x/{i}"), &response)
            .await
            .unwrap();
    }

    let history = FileHistoryRepository::new(TokioFileSystem, &config)
        .load()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(history.len(), 100);
    assert_eq!(history.entries()[0].url, "http://x/104");
    assert_eq!(history.entries()[99].url, "http://x/5");
}

#[tokio::test]
async fn test_export_then_import_both_formats() {
    let (temp, config) = setup();
    let repo = FileSystemCollectionRepository::new(TokioFileSystem, &config);
    SaveToCollection::new(repo.clone())
        .execute(
            "api",
            SavedRequest::from_spec(
                &RequestSpec::new(HttpMethod::Patch, "{{base}}/x").with_header("A", "b"),
                vec!["status_code == 200".to_string()],
            ),
        )
        .await
        .unwrap();
    let original = repo.load("api").await.unwrap();

    for format in [ExchangeFormat::Json, ExchangeFormat::Yaml] {
        let path = temp.path().join(format!("api.{}", format.extension()));
        export_collection(&TokioFileSystem, &original, format, &path)
            .await
            .unwrap();

        let imported = import_collection(&TokioFileSystem, &path, "copy")
            .await
            .unwrap();
        assert_eq!(imported.name, "copy");
        assert_eq!(imported.requests, original.requests);
    }
}

#[tokio::test]
async fn test_import_rejects_unknown_extension() {
    let (temp, _config) = setup();
    let path = temp.path().join("api.txt");
    std::fs::write(&path, "{}").unwrap();

    let result = import_collection(&TokioFileSystem, &path, "api").await;
    assert!(matches!(result, Err(ExchangeError::UnsupportedFileFormat(_))));
}

#[tokio::test]
async fn test_import_from_original_layout() {
    let (temp, _config) = setup();
    let path = temp.path().join("legacy.yml");
    std::fs::write(
        &path,
        "name: legacy\nrequests:\n- method: post\n  url: http://x\n  headers: null\n  params: {}\n  body:\n    a: 1\n",
    )
    .unwrap();

    let collection: Collection = import_collection(&TokioFileSystem, &path, "legacy")
        .await
        .unwrap();
    assert_eq!(collection.requests[0].method, HttpMethod::Post);
    assert_eq!(collection.requests[0].body, Some(serde_json::json!({"a": 1})));
}
