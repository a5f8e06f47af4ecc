//! List collections use case

use crate::ports::{CollectionError, CollectionRepository, CollectionSummary};

/// Lists stored collections with their request counts.
pub struct ListCollections<R> {
    repository: R,
}

impl<R: CollectionRepository> ListCollections<R> {
    /// Creates a new `ListCollections` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    #[allow(clippy::missing_errors_doc)]
    pub async fn execute(&self) -> Result<Vec<CollectionSummary>, CollectionError> {
        self.repository.list().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::use_cases::mocks::MockCollectionRepository;
    use apitester_domain::{Collection, RequestSpec, SavedRequest};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_lists_names_and_counts() {
        let mut api = Collection::new("api").unwrap();
        api.push(SavedRequest::from_spec(&RequestSpec::get("http://a"), Vec::new()));
        api.push(SavedRequest::from_spec(&RequestSpec::get("http://b"), Vec::new()));
        let empty = Collection::new("empty").unwrap();

        let use_case = ListCollections::new(MockCollectionRepository::with(vec![empty, api]));
        let listed = use_case.execute().await.unwrap();

        assert_eq!(
            listed,
            vec![
                CollectionSummary {
                    name: "api".to_string(),
                    request_count: 2
                },
                CollectionSummary {
                    name: "empty".to_string(),
                    request_count: 0
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_store() {
        let use_case = ListCollections::new(MockCollectionRepository::default());
        assert!(use_case.execute().await.unwrap().is_empty());
    }
}
