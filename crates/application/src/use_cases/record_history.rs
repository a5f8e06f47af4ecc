//! Record history use case

use apitester_domain::{
    DEFAULT_HISTORY_LIMIT, HistoryEntry, HttpMethod, RequestHistory, ResponseSpec,
};

use crate::ports::{Clock, HistoryError, HistoryRepository};

/// Prepends completed exchanges to the persisted history.
///
/// The whole history is read, updated and written back on every call.
pub struct RecordHistory<H, K> {
    repository: H,
    clock: K,
    limit: usize,
}

impl<H: HistoryRepository, K: Clock> RecordHistory<H, K> {
    /// Creates the use case with the default limit of 100 entries.
    pub const fn new(repository: H, clock: K) -> Self {
        Self {
            repository,
            clock,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Overrides the number of entries kept.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Records one exchange. `url` is stored as given, before substitution.
    ///
    /// # Errors
    /// Returns an error if the history cannot be read or written.
    pub async fn record(
        &self,
        method: HttpMethod,
        url: &str,
        response: &ResponseSpec,
    ) -> Result<(), HistoryError> {
        let mut history = self
            .repository
            .load()
            .await?
            .map_or_else(|| RequestHistory::new(self.limit), |h| {
                RequestHistory::from_entries(h.entries().iter().cloned().collect(), self.limit)
            });

        history.add(HistoryEntry::new(self.clock.now(), method, url, response));
        self.repository.save(&history).await
    }

    /// Loads the stored history, if any.
    ///
    /// # Errors
    /// Returns an error if the history file exists but cannot be read.
    pub async fn load(&self) -> Result<Option<RequestHistory>, HistoryError> {
        self.repository.load().await
    }

    #[cfg(test)]
    pub(crate) const fn repository(&self) -> &H {
        &self.repository
    }
}
