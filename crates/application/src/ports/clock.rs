//! Time source for history timestamps

use chrono::{DateTime, Utc};

/// Supplies "now" to use cases that stamp what they record.
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}
