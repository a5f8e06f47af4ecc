//! Application use cases (business logic orchestration).

pub mod environment;
mod execute_request;
mod list_collections;
mod record_history;
mod run_collection;
mod save_to_collection;

#[cfg(test)]
pub(crate) mod mocks;

pub use environment::{
    ListEnvironments, ListEnvironmentsOutput, LoadEnvironment, LoadEnvironmentInput,
    LoadEnvironmentOutput, SaveEnvironment, SwitchEnvironment,
};
pub use execute_request::{ExecuteOutput, ExecuteRequest, ExecuteRequestError};
pub use list_collections::ListCollections;
pub use record_history::RecordHistory;
pub use run_collection::{RunCollection, RunEvent, RunSummary};
pub use save_to_collection::{SaveOutput, SaveToCollection};
