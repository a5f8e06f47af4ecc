//! apitester Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - `{{variable}}` substitution
//! - Use case orchestration

pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use use_cases::{
    ExecuteOutput, ExecuteRequest, ExecuteRequestError, ListCollections, ListEnvironments,
    ListEnvironmentsOutput, LoadEnvironment, LoadEnvironmentInput, LoadEnvironmentOutput,
    RecordHistory, RunCollection, RunEvent, RunSummary, SaveEnvironment, SaveOutput,
    SaveToCollection, SwitchEnvironment,
};
pub use variable_resolver::{ResolutionResult, VariableResolver, substitute};
