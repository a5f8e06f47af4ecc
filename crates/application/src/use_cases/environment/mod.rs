//! Environment use cases
//!
//! Loading layers the process environment, the default env file and one
//! named environment. The other use cases manage the named store.

mod list_environments;
mod load_environment;
mod save_environment;
mod switch_environment;

pub use list_environments::{ListEnvironments, ListEnvironmentsOutput};
pub use load_environment::{LoadEnvironment, LoadEnvironmentInput, LoadEnvironmentOutput};
pub use save_environment::SaveEnvironment;
pub use switch_environment::SwitchEnvironment;
