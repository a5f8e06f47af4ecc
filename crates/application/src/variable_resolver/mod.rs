//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` syntax in strings.
//!
//! # Usage
//!
//! ```
//! use apitester_application::variable_resolver::VariableResolver;
//! use apitester_domain::Environment;
//!
//! let env = Environment::new().with("host", "localhost");
//! let resolver = VariableResolver::new(&env);
//!
//! let result = resolver.resolve("http://{{host}}/{{path}}");
//! assert_eq!(result.resolved, "http://localhost/{{path}}");
//! assert_eq!(result.unresolved, vec!["path"]);
//! ```

pub mod engine;
pub mod parser;

pub use engine::{ResolutionResult, ResolvedVariable, VariableResolver, substitute};
pub use parser::{VariableReference, extract_variable_names, has_variables, parse_variables};
