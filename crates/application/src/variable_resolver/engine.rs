//! Variable resolution engine
//!
//! Replaces `{{variable}}` references with values from an [`Environment`].

use apitester_domain::{Environment, RequestSpec};

use super::parser::parse_variables;

/// A placeholder that was replaced during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariable {
    /// The variable name.
    pub name: String,
    /// The substituted value.
    pub value: String,
}

/// Result of variable resolution for a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The resolved string with all known variables substituted.
    pub resolved: String,

    /// Variables that were successfully resolved, in order of appearance.
    pub resolved_variables: Vec<ResolvedVariable>,

    /// Variable names that could not be resolved, in order of appearance.
    pub unresolved: Vec<String>,

    /// Whether all variables were successfully resolved.
    pub is_complete: bool,
}

impl ResolutionResult {
    /// Creates a result for input with no variables.
    #[must_use]
    pub fn no_variables(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            resolved_variables: Vec::new(),
            unresolved: Vec::new(),
            is_complete: true,
        }
    }
}

/// The variable resolution engine.
///
/// Substitution is a single left-to-right pass. Substituted values are
/// never re-scanned, so a value containing `{{other}}` is inserted as-is.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    env: &'a Environment,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver over the given environment.
    #[must_use]
    pub const fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Resolves all placeholders in the input string.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let references = parse_variables(input);

        if references.is_empty() {
            return ResolutionResult::no_variables(input);
        }

        let mut resolved_variables = Vec::new();
        let mut unresolved = Vec::new();
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in references {
            result.push_str(&input[last_end..var_ref.span.start]);

            if let Some(value) = self.env.get(&var_ref.name) {
                result.push_str(value);
                resolved_variables.push(ResolvedVariable {
                    name: var_ref.name,
                    value: value.to_string(),
                });
            } else {
                // Unknown names stay verbatim
                result.push_str(&input[var_ref.span.clone()]);
                unresolved.push(var_ref.name);
            }

            last_end = var_ref.span.end;
        }

        result.push_str(&input[last_end..]);

        let is_complete = unresolved.is_empty();
        ResolutionResult {
            resolved: result,
            resolved_variables,
            unresolved,
            is_complete,
        }
    }

    /// Returns a copy of the request with the URL and header values resolved.
    ///
    /// Header names, params, body and auth are left untouched. The second
    /// element lists every unresolved name, URL first then headers.
    #[must_use]
    pub fn resolve_request(&self, request: &RequestSpec) -> (RequestSpec, Vec<String>) {
        let mut resolved = request.clone();

        let url = self.resolve(&request.url);
        let mut unresolved = url.unresolved;
        resolved.url = url.resolved;

        for value in resolved.headers.values_mut() {
            let header = self.resolve(value);
            unresolved.extend(header.unresolved);
            *value = header.resolved;
        }

        (resolved, unresolved)
    }
}

/// Substitutes every known `{{name}}` in `text` with its value from `env`.
///
/// Unknown names are left unchanged. Never fails.
#[must_use]
pub fn substitute(text: &str, env: &Environment) -> String {
    VariableResolver::new(env).resolve(text).resolved
}
