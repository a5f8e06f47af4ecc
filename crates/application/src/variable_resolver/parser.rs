//! Placeholder parser for `{{variable}}` syntax
//!
//! Finds placeholder references with their byte positions.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `{{` + one or more word characters + `}}`. `\w` is Unicode-aware.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\{\{(\w+)\}\}").expect("placeholder regex")
});

/// A parsed placeholder reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without `{{ }}`).
    pub name: String,

    /// Byte range of the whole `{{name}}` token in the original string.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a string and extracts all placeholder references, left to right.
///
/// Matches never overlap. Tokens such as `{{a-b}}`, `{{}}` or `{{ a }}`
/// are not placeholders.
///
/// # Examples
///
/// ```
/// use apitester_application::variable_resolver::parse_variables;
///
/// let refs = parse_variables("{{host}}/users/{{id}}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "host");
/// assert_eq!(refs[1].span, 15..21);
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    PLACEHOLDER_RE
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(VariableReference::new(name.as_str(), whole.range()))
        })
        .collect()
}

/// Returns true if the input contains at least one placeholder.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    PLACEHOLDER_RE.is_match(input)
}

/// Extracts just the placeholder names, in order of appearance.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_variables(input).into_iter().map(|r| r.name).collect()
}
