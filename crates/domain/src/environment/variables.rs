//! Flat string-keyed variable environment.

use std::collections::HashMap;

/// Variables available to `{{placeholder}}` substitution.
///
/// Built once per invocation from several layers. Every value is a string,
/// and a later layer overwrites earlier bindings of the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    name: Option<String>,
    variables: HashMap<String, String>,
}

impl Environment {
    /// Creates an empty, unnamed environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty environment carrying a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            variables: HashMap::new(),
        }
    }

    /// Returns the name of the selected environment, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Binds a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Binds a variable (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Layers `other` on top of `self`.
    ///
    /// Keys from `other` win. A named layer also renames the result.
    pub fn overlay(&mut self, other: Self) {
        if other.name.is_some() {
            self.name = other.name;
        }
        self.variables.extend(other.variables);
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if no variables are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over all bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        env.extend(iter);
        env
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Environment {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
