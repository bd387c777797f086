use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between a function name and its namespace suffix.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Split a possibly namespace-qualified identifier into `(function, namespace)`.
///
/// Only the last separator splits: `"a.b.c"` yields `("a.b", "c")`.
/// Identifiers without a separator fall back to `default_namespace`.
pub fn parse_function_name(raw: &str, default_namespace: &str) -> (String, String) {
    match raw.rsplit_once(NAMESPACE_SEPARATOR) {
        Some((name, namespace)) => (name.to_string(), namespace.to_string()),
        None => (raw.to_string(), default_namespace.to_string()),
    }
}

/// Function identity after namespace qualification has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionRef {
    name: String,
    namespace: String,
}

impl FunctionRef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Parse a raw identifier, see [`parse_function_name`].
    pub fn parse(raw: &str, default_namespace: &str) -> Self {
        let (name, namespace) = parse_function_name(raw, default_namespace);
        Self { name, namespace }
    }

    /// Bare function name without the namespace suffix.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Display for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, NAMESPACE_SEPARATOR, self.namespace)
    }
}
