//! Namespace access control applied before any directory access.

use std::collections::BTreeSet;

use crate::error::ResolveError;

/// Administrative namespace that is never resolvable.
pub const RESERVED_NAMESPACE: &str = "kube-system";

/// Which namespaces callers may resolve functions in.
///
/// [`RESERVED_NAMESPACE`] is rejected under every policy, including an
/// allow-list that names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespacePolicy {
    /// Reject the listed namespaces, accept everything else.
    Deny(BTreeSet<String>),
    /// Accept only the listed namespaces.
    Allow(BTreeSet<String>),
}

impl Default for NamespacePolicy {
    fn default() -> Self {
        Self::deny([RESERVED_NAMESPACE])
    }
}

impl NamespacePolicy {
    pub fn deny<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Deny(namespaces.into_iter().map(Into::into).collect())
    }

    pub fn allow<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Allow(namespaces.into_iter().map(Into::into).collect())
    }

    pub fn permits(&self, namespace: &str) -> bool {
        if namespace == RESERVED_NAMESPACE {
            return false;
        }
        match self {
            Self::Deny(denied) => !denied.contains(namespace),
            Self::Allow(allowed) => allowed.contains(namespace),
        }
    }

    pub fn verify(&self, namespace: &str) -> Result<(), ResolveError> {
        if self.permits(namespace) {
            return Ok(());
        }
        Err(ResolveError::ForbiddenNamespace {
            namespace: namespace.to_string(),
        })
    }
}

/// Check a namespace against the default policy.
pub fn verify_namespace(namespace: &str) -> Result<(), ResolveError> {
    NamespacePolicy::default().verify(namespace)
}
