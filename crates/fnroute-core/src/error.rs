use fnroute_model::{AddressError, FunctionRef};
use thiserror::Error;

/// Failure reported by an [`EndpointDirectory`](crate::EndpointDirectory).
///
/// Every variant is fatal for the resolution that observed it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("endpoints \"{name}\" not found in namespace \"{namespace}\"")]
    NotFound { namespace: String, name: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("directory returned status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("invalid directory response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("namespace not allowed")]
    ForbiddenNamespace { namespace: String },

    #[error("error listing \"{function}.{namespace}\": {source}")]
    Directory {
        function: String,
        namespace: String,
        #[source]
        source: DirectoryError,
    },

    #[error("invalid function name \"{name}\": must not contain '.'")]
    InvalidFunctionName { name: String },

    #[error("max status retrieve count {attempts} exceeded")]
    ExhaustedRetries { attempts: u32 },

    #[error("resolution of \"{function}.{namespace}\" cancelled")]
    Cancelled { function: String, namespace: String },

    #[error("no route resolved for \"{function}.{namespace}\"")]
    NoRouteResolved { function: String, namespace: String },

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    #[error("invalid resolver config: {0}")]
    InvalidConfig(String),
}

impl ResolveError {
    pub(crate) fn directory(function: &FunctionRef, source: DirectoryError) -> Self {
        ResolveError::Directory {
            function: function.name().to_string(),
            namespace: function.namespace().to_string(),
            source,
        }
    }

    pub(crate) fn cancelled(function: &FunctionRef) -> Self {
        ResolveError::Cancelled {
            function: function.name().to_string(),
            namespace: function.namespace().to_string(),
        }
    }

    pub(crate) fn no_route(function: &FunctionRef) -> Self {
        ResolveError::NoRouteResolved {
            function: function.name().to_string(),
            namespace: function.namespace().to_string(),
        }
    }

    /// `true` when the function exists but never reported ready instances.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, ResolveError::ExhaustedRetries { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResolveError::Cancelled { .. })
    }
}
