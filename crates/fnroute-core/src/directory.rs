use std::sync::Arc;

use async_trait::async_trait;
use fnroute_model::ReadySet;

use crate::error::DirectoryError;

/// Service-discovery authority reporting ready instances per function.
///
/// Implementations should:
/// - receive the bare function name, never a namespace-qualified one;
/// - return an empty [`ReadySet`] while the function exists but has no ready instances;
/// - return an error for anything else (transport, auth, unknown function).
#[async_trait]
pub trait EndpointDirectory: Send + Sync + 'static {
    async fn fetch(&self, namespace: &str, function: &str) -> Result<ReadySet, DirectoryError>;
}

#[async_trait]
impl<D> EndpointDirectory for Arc<D>
where
    D: EndpointDirectory + ?Sized,
{
    async fn fetch(&self, namespace: &str, function: &str) -> Result<ReadySet, DirectoryError> {
        (**self).fetch(namespace, function).await
    }
}
