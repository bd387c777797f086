pub mod config;
pub use config::ResolverConfig;

pub mod directory;
pub use directory::EndpointDirectory;

mod error;
pub use error::{DirectoryError, ResolveError};

pub mod policy;
pub use policy::{NamespacePolicy, RESERVED_NAMESPACE};

pub mod poll;

pub mod resolver;
pub use resolver::Resolver;

pub mod select;
pub use select::{SeededSelector, Selector, UniformSelector};

pub use fnroute_model::{FunctionRef, INSTANCE_PORT, ReadySet, ResolvedAddress};
pub use tokio_util::sync::CancellationToken;

#[cfg(test)]
pub(crate) mod testing;
