mod config;
pub use config::{KubeConfig, SERVICE_ACCOUNT_CA, SERVICE_ACCOUNT_TOKEN};

mod endpoints;

mod errors;
pub use errors::KubeError;

mod kube;
pub use kube::KubeEndpoints;
