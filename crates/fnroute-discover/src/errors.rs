use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubeError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid api server url {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("invalid kube config: {0}")]
    InvalidConfig(String),

    #[error("http client init failed: {0}")]
    Client(#[from] reqwest::Error),
}
