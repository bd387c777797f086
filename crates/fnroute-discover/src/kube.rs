use std::{fs, time::Duration};

use async_trait::async_trait;
use fnroute_core::{DirectoryError, EndpointDirectory};
use fnroute_model::ReadySet;
use reqwest::{StatusCode, Url};
use tracing::{debug, trace};

use crate::{
    config::KubeConfig,
    endpoints::{ApiStatus, Endpoints},
    errors::KubeError,
};

/// [`EndpointDirectory`] backed by the Kubernetes `v1/Endpoints` REST API.
pub struct KubeEndpoints {
    client: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl KubeEndpoints {
    pub fn new(config: KubeConfig) -> Result<Self, KubeError> {
        config.validate()?;

        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_millis(config.timeout_ms));
        if let Some(path) = &config.ca_cert {
            let pem = fs::read(path).map_err(|source| KubeError::ReadFile {
                path: path.display().to_string(),
                source,
            })?;
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
        }

        Self::with_client(builder.build()?, config)
    }

    /// Use a preconfigured client (custom TLS, proxies, middleware).
    pub fn with_client(client: reqwest::Client, config: KubeConfig) -> Result<Self, KubeError> {
        let base = config.base_url()?;
        Ok(Self {
            client,
            base,
            token: config.token,
        })
    }

    fn endpoints_url(&self, namespace: &str, name: &str) -> Result<Url, DirectoryError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DirectoryError::Transport(format!("invalid api server url {}", self.base)))?
            .pop_if_empty()
            .extend(["api", "v1", "namespaces", namespace, "endpoints", name]);
        Ok(url)
    }
}

#[async_trait]
impl EndpointDirectory for KubeEndpoints {
    async fn fetch(&self, namespace: &str, function: &str) -> Result<ReadySet, DirectoryError> {
        let url = self.endpoints_url(namespace, function)?;
        trace!(%url, "fetching endpoints");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound {
                namespace: namespace.to_string(),
                name: function.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DirectoryError::Status {
                code: status.as_u16(),
                message: status_message(&body),
            });
        }

        let endpoints: Endpoints = serde_json::from_str(&body).map_err(|e| {
            DirectoryError::InvalidResponse(format!(
                "failed to parse response: {}, body: {}",
                e, body
            ))
        })?;

        let ready = endpoints.ready_set();
        debug!(
            namespace,
            function,
            ready = ready.len(),
            not_ready = endpoints.not_ready_count(),
            "endpoints fetched"
        );
        Ok(ready)
    }
}

fn status_message(body: &str) -> String {
    serde_json::from_str::<ApiStatus>(body)
        .ok()
        .and_then(|s| s.message)
        .unwrap_or_else(|| body.trim().to_string())
}
