use std::{fmt, fs, net::Ipv6Addr, path::Path, path::PathBuf};

use reqwest::Url;

use crate::errors::KubeError;

pub const SERVICE_ACCOUNT_TOKEN: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
pub const SERVICE_ACCOUNT_CA: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";

const ENV_SERVICE_HOST: &str = "KUBERNETES_SERVICE_HOST";
const ENV_SERVICE_PORT: &str = "KUBERNETES_SERVICE_PORT";

#[derive(Clone)]
pub struct KubeConfig {
    /// API server base URL (e.g. `https://10.96.0.1:443`, or `http://127.0.0.1:8001` behind `kubectl proxy`).
    pub api_server: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// PEM bundle trusted in addition to the system roots.
    pub ca_cert: Option<PathBuf>,
    /// Per-request timeout (default: 5 seconds).
    pub timeout_ms: u64,
}

impl Default for KubeConfig {
    fn default() -> Self {
        Self {
            api_server: "http://127.0.0.1:8001".to_string(),
            token: None,
            ca_cert: None,
            timeout_ms: 5_000,
        }
    }
}

impl fmt::Debug for KubeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KubeConfig")
            .field("api_server", &self.api_server)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("ca_cert", &self.ca_cert)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl KubeConfig {
    /// Configuration for a pod talking to its own cluster through the service account.
    pub fn in_cluster() -> Result<Self, KubeError> {
        Self::from_service_account(
            |key| std::env::var(key).ok(),
            Path::new(SERVICE_ACCOUNT_TOKEN),
            Path::new(SERVICE_ACCOUNT_CA),
        )
    }

    pub(crate) fn from_service_account<F>(
        lookup: F,
        token_path: &Path,
        ca_path: &Path,
    ) -> Result<Self, KubeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_SERVICE_HOST).ok_or(KubeError::MissingEnv(ENV_SERVICE_HOST))?;
        let port = lookup(ENV_SERVICE_PORT).unwrap_or_else(|| "443".to_string());
        let host = match host.parse::<Ipv6Addr>() {
            Ok(ip) => format!("[{ip}]"),
            Err(_) => host,
        };

        let token = fs::read_to_string(token_path).map_err(|source| KubeError::ReadFile {
            path: token_path.display().to_string(),
            source,
        })?;

        let cfg = Self {
            api_server: format!("https://{host}:{port}"),
            token: Some(token.trim().to_string()),
            ca_cert: ca_path.exists().then(|| ca_path.to_path_buf()),
            ..Default::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), KubeError> {
        self.base_url()?;
        if self.timeout_ms == 0 {
            return Err(KubeError::InvalidConfig(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.token.as_deref().is_some_and(str::is_empty) {
            return Err(KubeError::InvalidConfig("token is empty".to_string()));
        }
        Ok(())
    }

    pub(crate) fn base_url(&self) -> Result<Url, KubeError> {
        let invalid = |reason: &str| KubeError::InvalidEndpoint {
            url: self.api_server.clone(),
            reason: reason.to_string(),
        };

        let url = Url::parse(&self.api_server).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("url cannot be a base"));
        }
        Ok(url)
    }
}
