use std::time::Duration;

use crate::error::ResolveError;

pub const DEFAULT_NAMESPACE: &str = "openfaas-fn";
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 50;

pub const ENV_DEFAULT_NAMESPACE: &str = "FNROUTE_DEFAULT_NAMESPACE";
pub const ENV_RETRY_COUNT: &str = "FNROUTE_RETRY_COUNT";
pub const ENV_RETRY_INTERVAL_MS: &str = "FNROUTE_RETRY_INTERVAL_MS";

/// Resolver settings, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Namespace used when the function name carries no namespace suffix.
    pub default_namespace: String,
    /// Number of directory queries before giving up on a not-ready function.
    pub retry_count: u32,
    /// Wait between two consecutive not-ready queries.
    pub retry_interval: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            retry_count: DEFAULT_RETRY_COUNT,
            retry_interval: Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS),
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Only `retry_count` is constrained. An empty default namespace is a
    /// legal namespace for the guard and the directory to judge.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.retry_count == 0 {
            return Err(ResolveError::InvalidConfig(
                "retry_count must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load settings from `FNROUTE_*` environment variables.
    pub fn from_env() -> Result<Self, ResolveError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// Missing keys keep their defaults; present but unparsable values are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ResolveError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(ns) = lookup(ENV_DEFAULT_NAMESPACE) {
            cfg.default_namespace = ns.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_RETRY_COUNT) {
            cfg.retry_count = raw.trim().parse().map_err(|_| {
                ResolveError::InvalidConfig(format!("{ENV_RETRY_COUNT}: invalid value {raw:?}"))
            })?;
        }
        if let Some(raw) = lookup(ENV_RETRY_INTERVAL_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                ResolveError::InvalidConfig(format!(
                    "{ENV_RETRY_INTERVAL_MS}: invalid value {raw:?}"
                ))
            })?;
            cfg.retry_interval = Duration::from_millis(ms);
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
