use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::logger::{error::LoggerError, format::LoggerFormat};

pub const ENV_LOG_FORMAT: &str = "FNROUTE_LOG_FORMAT";
pub const ENV_LOG_LEVEL: &str = "FNROUTE_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `info,fnroute_core=debug`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}

impl LoggerConfig {
    /// Read `FNROUTE_LOG_FORMAT` / `FNROUTE_LOG_LEVEL`, keeping defaults for unset keys.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            cfg.format = format.parse()?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            cfg.level = level.trim().to_string();
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|_| LoggerError::InvalidLogLevel(self.level.clone()))
    }
}
