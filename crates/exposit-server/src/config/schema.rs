use std::net::SocketAddr;

use serde::Deserialize;
use exposit_core::error::{ExpositError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExpositError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.metrics_path.starts_with('/') {
            return Err(ExpositError::BadConfig(
                "server.metrics_path must start with '/'".into(),
            ));
        }
        if self.metrics_path == "/" || self.metrics_path == "/healthz" {
            return Err(ExpositError::BadConfig(format!(
                "server.metrics_path must not be {:?}",
                self.metrics_path
            )));
        }
        if self.metrics_path.chars().any(|c| c.is_whitespace() || c == '{' || c == '}' || c == '*' || c == ':') {
            return Err(ExpositError::BadConfig(
                "server.metrics_path must be a literal path".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ExpositError::BadConfig(format!("server.listen {:?} is not a socket address: {e}", self.listen))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
