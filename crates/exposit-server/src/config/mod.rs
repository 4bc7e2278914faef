//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use exposit_core::error::{ExpositError, Result};

pub use schema::{LogFormat, LoggingSection, ServerConfig, ServerSection};

/// Default config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "exposit.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        ExpositError::BadConfig(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| ExpositError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config for the binary: an explicit path must load; without
/// one, `exposit.yaml` is used when present, defaults otherwise.
pub fn resolve(explicit: Option<&str>) -> Result<ServerConfig> {
    match explicit {
        Some(path) => load_from_file(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        None => Ok(ServerConfig::default()),
    }
}
