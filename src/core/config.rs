//! Gate connection configuration.
//!
//! Resolution order for the endpoint: `--gate-endpoint` flag, then the
//! `PIPECTL_GATE_ENDPOINT` environment variable, then `config.json`, then
//! the built-in default.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_GATE_ENDPOINT: &str = "http://localhost:8084";

const CONFIG_FILENAME: &str = "config.json";
const ENV_GATE_ENDPOINT: &str = "PIPECTL_GATE_ENDPOINT";

/// Connection settings for the gate service, stored in config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default = "default_gate_endpoint")]
    pub gate_endpoint: String,

    /// Full header line ("Name: value") attached verbatim to every request.
    /// Session/auth flows themselves live outside this tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_header: Option<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            gate_endpoint: default_gate_endpoint(),
            auth_header: None,
        }
    }
}

fn default_gate_endpoint() -> String {
    DEFAULT_GATE_ENDPOINT.to_string()
}

/// Base pipectl config directory (~/.config/pipectl/ on Unix-like systems,
/// %APPDATA%\pipectl on Windows)
pub fn config_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected("APPDATA environment variable not set on Windows")
        })?;
        Ok(PathBuf::from(appdata).join("pipectl"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected("HOME environment variable not set on Unix-like system")
        })?;
        Ok(PathBuf::from(home).join(".config").join("pipectl"))
    }
}

/// Path to the config.json file
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

/// Load gate configuration, applying env var and CLI overrides.
///
/// A missing config file yields built-in defaults; a malformed one is an
/// error rather than a silent fallback.
pub fn load(endpoint_override: Option<&str>) -> Result<GateConfig> {
    let config = read_config_file(&config_path()?)?;
    Ok(resolve(
        config,
        env::var(ENV_GATE_ENDPOINT).ok(),
        endpoint_override,
    ))
}

/// Apply endpoint overrides onto the file config: the flag wins over the
/// env var, the env var over the file. Empty overrides are ignored.
fn resolve(
    mut config: GateConfig,
    env_endpoint: Option<String>,
    flag_endpoint: Option<&str>,
) -> GateConfig {
    if let Some(endpoint) = env_endpoint {
        if !endpoint.is_empty() {
            config.gate_endpoint = endpoint;
        }
    }

    if let Some(endpoint) = flag_endpoint {
        if !endpoint.is_empty() {
            config.gate_endpoint = endpoint.to_string();
        }
    }

    config
}

fn read_config_file(path: &Path) -> Result<GateConfig> {
    if !path.exists() {
        return Ok(GateConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
}
