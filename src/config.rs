//! Driver configuration sourced from the environment.
//!
//! Scripts should not hard-code where their WebDriver endpoint listens or which
//! browser binary it should launch; those live in the environment of whoever runs
//! the script. This module resolves them once, up front, so a bad value fails
//! before any session is created.

use crate::error::ConfigError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::env;
use std::path::PathBuf;
use url::Url;

/// Endpoint used when [`URL_VAR`] is unset; the conventional local WebDriver port.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Environment variable naming the WebDriver endpoint URL.
pub const URL_VAR: &str = "WEBDRIVER_URL";

/// Environment variable naming the browser binary the driver should launch.
pub const BINARY_VAR: &str = "WEBDRIVER_BROWSER_BINARY";

/// Environment variable holding extra session capabilities as a JSON object.
pub const CAPS_VAR: &str = "WEBDRIVER_CAPS";

/// Everything an external driver implementation needs to establish a session.
///
/// This crate only resolves and validates the values; consuming them is up to the
/// driver being bootstrapped.
#[derive(Clone, Debug, Deserialize)]
pub struct DriverConfig {
    /// Where the WebDriver server listens.
    pub webdriver_url: Url,

    /// Browser binary for the driver to launch, when it should not use its default.
    #[serde(default)]
    pub browser_binary: Option<PathBuf>,

    /// Extra capabilities requested for the session, e.g. headless arguments.
    #[serde(default)]
    pub capabilities: Map<String, Value>,
}

impl DriverConfig {
    /// A configuration pointing at `webdriver_url` with no binary override and no
    /// extra capabilities.
    pub fn new(webdriver_url: Url) -> Self {
        DriverConfig {
            webdriver_url,
            browser_binary: None,
            capabilities: Map::new(),
        }
    }

    /// Resolve a configuration from [`URL_VAR`], [`BINARY_VAR`], and [`CAPS_VAR`],
    /// falling back to [`DEFAULT_WEBDRIVER_URL`] for the endpoint.
    pub fn from_env() -> Result<Self, ConfigError> {
        let webdriver_url = match env::var(URL_VAR) {
            Ok(raw) => raw.parse()?,
            Err(_) => DEFAULT_WEBDRIVER_URL.parse()?,
        };
        let browser_binary = env::var_os(BINARY_VAR).map(PathBuf::from);
        let capabilities = match env::var(CAPS_VAR) {
            Ok(raw) => serde_json::from_str(&raw).map_err(ConfigError::BadCapabilities)?,
            Err(_) => Map::new(),
        };
        Ok(DriverConfig {
            webdriver_url,
            browser_binary,
            capabilities,
        })
    }
}
