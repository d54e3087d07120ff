//! Harness server settings.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use crate::error::{HarnessError, Result};

/// Session fixture served by the namespace endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// User id the fixture session reports.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Namespace mappings the fixture session exposes.
    #[serde(default = "default_namespaces")]
    pub namespaces: HashMap<String, String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            namespaces: default_namespaces(),
        }
    }
}

/// Settings for the harness server binary.
///
/// Loaded with standard precedence: serde defaults, then an optional
/// settings file, then `HARNESS`-prefixed environment variables with `__`
/// separating nested keys (`HARNESS_SESSION__USER_ID` sets
/// `session.user_id`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Interface the server binds to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port the server binds to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Session fixture configuration.
    #[serde(default)]
    pub session: SessionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session: SessionSettings::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_user_id() -> String {
    "admin".to_string()
}

fn default_namespaces() -> HashMap<String, String> {
    HashMap::from([
        (
            "jcr".to_string(),
            "http://www.jcp.org/jcr/1.0".to_string(),
        ),
        (
            "sling".to_string(),
            "http://sling.apache.org/jcr/sling/1.0".to_string(),
        ),
    ])
}

impl Settings {
    /// Load settings from an optional file plus environment overrides.
    ///
    /// The file format is detected from the extension (YAML, TOML, or JSON).
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Settings`] when a source cannot be read or the
    /// merged values do not deserialize.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("HARNESS").separator("__"),
        );

        builder
            .build()
            .map_err(|e| HarnessError::Settings(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HarnessError::Settings(e.to_string()))
    }

    /// Socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Settings`] when `host:port` is not a valid
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| HarnessError::Settings(format!("invalid bind address: {e}")))
    }
}
