//! TOML file loading and profile lookup.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{DaemonProfile, RpcConfig};
use crate::validate::validate_config;

impl RpcConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, plus the
    /// parse and validation failures of [`Self::from_toml`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            operation: "read configuration file",
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        debug!(
            path = %path.display(),
            clients = config.clients.len(),
            "loaded rpc configuration"
        );
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and the typed
    /// validation errors of [`crate::validate::validate_config`].
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            source: Box::new(source),
        })?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Look up a connection profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownClient`] when no profile carries `name`.
    pub fn client(&self, name: &str) -> ConfigResult<&DaemonProfile> {
        self.clients
            .iter()
            .find(|profile| profile.name == name)
            .ok_or_else(|| ConfigError::UnknownClient {
                name: name.to_string(),
            })
    }
}
