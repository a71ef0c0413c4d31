//! Validation helpers for connection profiles.

use std::collections::HashSet;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{DaemonProfile, RpcConfig};

/// Validate a full configuration: every profile is valid and names are unique.
///
/// # Errors
///
/// Returns the first [`ConfigError`] encountered, in declaration order.
pub fn validate_config(config: &RpcConfig) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for profile in &config.clients {
        validate_profile(profile)?;
        if !seen.insert(profile.name.as_str()) {
            return Err(ConfigError::DuplicateClient {
                name: profile.name.clone(),
            });
        }
    }
    Ok(())
}

/// Validate a single connection profile.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] naming the offending field.
pub fn validate_profile(profile: &DaemonProfile) -> ConfigResult<()> {
    if profile.name.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            field: "name".to_string(),
            value: Some(profile.name.clone()),
            reason: "profile name must not be empty",
        });
    }
    if !matches!(profile.url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidField {
            field: "url".to_string(),
            value: Some(profile.url.to_string()),
            reason: "endpoint scheme must be http or https",
        });
    }
    if profile.timeout_secs == 0 {
        return Err(ConfigError::InvalidField {
            field: "timeout_secs".to_string(),
            value: Some(profile.timeout_secs.to_string()),
            reason: "timeout must be at least one second",
        });
    }
    if profile.user_agent.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            field: "user_agent".to_string(),
            value: Some(profile.user_agent.clone()),
            reason: "user agent must not be empty",
        });
    }
    if profile.username.is_empty() && !profile.password.is_empty() {
        return Err(ConfigError::InvalidField {
            field: "username".to_string(),
            value: None,
            reason: "password was provided without a username",
        });
    }
    Ok(())
}
