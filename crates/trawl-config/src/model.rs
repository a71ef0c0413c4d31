//! Typed connection-profile models and their defaults.

use serde::Deserialize;
use url::Url;

/// Default user agent presented to daemons, derived from the crate version.
pub const DEFAULT_USER_AGENT: &str = concat!("trawl/", env!("CARGO_PKG_VERSION"));

/// Default per-exchange timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration: the set of daemon connection profiles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcConfig {
    /// Daemon connection profiles, keyed by their `name` field.
    #[serde(default)]
    pub clients: Vec<DaemonProfile>,
}

/// Connection profile for a single torrent-client daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonProfile {
    /// Unique profile name used for lookup.
    pub name: String,
    /// RPC endpoint URL, e.g. `http://127.0.0.1:9091/transmission/rpc`.
    pub url: Url,
    /// Basic-auth username; empty when the daemon is unauthenticated.
    #[serde(default)]
    pub username: String,
    /// Basic-auth password.
    #[serde(default)]
    pub password: String,
    /// User agent presented on every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-exchange timeout in seconds, covering connect, send, and body read.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Emit raw response bodies to the debug log.
    #[serde(default)]
    pub debug: bool,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_defaults_apply() {
        let profile: DaemonProfile = toml::from_str(
            r#"
            name = "local"
            url = "http://127.0.0.1:9091/transmission/rpc"
            "#,
        )
        .expect("minimal profile should deserialize");

        assert_eq!(profile.name, "local");
        assert_eq!(profile.username, "");
        assert_eq!(profile.password, "");
        assert_eq!(profile.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(profile.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(!profile.debug);
    }

    #[test]
    fn invalid_url_is_rejected_at_parse_time() {
        let result: Result<DaemonProfile, _> = toml::from_str(
            r#"
            name = "broken"
            url = "not a url"
            "#,
        );
        assert!(result.is_err());
    }
}
