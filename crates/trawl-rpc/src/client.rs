//! Public client and the single token-rotation retry.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use trawl_config::DaemonProfile;

use crate::error::{RpcError, RpcResult};
use crate::payload::TagSource;
use crate::session::SessionStore;
use crate::transport::{Outcome, Transport};

/// RPC client bound to one daemon endpoint.
///
/// Invoke named remote methods with [`RpcClient::call`]; the client manages
/// the daemon's rotating anti-forgery token internally, so callers never see
/// an HTTP 409.
#[derive(Debug)]
pub struct RpcClient {
    transport: Transport,
    tags: TagSource,
}

impl RpcClient {
    /// Build a client from a connection profile.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Configuration`] when the endpoint scheme is not
    /// http/https, the user agent is not a valid header value, or the HTTP
    /// client cannot be constructed.
    pub fn new(profile: &DaemonProfile) -> RpcResult<Self> {
        if !matches!(profile.url.scheme(), "http" | "https") {
            return Err(RpcError::Configuration {
                reason: format!("unsupported endpoint scheme '{}'", profile.url.scheme()),
            });
        }
        let user_agent =
            HeaderValue::from_str(&profile.user_agent).map_err(|_| RpcError::Configuration {
                reason: "user agent contains invalid header characters".to_string(),
            })?;
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, user_agent);

        let http = Client::builder()
            .timeout(Duration::from_secs(profile.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|err| RpcError::Configuration {
                reason: format!("failed to build HTTP client: {err}"),
            })?;

        Ok(Self {
            transport: Transport {
                http,
                url: profile.url.clone(),
                username: profile.username.clone(),
                password: profile.password.clone(),
                debug: profile.debug,
                session: SessionStore::default(),
            },
            tags: TagSource::Random,
        })
    }

    /// Call a named remote method and decode the response arguments into `R`.
    ///
    /// Each attempt carries a fresh correlation tag; the decoded response must
    /// echo that tag and report the success marker. When the daemon rotates
    /// its session token the call is transparently re-issued exactly once with
    /// the new token.
    ///
    /// # Errors
    ///
    /// Terminal failures surface as the matching [`RpcError`] variant carrying
    /// the method name; a second consecutive token rejection is
    /// [`RpcError::SessionRejected`].
    pub async fn call<A, R>(&self, method: &str, arguments: Option<A>) -> RpcResult<R>
    where
        A: Serialize + Send + Sync + 'static,
        R: DeserializeOwned,
    {
        // Both attempts serialize from the same shared arguments.
        let arguments = arguments.map(Arc::new);
        match self
            .transport
            .exchange(method, arguments.clone(), self.tags.next())
            .await?
        {
            Outcome::Success(value) => Ok(value),
            Outcome::TokenExpired => {
                debug!(method, "daemon rotated the session token; retrying once");
                match self
                    .transport
                    .exchange(method, arguments, self.tags.next())
                    .await?
                {
                    Outcome::Success(value) => Ok(value),
                    Outcome::TokenExpired => Err(RpcError::SessionRejected {
                        method: method.to_string(),
                    }),
                }
            }
        }
    }
}
