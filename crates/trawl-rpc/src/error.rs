//! Error types for RPC calls.
//!
//! Every variant that can occur after a method name is known carries that
//! name; nothing below is retried beyond the client's single token-rotation
//! retry, and no failure is silently dropped.

use thiserror::Error;

/// Primary error type for RPC operations.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Client could not be built from the supplied profile.
    #[error("invalid rpc client configuration: {reason}")]
    Configuration {
        /// Human-readable description of the invalid setting.
        reason: String,
    },
    /// Request arguments could not be serialized.
    #[error("failed to encode request payload for '{method}'")]
    Encode {
        /// Remote method the call was for.
        method: String,
        /// Source serialization error.
        #[source]
        source: serde_json::Error,
    },
    /// Underlying HTTP exchange failed (DNS, connect, TLS, timeout, abort).
    #[error("request for '{method}' failed")]
    Network {
        /// Remote method the call was for.
        method: String,
        /// Source transport error.
        #[source]
        source: reqwest::Error,
    },
    /// Daemon rejected the session token on two consecutive attempts.
    #[error("session token invalid twice in a row for '{method}': aborting")]
    SessionRejected {
        /// Remote method the call was for.
        method: String,
    },
    /// Daemon answered with a status other than 200 or 409.
    #[error("HTTP error {code} ({phrase}) for '{method}'")]
    HttpStatus {
        /// Remote method the call was for.
        method: String,
        /// Numeric HTTP status code.
        code: u16,
        /// Canonical reason phrase when one is known.
        phrase: &'static str,
    },
    /// Response body was not a well-formed envelope.
    #[error("failed to decode response for '{method}'")]
    Decode {
        /// Remote method the call was for.
        method: String,
        /// Source deserialization error.
        #[source]
        source: serde_json::Error,
    },
    /// Envelope decoded but failed correlation or status validation.
    #[error("protocol violation for '{method}': {violation}")]
    Protocol {
        /// Remote method the call was for.
        method: String,
        /// The validation check that failed.
        violation: ProtocolViolation,
    },
}

/// Post-decode validation failure, naming the check that did not hold.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// Response payload does not carry a correlation tag.
    #[error("response payload does not carry a tag")]
    MissingTag,
    /// Response tag does not answer the request that produced it.
    #[error("response tag {actual} does not match request tag {expected}")]
    TagMismatch {
        /// Tag sent with the request.
        expected: i64,
        /// Tag found in the response.
        actual: i64,
    },
    /// Daemon reported a non-success result string.
    #[error("daemon reported failure: {result}")]
    Failure {
        /// The verbatim `result` field of the response.
        result: String,
    },
}

/// Convenience alias for RPC results.
pub type RpcResult<T> = Result<T, RpcError>;
