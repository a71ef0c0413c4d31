#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! RPC transport for Transmission-compatible torrent daemons.
//!
//! One logical call per invocation: the client POSTs a JSON envelope to the
//! daemon, streaming serialization concurrently with the network write, and
//! transparently re-issues the call once when the daemon rotates its
//! anti-forgery session token (HTTP 409).
//!
//! Layout:
//! - `session.rs`: rotating anti-forgery token store
//! - `payload.rs`: request/response envelopes and correlation tags
//! - `transport.rs`: the streaming HTTP exchange
//! - `client.rs`: public client and the single token-rotation retry
//! - `error.rs`: error taxonomy

mod client;
mod error;
mod payload;
mod session;
mod transport;

pub use client::RpcClient;
pub use error::{ProtocolViolation, RpcError, RpcResult};
