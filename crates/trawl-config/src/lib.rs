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

//! Connection-profile configuration for torrent daemon RPC clients.
//!
//! Layout: `model.rs` (typed profile models and defaults), `validate.rs`
//! (validation helpers), `loader.rs` (TOML file loading and lookup).

pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{DaemonProfile, RpcConfig};
