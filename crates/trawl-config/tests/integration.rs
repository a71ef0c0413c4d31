use std::io::Write;

use tempfile::NamedTempFile;
use trawl_config::{ConfigError, DaemonProfile, RpcConfig};

fn write_config(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn loads_profiles_with_defaults() -> anyhow::Result<()> {
    let file = write_config(
        r#"
        [[clients]]
        name = "local"
        url = "http://127.0.0.1:9091/transmission/rpc"
        username = "admin"
        password = "hunter2"

        [[clients]]
        name = "seedbox"
        url = "https://seedbox.example.org/transmission/rpc"
        timeout_secs = 120
        debug = true
        "#,
    )?;

    let config = RpcConfig::load(file.path())?;
    assert_eq!(config.clients.len(), 2);

    let local: &DaemonProfile = config.client("local")?;
    assert_eq!(local.username, "admin");
    assert_eq!(local.password, "hunter2");
    assert_eq!(local.timeout_secs, 30);
    assert!(!local.debug);
    assert!(local.user_agent.starts_with("trawl/"));

    let seedbox = config.client("seedbox")?;
    assert_eq!(seedbox.url.scheme(), "https");
    assert_eq!(seedbox.timeout_secs, 120);
    assert!(seedbox.debug);
    Ok(())
}

#[test]
fn unknown_client_lookup_fails() -> anyhow::Result<()> {
    let file = write_config(
        r#"
        [[clients]]
        name = "local"
        url = "http://127.0.0.1:9091/transmission/rpc"
        "#,
    )?;

    let config = RpcConfig::load(file.path())?;
    let err = config
        .client("missing")
        .expect_err("lookup of an unknown profile should fail");
    assert!(matches!(err, ConfigError::UnknownClient { name } if name == "missing"));
    Ok(())
}

#[test]
fn duplicate_names_are_rejected_at_load() -> anyhow::Result<()> {
    let file = write_config(
        r#"
        [[clients]]
        name = "local"
        url = "http://127.0.0.1:9091/transmission/rpc"

        [[clients]]
        name = "local"
        url = "http://127.0.0.1:9092/transmission/rpc"
        "#,
    )?;

    let err = RpcConfig::load(file.path()).expect_err("duplicate profile names should fail");
    assert!(matches!(err, ConfigError::DuplicateClient { name } if name == "local"));
    Ok(())
}

#[test]
fn malformed_toml_is_a_parse_error() -> anyhow::Result<()> {
    let file = write_config("clients = 12")?;
    let err = RpcConfig::load(file.path()).expect_err("malformed file should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let err = RpcConfig::load(std::path::Path::new("/nonexistent/trawl.toml"))
        .expect_err("missing file should fail");
    assert!(matches!(err, ConfigError::Io { .. }));
}
