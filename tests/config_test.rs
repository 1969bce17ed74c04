//! Configuration loading from files and the environment

use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

use trendboard::config::{Config, PipelineMode};

const ENV_KEYS: &[&str] = &[
    "TRENDBOARD_BIND_ADDRESS",
    "TRENDBOARD_MODE",
    "TRENDBOARD_PROVIDER_URL",
    "TRENDBOARD_GEO",
    "TRENDBOARD_TOP_N",
    "TRENDBOARD_SEED",
    "TRENDBOARD_REQUEST_TIMEOUT",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

#[test]
fn test_load_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
bind_address = "127.0.0.1:8080"

[provider]
base_url = "http://trends.internal:9000"
geo = "SG"

[pipeline]
mode = "mock"
top_n = 5
seed = 99
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.server.bind_address.port(), 8080);
    assert!(config.server.enable_cors);
    assert_eq!(config.provider.geo, "SG");
    assert_eq!(config.provider.language, "id-ID");
    assert_eq!(config.pipeline.mode, PipelineMode::Mock);
    assert_eq!(config.pipeline.top_n, 5);
    assert_eq!(config.pipeline.seed, Some(99));
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::from_file(&dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_malformed_toml_is_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[pipeline\nmode = ").unwrap();
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
#[serial]
fn test_env_defaults() {
    clear_env();
    let config = Config::from_env().unwrap();

    assert_eq!(config.server.bind_address.port(), 5000);
    assert_eq!(config.pipeline.mode, PipelineMode::Live);
    assert_eq!(config.pipeline.top_n, 20);
    assert_eq!(config.provider.geo, "ID");
    assert_eq!(config.provider.tz_offset_minutes, 420);
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_env();
    std::env::set_var("TRENDBOARD_MODE", "MOCK");
    std::env::set_var("TRENDBOARD_BIND_ADDRESS", "127.0.0.1:6000");
    std::env::set_var("TRENDBOARD_TOP_N", "7");
    std::env::set_var("TRENDBOARD_SEED", "3");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.pipeline.mode, PipelineMode::Mock);
    assert_eq!(config.server.bind_address.port(), 6000);
    assert_eq!(config.pipeline.top_n, 7);
    assert_eq!(config.pipeline.seed, Some(3));
}

#[test]
#[serial]
fn test_env_rejects_unknown_mode() {
    clear_env();
    std::env::set_var("TRENDBOARD_MODE", "staging");
    let result = Config::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_env_rejects_bad_bind_address() {
    clear_env();
    std::env::set_var("TRENDBOARD_BIND_ADDRESS", "not-an-address");
    let result = Config::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
fn test_validate_live_requires_parseable_url() {
    let mut config = Config::default();
    config.provider.base_url = "no scheme here".to_string();
    assert!(config.validate().is_err());

    config.pipeline.mode = PipelineMode::Mock;
    assert!(config.validate().is_ok());
}
