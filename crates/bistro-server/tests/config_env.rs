use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use bistro_server::ServerConfig;

fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply_when_nothing_is_set() {
    let config = config_from(&[]).expect("defaults");

    assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    assert_eq!(config.query_timeout, Duration::from_secs(100));
    assert_eq!(config.seed_path, None);
}

#[test]
fn overrides_are_read() {
    let config = config_from(&[
        ("SERVER_HOST", "127.0.0.1"),
        ("SERVER_PORT", " 9000 "),
        ("QUERY_TIMEOUT_SECONDS", "5"),
        ("SEED_PATH", "config/seed/restaurant.json"),
    ])
    .expect("config");

    assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    assert_eq!(config.query_timeout, Duration::from_secs(5));
    assert_eq!(config.seed_path, Some(PathBuf::from("config/seed/restaurant.json")));
}

#[test]
fn blank_seed_path_means_empty_store() {
    let config = config_from(&[("SEED_PATH", "  ")]).expect("config");

    assert_eq!(config.seed_path, None);
}

#[test]
fn malformed_values_are_rejected() {
    let err = config_from(&[("SERVER_PORT", "eighty")]).unwrap_err();
    assert!(err.to_string().contains("SERVER_PORT"));

    assert!(config_from(&[("QUERY_TIMEOUT_SECONDS", "0")]).is_err());
    assert!(config_from(&[("QUERY_TIMEOUT_SECONDS", "-3")]).is_err());
}
