use std::collections::HashMap;
use std::io::Write;

use bastion::config::{Config, DEFAULT_ADMIN_PASSWORD};

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.max_request_bytes, 4096);
    assert_eq!(cfg.sessions.capacity, 100);
    assert_eq!(cfg.sessions.timeout_secs, 3600);
    assert_eq!(cfg.admin.username, "admin");
    assert!(cfg.uses_default_password());
    assert_eq!(cfg.logging.filter, "info");
    cfg.validate().unwrap();
}

#[test]
fn test_config_listen_override() {
    let mut cfg = Config::default();
    cfg.apply_overrides(env(&[("LISTEN", "0.0.0.0:3000")])).unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
}

#[test]
fn test_config_session_and_admin_overrides() {
    let mut cfg = Config::default();
    cfg.apply_overrides(env(&[
        ("SESSION_CAPACITY", "5"),
        ("SESSION_TIMEOUT_SECS", "60"),
        ("ADMIN_USERNAME", "root"),
        ("ADMIN_PASSWORD", "hunter2"),
    ]))
    .unwrap();

    assert_eq!(cfg.sessions.capacity, 5);
    assert_eq!(cfg.sessions.timeout_secs, 60);
    assert_eq!(cfg.admin.username, "root");
    assert_eq!(cfg.admin.password, "hunter2");
    assert!(!cfg.uses_default_password());
}

#[test]
fn test_config_rejects_non_numeric_capacity() {
    let mut cfg = Config::default();
    let err = cfg
        .apply_overrides(env(&[("SESSION_CAPACITY", "many")]))
        .unwrap_err();

    assert!(err.to_string().contains("SESSION_CAPACITY"));
}

#[test]
fn test_config_validate_rejects_zero_capacity() {
    let mut cfg = Config::default();
    cfg.sessions.capacity = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_validate_rejects_empty_username() {
    let mut cfg = Config::default();
    cfg.admin.username.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml("sessions:\n  capacity: 7\n").unwrap();

    assert_eq!(cfg.sessions.capacity, 7);
    assert_eq!(cfg.sessions.timeout_secs, 3600);
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "server:\n  listen_addr: \"0.0.0.0:9000\"\nadmin:\n  username: ops\n  password: s3cret\nlogging:\n  filter: debug"
    )
    .unwrap();

    let cfg = Config::from_file(file.path()).unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:9000");
    assert_eq!(cfg.admin.username, "ops");
    assert_eq!(cfg.admin.password, "s3cret");
    assert_eq!(cfg.logging.filter, "debug");
}

#[test]
fn test_config_missing_file_is_an_error() {
    let err = Config::from_file("/nonexistent/bastion.yaml").unwrap_err();
    assert!(err.to_string().contains("reading config file"));
}

#[test]
fn test_config_debug_redacts_password() {
    let cfg = Config::default();
    let debug = format!("{:?}", cfg.admin);

    assert!(!debug.contains(DEFAULT_ADMIN_PASSWORD));
    assert!(debug.contains("redacted"));
}
