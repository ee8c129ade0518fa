use std::fs;
use std::io::Write;

use tempfile::tempdir;

use crate::config::EventSinkKind;
use crate::config::RegistrySettings;
use crate::config::StorageBackend;

#[test]
fn test_default_settings() {
    let settings = RegistrySettings::default();

    assert_eq!(settings.storage.backend, StorageBackend::InMemory);
    assert!(settings.storage.thread_safe);
    assert!(!settings.storage.clone_on_access);
    assert_eq!(settings.events.sink, EventSinkKind::Log);
    assert_eq!(settings.events.broker_channel_capacity, 1024);
    assert_eq!(settings.pagination.default_limit, 100);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_load_from_toml_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("registry.toml");
    let mut file = fs::File::create(&path).expect("create config file");
    writeln!(
        file,
        r#"
[storage]
backend = "in-memory"
thread_safe = false
clone_on_access = true

[events]
sink = "broker"
broker_channel_capacity = 8

[pagination]
default_limit = 25
"#
    )
    .expect("write config file");

    let settings =
        RegistrySettings::load(path.to_str()).expect("load settings from file");

    assert!(!settings.storage.thread_safe);
    assert!(settings.storage.clone_on_access);
    assert_eq!(settings.events.sink, EventSinkKind::Broker);
    assert_eq!(settings.events.broker_channel_capacity, 8);
    assert_eq!(settings.pagination.default_limit, 25);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("registry.toml");
    fs::write(&path, "[pagination]\ndefault_limit = 7\n").expect("write config file");

    let settings =
        RegistrySettings::load(path.to_str()).expect("load settings from file");

    assert_eq!(settings.pagination.default_limit, 7);
    assert!(settings.storage.thread_safe);
    assert_eq!(settings.events.sink, EventSinkKind::Log);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = RegistrySettings::load(Some("/nonexistent/registry.toml"));
    assert!(result.is_err());
}

#[test]
fn test_zero_broker_capacity_rejected() {
    let mut settings = RegistrySettings::default();
    settings.events.sink = EventSinkKind::Broker;
    settings.events.broker_channel_capacity = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn test_zero_broker_capacity_allowed_when_sink_is_log() {
    let mut settings = RegistrySettings::default();
    settings.events.broker_channel_capacity = 0;

    assert!(settings.validate().is_ok());
}

#[test]
fn test_zero_default_limit_rejected() {
    let mut settings = RegistrySettings::default();
    settings.pagination.default_limit = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn test_default_page_uses_configured_limit() {
    let mut settings = RegistrySettings::default();
    settings.pagination.default_limit = 3;

    let page = settings.pagination.default_page();
    assert_eq!(page.limit, Some(3));
    assert!(page.cursor.is_none());
}
