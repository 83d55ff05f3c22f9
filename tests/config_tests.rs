//! Realm configuration loaded from files

mod common;
use common::*;
use pretty_assertions::assert_eq;
use quicksilver_objects::config::{RealmConfig, ThrottleConfig};
use quicksilver_objects::{Error, Realm, Value};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"{
            "throttle": { "ticks_per_second": 250.5, "burst": 8, "max_ticks": 1000 },
            "max_fetch_entries": 64
        }"#,
    );
    let config = RealmConfig::from_file(file.path()).unwrap();
    assert_eq!(
        config,
        RealmConfig::default()
            .with_max_fetch_entries(64)
            .with_throttle(ThrottleConfig {
                ticks_per_second: 250.5,
                burst: 8,
                max_ticks: Some(1000),
            })
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RealmConfig::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::IoError { .. }));
}

#[test]
fn test_malformed_file_is_config_error() {
    let file = write_config("{ not json");
    assert!(matches!(
        RealmConfig::from_file(file.path()),
        Err(Error::ConfigError(_))
    ));
}

#[test]
fn test_serialized_config_round_trips() {
    let config = RealmConfig::default().with_throttle(ThrottleConfig {
        ticks_per_second: 10.0,
        burst: 2,
        max_ticks: None,
    });
    let file = write_config(&serde_json::to_string_pretty(&config).unwrap());
    assert_eq!(RealmConfig::from_file(file.path()).unwrap(), config);
}

#[test]
fn test_fetch_limit_applies_to_from_entries() {
    let file = write_config(r#"{ "max_fetch_entries": 2 }"#);
    let realm = Realm::with_config(RealmConfig::from_file(file.path()).unwrap()).unwrap();
    let pair = |k: &str| Value::Object(realm.new_array(vec![Value::from(k), Value::Null]));

    let fits = Value::Object(realm.new_array(vec![pair("a"), pair("b")]));
    assert!(object_call(&realm, "fromEntries", &[fits]).is_ok());

    let too_long = Value::Object(realm.new_array(vec![pair("a"), pair("b"), pair("c")]));
    let err = object_call(&realm, "fromEntries", &[too_long]).unwrap_err();
    assert_eq!(err.kind(), Some(quicksilver_objects::ErrorKind::RangeError));
}

#[test]
fn test_invalid_config_rejected_by_realm() {
    let config = RealmConfig::default().with_max_fetch_entries(0);
    assert!(matches!(Realm::with_config(config), Err(Error::ConfigError(_))));
}
