#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn ConfigLayer___with___sets_properties() {
    let layer = ConfigLayer::new()
        .with("platform.clean", "true")
        .with("platform.application", "viewer");

    assert_eq!(layer.len(), 2);
    assert_eq!(layer.get("platform.application"), Some("viewer"));
}

#[test]
fn ConfigLayer___from_toml_str___flattens_nested_tables() {
    let toml = r#"
        [application]
        name = "workbench"

        [platform]
        plugin_dirs = "a;b"
        clean = true
    "#;

    let layer = ConfigLayer::from_toml_str(toml).unwrap();

    assert_eq!(layer.get("application.name"), Some("workbench"));
    assert_eq!(layer.get("platform.plugin_dirs"), Some("a;b"));
    assert_eq!(layer.get("platform.clean"), Some("true"));
}

#[test]
fn ConfigLayer___from_toml_str___joins_arrays_with_semicolons() {
    let toml = r#"platform = { plugin_dirs = ["/opt/a", "/opt/b"] }"#;

    let layer = ConfigLayer::from_toml_str(toml).unwrap();

    assert_eq!(layer.get("platform.plugin_dirs"), Some("/opt/a;/opt/b"));
}

#[test]
fn ConfigLayer___from_toml_str___invalid_returns_config_error() {
    let result = ConfigLayer::from_toml_str("[platform\nclean = ");

    assert!(matches!(result, Err(BrambleError::ConfigError(_))));
}

#[test]
fn ConfigLayer___from_toml_file___missing_file_returns_none() {
    let temp = TempDir::new().unwrap();

    let layer = ConfigLayer::from_toml_file(&temp.path().join("absent.toml")).unwrap();

    assert!(layer.is_none());
}

#[test]
fn ConfigLayer___from_toml_file___reads_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("app.toml");
    fs::write(&path, "[platform]\nlog_level = \"debug\"\n").unwrap();

    let layer = ConfigLayer::from_toml_file(&path).unwrap().unwrap();

    assert_eq!(layer.get("platform.log_level"), Some("debug"));
}

#[test]
fn LayeredConfig___lower_priority_number___wins() {
    let mut config = LayeredConfig::new();
    config.add(ConfigLayer::new().with("key", "overlay"), priority::OVERLAY);
    config.add(ConfigLayer::new().with("key", "file"), priority::FILE);
    config.add(ConfigLayer::new().with("key", "cli"), priority::COMMAND_LINE);

    assert_eq!(config.get_string("key"), Some("cli".to_string()));
}

#[test]
fn LayeredConfig___missing_in_first_layer___falls_through() {
    let mut config = LayeredConfig::new();
    config.add(ConfigLayer::new().with("a", "1"), priority::FILE);
    config.add(ConfigLayer::new().with("b", "2"), priority::DEFAULTS);

    assert_eq!(config.get_string("b"), Some("2".to_string()));
}

#[test]
fn LayeredConfig___missing_key___returns_none() {
    let config = LayeredConfig::new();

    assert_eq!(config.get_string("platform.home"), None);
    assert!(!config.has_property("platform.home"));
}

#[test]
fn LayeredConfig___get_string_or___uses_default() {
    let config = LayeredConfig::new();

    assert_eq!(config.get_string_or("platform.log_level", "info"), "info");
}

#[test]
fn LayeredConfig___layer_mut___creates_layer_once() {
    let mut config = LayeredConfig::new();

    config.layer_mut(priority::COMMAND_LINE).set("x", "1");
    config.layer_mut(priority::COMMAND_LINE).set("y", "2");

    assert_eq!(config.layer_count(), 1);
    assert_eq!(config.get_string("y"), Some("2".to_string()));
}

#[test]
fn LayeredConfig___get_list___splits_and_trims() {
    let mut config = LayeredConfig::new();
    config.add(
        ConfigLayer::new().with("platform.plugin_dirs", " A ;; B;"),
        priority::FILE,
    );

    assert_eq!(config.get_list("platform.plugin_dirs"), vec!["A", "B"]);
}

#[test]
fn LayeredConfig___get_path___blank_value_is_none() {
    let mut config = LayeredConfig::new();
    config.add(ConfigLayer::new().with("platform.home", "  "), priority::FILE);

    assert_eq!(config.get_path("platform.home"), None);
}

#[test]
fn LayeredConfig___get_parsed___parses_numbers() {
    let mut config = LayeredConfig::new();
    config.add(ConfigLayer::new().with("n", " 42 "), priority::FILE);

    assert_eq!(config.get_parsed::<u32>("n"), Some(42));
    assert_eq!(config.get_parsed::<u32>("missing"), None);
}
