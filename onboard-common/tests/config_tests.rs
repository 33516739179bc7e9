//! Unit tests for configuration resolution and graceful degradation
//!
//! Tests that manipulate ONBOARD_ROOT_FOLDER are marked with #[serial]
//! so they never race on the process environment.

use onboard_common::config::{
    load_toml_config, CompiledDefaults, ConfigOverrides, LoggingConfig, RootFolderInitializer,
    RootFolderResolver, RootFolderSource, ServiceConfig, TomlConfig, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_compiled_defaults_for_current_platform() {
    let defaults = CompiledDefaults::for_current_platform();

    assert!(!defaults.root_folder.as_os_str().is_empty());
    assert_eq!(defaults.bind_address, "127.0.0.1:3000");
    assert_eq!(defaults.log_level, "info");
    assert_eq!(defaults.max_upload_bytes, 25 * 1024 * 1024);
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let (root_folder, source) = RootFolderResolver::new().resolve();

    let defaults = CompiledDefaults::for_current_platform();
    assert_eq!(root_folder, defaults.root_folder);
    assert_eq!(source, RootFolderSource::CompiledDefault);
}

#[test]
#[serial]
fn test_resolver_env_var_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/onboard-test-env-folder");

    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/onboard-test-toml-folder")),
        ..TomlConfig::default()
    };
    let (root_folder, source) = RootFolderResolver::new().with_toml(&toml).resolve();

    assert_eq!(root_folder, PathBuf::from("/tmp/onboard-test-env-folder"));
    assert_eq!(source, RootFolderSource::Environment);

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_cli_arg_beats_env_var() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/onboard-test-env-folder");

    let (root_folder, source) = RootFolderResolver::new()
        .with_cli_arg(Some(PathBuf::from("/tmp/onboard-test-cli-folder")))
        .resolve();

    assert_eq!(root_folder, PathBuf::from("/tmp/onboard-test-cli-folder"));
    assert_eq!(source, RootFolderSource::CommandLine);

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_toml_used_when_env_missing() {
    env::remove_var(ROOT_FOLDER_ENV);

    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/srv/onboard")),
        ..TomlConfig::default()
    };
    let (root_folder, source) = RootFolderResolver::new().with_toml(&toml).resolve();

    assert_eq!(root_folder, PathBuf::from("/srv/onboard"));
    assert_eq!(source, RootFolderSource::ConfigFile);
}

#[test]
fn test_initializer_paths() {
    let root = PathBuf::from("/tmp/onboard-test-root");
    let initializer = RootFolderInitializer::new(root.clone());

    assert_eq!(initializer.database_path(), root.join("onboard.db"));
    assert_eq!(initializer.uploads_path(), root.join("uploads"));
}

#[test]
fn test_initializer_creates_uploads_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("fresh-root");
    let initializer = RootFolderInitializer::new(root.clone());

    assert!(!initializer.database_exists());
    initializer.ensure_directory_exists().unwrap();

    assert!(root.join("uploads").is_dir());
}

#[test]
fn test_toml_config_parses_all_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
root_folder = "/srv/onboard"
bind_address = "0.0.0.0:8080"
max_upload_bytes = 1048576

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/onboard")));
    assert_eq!(config.bind_address.as_deref(), Some("0.0.0.0:8080"));
    assert_eq!(config.max_upload_bytes, Some(1_048_576));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_toml_config_missing_logging_table_uses_default_level() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "bind_address = \"127.0.0.1:4000\"\n").unwrap();

    let config = load_toml_config(&path).unwrap();

    assert_eq!(config.logging, LoggingConfig::default());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_toml_config_invalid_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "bind_address = [unterminated").unwrap();

    let result = load_toml_config(&path);

    assert!(matches!(result, Err(onboard_common::Error::Config(_))));
}

#[test]
#[serial]
fn test_service_config_priority() {
    env::remove_var(ROOT_FOLDER_ENV);

    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/srv/onboard")),
        bind_address: Some("0.0.0.0:8080".to_string()),
        logging: LoggingConfig {
            level: "warn".to_string(),
        },
        max_upload_bytes: Some(1024),
    };
    let overrides = ConfigOverrides {
        root_folder: None,
        bind_address: Some("127.0.0.1:9000".to_string()),
        log_level: None,
    };

    let config = ServiceConfig::resolve(overrides, &toml);

    assert_eq!(config.root_folder, PathBuf::from("/srv/onboard"));
    assert_eq!(config.root_folder_source, RootFolderSource::ConfigFile);
    assert_eq!(config.bind_address, "127.0.0.1:9000");
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.max_upload_bytes, 1024);
}

#[test]
fn test_root_folder_source_display() {
    assert_eq!(RootFolderSource::CommandLine.to_string(), "command line");
    assert_eq!(RootFolderSource::Environment.to_string(), ROOT_FOLDER_ENV);
    assert_eq!(RootFolderSource::ConfigFile.to_string(), "config file");
    assert_eq!(RootFolderSource::CompiledDefault.to_string(), "compiled default");
}
