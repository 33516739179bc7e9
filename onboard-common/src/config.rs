//! Configuration loading and root folder resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or unreadable TOML file never aborts startup; a warning is
//! logged and the remaining tiers apply.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "ONBOARD_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "onboard.db";

/// Uploads directory name inside the root folder
pub const UPLOADS_DIR: &str = "uploads";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Compiled-in defaults, the last resolution tier
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub bind_address: String,
    pub log_level: String,
    pub max_upload_bytes: usize,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// `[logging]` table of the TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Contents of `config.toml`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub bind_address: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub max_upload_bytes: Option<usize>,
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// First existing config file: `~/.config/onboard/config.toml`, then
/// `/etc/onboard/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("onboard").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    let system_config = PathBuf::from("/etc/onboard/config.toml");
    if cfg!(unix) && system_config.exists() {
        return Some(system_config);
    }

    None
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("onboard"))
        .unwrap_or_else(|| PathBuf::from("./onboard_data"))
}

/// Which tier supplied the root folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFolderSource {
    CommandLine,
    Environment,
    ConfigFile,
    CompiledDefault,
}

impl fmt::Display for RootFolderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootFolderSource::CommandLine => f.write_str("command line"),
            RootFolderSource::Environment => f.write_str(ROOT_FOLDER_ENV),
            RootFolderSource::ConfigFile => f.write_str("config file"),
            RootFolderSource::CompiledDefault => f.write_str("compiled default"),
        }
    }
}

/// Resolves the root folder holding the database and uploads
///
/// Runs before logging is set up, so it reports the winning tier instead
/// of logging it.
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_value: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new() -> Self {
        Self {
            cli_arg: None,
            toml_value: None,
        }
    }

    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    pub fn with_toml(mut self, config: &TomlConfig) -> Self {
        self.toml_value = config.root_folder.clone();
        self
    }

    pub fn resolve(&self) -> (PathBuf, RootFolderSource) {
        if let Some(path) = &self.cli_arg {
            return (path.clone(), RootFolderSource::CommandLine);
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return (PathBuf::from(path), RootFolderSource::Environment);
            }
        }

        if let Some(path) = &self.toml_value {
            return (path.clone(), RootFolderSource::ConfigFile);
        }

        (
            CompiledDefaults::for_current_platform().root_folder,
            RootFolderSource::CompiledDefault,
        )
    }
}

impl Default for RootFolderResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the root folder layout on first run
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder and its uploads directory if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            info!("Creating root folder: {}", self.root_folder.display());
        }
        std::fs::create_dir_all(self.uploads_path())?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    pub fn uploads_path(&self) -> PathBuf {
        self.root_folder.join(UPLOADS_DIR)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_folder: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub root_folder_source: RootFolderSource,
    pub bind_address: String,
    pub log_level: String,
    pub max_upload_bytes: usize,
}

impl ServiceConfig {
    pub fn resolve(overrides: ConfigOverrides, toml: &TomlConfig) -> Self {
        let defaults = CompiledDefaults::for_current_platform();

        let (root_folder, root_folder_source) = RootFolderResolver::new()
            .with_cli_arg(overrides.root_folder)
            .with_toml(toml)
            .resolve();

        let bind_address = overrides
            .bind_address
            .or_else(|| toml.bind_address.clone())
            .unwrap_or(defaults.bind_address);

        // logging.level already carries the compiled default when unset
        let log_level = overrides
            .log_level
            .unwrap_or_else(|| toml.logging.level.clone());

        let max_upload_bytes = toml.max_upload_bytes.unwrap_or(defaults.max_upload_bytes);

        Self {
            root_folder,
            root_folder_source,
            bind_address,
            log_level,
            max_upload_bytes,
        }
    }
}
