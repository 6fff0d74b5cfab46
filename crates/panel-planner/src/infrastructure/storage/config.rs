//! TOML-based configuration persistence for the planner.
//!
//! Reads and writes [`PlannerConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\Panelboard\config.toml`
//! - Linux:    `~/.config/panelboard/config.toml`
//! - macOS:    `~/Library/Application Support/Panelboard/config.toml`
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, so the planner
//! works on first run (before a config file exists) and when upgrading from
//! an older config file that is missing newer fields.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level planner configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerConfig {
    #[serde(default)]
    pub planner: GeneralConfig,
    #[serde(default)]
    pub board: BoardDefaults,
    #[serde(default)]
    pub compartment: CompartmentDefaults,
}

/// General planner behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Enclosure dimensions used when a new board is created without explicit
/// sizing, in millimetres.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardDefaults {
    #[serde(default = "default_board_name")]
    pub name: String,
    #[serde(default = "default_board_width")]
    pub width: f64,
    #[serde(default = "default_board_height")]
    pub height: f64,
    #[serde(default = "default_depth")]
    pub depth: f64,
}

/// Dimensions used when a compartment request omits an axis, in millimetres.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompartmentDefaults {
    #[serde(default = "default_compartment_width")]
    pub width: f64,
    #[serde(default = "default_compartment_height")]
    pub height: f64,
    #[serde(default = "default_depth")]
    pub depth: f64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_board_name() -> String {
    "Board".to_string()
}
fn default_board_width() -> f64 {
    525.0
}
fn default_board_height() -> f64 {
    950.0
}
fn default_compartment_width() -> f64 {
    175.0
}
fn default_compartment_height() -> f64 {
    300.0
}
fn default_depth() -> f64 {
    210.0
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            planner: GeneralConfig::default(),
            board: BoardDefaults::default(),
            compartment: CompartmentDefaults::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for BoardDefaults {
    fn default() -> Self {
        Self {
            name: default_board_name(),
            width: default_board_width(),
            height: default_board_height(),
            depth: default_depth(),
        }
    }
}

impl Default for CompartmentDefaults {
    fn default() -> Self {
        Self {
            width: default_compartment_width(),
            height: default_compartment_height(),
            depth: default_depth(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads [`PlannerConfig`] from disk, returning `PlannerConfig::default()` if
/// the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<PlannerConfig, ConfigError> {
    let path = config_file_path()?;

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cfg: PlannerConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PlannerConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Persists `config` to disk.
///
/// Creates the config directory and file if they do not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &PlannerConfig) -> Result<(), ConfigError> {
    let path = config_file_path()?;

    // Ensure directory exists before writing.
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Panelboard"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("panelboard"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/Panelboard
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Panelboard")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
