//! Configuration for the netvar resolver
//!
//! This module provides:
//! - A serde config struct stored as TOML
//! - Auto-generation of a default config file
//! - Manual reload capability
//!
//! # Example
//!
//! ```ignore
//! use netvars_core::NetvarConfig;
//!
//! let config = NetvarConfig::load().unwrap_or_default();
//! println!("Base class sentinel: {}", config.baseclass_name);
//! ```

mod loader;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use loader::{base_dir, config_path, CONFIG_ENV_VAR, CONFIG_FILE_NAME};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Could not determine config directory from the executable location
    #[error("Config directory not available - could not resolve base path")]
    NoConfigDirectory,
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Resolver configuration.
///
/// Loaded from `netvars.toml` next to the executable, or from
/// `$NETVARS_CONFIG`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetvarConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Enable debug logging
    pub debug: bool,

    /// Property name the host uses for the base-class link
    pub baseclass_name: String,

    /// Store each nested table name once and share it between parents
    pub share_nested_tables: bool,

    /// Memoize successful path resolutions in the registry
    pub cache_resolutions: bool,
}

impl Default for NetvarConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            baseclass_name: netvars_host::BASECLASS_PROP_NAME.to_string(),
            share_nested_tables: false,
            cache_resolutions: true,
        }
    }
}

impl NetvarConfig {
    /// Load config from the default path, creating it if missing.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(config_path()?)
    }

    /// Load config from `path`, creating a default file if missing.
    pub fn load_from<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::debug!("Loaded netvar config from {:?}", path);
            Ok(config)
        } else {
            let default = Self::default();
            default.save_to(path)?;
            tracing::info!("Created default netvar config at {:?}", path);
            Ok(default)
        }
    }

    /// Save config to the default path.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(config_path()?)
    }

    /// Save config to `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved netvar config to {:?}", path);
        Ok(())
    }

    /// Reload config from the default path.
    pub fn reload(&mut self) -> ConfigResult<()> {
        let path = config_path()?;
        let content = std::fs::read_to_string(&path)?;
        *self = toml::from_str(&content)?;
        tracing::debug!("Reloaded netvar config from {:?}", path);
        Ok(())
    }
}
