//! Config path resolution
//!
//! The config lives next to the module that loaded the resolver, unless the
//! `NETVARS_CONFIG` environment variable points elsewhere.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "NETVARS_CONFIG";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "netvars.toml";

/// Returns the directory containing the running executable.
pub fn base_dir() -> ConfigResult<PathBuf> {
    let exe = std::env::current_exe().map_err(ConfigError::IoError)?;

    exe.parent()
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the config file path.
///
/// Path: `$NETVARS_CONFIG` if set, otherwise `{base_dir}/netvars.toml`
pub fn config_path() -> ConfigResult<PathBuf> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(base_dir()?.join(CONFIG_FILE_NAME)),
    }
}
