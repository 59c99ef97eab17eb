//! Platform-specific configuration paths.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/filtergen/` (Linux), `~/Library/Application Support/filtergen/` (macOS), `%APPDATA%\filtergen\` (Windows)
//!
//! # Example
//!
//! ```rust,no_run
//! use filtergen_config::paths;
//!
//! if let Some(path) = paths::find_config() {
//!     println!("Using config at: {:?}", path);
//! }
//! ```

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "filtergen";

/// File name of the generator configuration.
pub const CONFIG_FILE_NAME: &str = "filtergen.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the default location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Finds a configuration file.
///
/// Searches in the following order:
/// 1. `filtergen.toml` in the current directory
/// 2. The user configuration file
pub fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = default_config_path();
    if user.is_file() {
        return Some(user);
    }

    None
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}
