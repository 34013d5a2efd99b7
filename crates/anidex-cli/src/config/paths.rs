//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory under the XDG config home.
const APP_DIR: &str = "anidex";

/// Resolves the config file path.
///
/// - `{dir}/config.toml` when `dir` is given.
/// - `$XDG_CONFIG_HOME/anidex/config.toml` when that variable is set and non-empty.
/// - `$HOME/.config/anidex/config.toml` otherwise.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    default_config_path(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

/// Picks the default path from the XDG config home or the home directory.
fn default_config_path(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Result<PathBuf> {
    let base = match (xdg_config_home, home) {
        (Some(xdg), _) if xdg.is_absolute() => xdg,
        (_, Some(home)) => home.join(".config"),
        _ => bail!("neither XDG_CONFIG_HOME nor HOME environment variable is set"),
    };
    Ok(app_config_file(&base))
}

/// `{base}/anidex/config.toml`.
fn app_config_file(base: &Path) -> PathBuf {
    base.join(APP_DIR).join(CONFIG_FILE)
}
