//! Standard locations of eqcurve configuration files

use std::path::PathBuf;

/// File name of the editor preferences
pub const EDITOR_CONFIG_FILE: &str = "editor.yaml";

/// Per-user eqcurve configuration directory
///
/// Returns `{config_dir}/eqcurve`, falling back to `~/.config/eqcurve` and
/// finally `./eqcurve` when no home directory is known.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eqcurve")
}

/// Default path of the editor preferences file
pub fn default_config_path() -> PathBuf {
    config_dir().join(EDITOR_CONFIG_FILE)
}
