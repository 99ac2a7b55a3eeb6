use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration loaded from config.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub cli: CliSettings,
    #[serde(default)]
    pub log: LogSettings,
}

/// CLI-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliSettings {
    /// Directory searched by `check` when no paths are given.
    #[serde(default = "default_form_dir")]
    pub default_form_dir: String,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            default_form_dir: default_form_dir(),
        }
    }
}

/// Log filter used when neither `RUST_LOG` nor `-v` is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_form_dir() -> String {
    "forms/".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

/// Discovery order for config file:
/// 1. `--config <path>` (explicit, also fed by `FORM_FORGE_CONFIG`)
/// 2. `./config.toml` (project-local)
/// 3. `$XDG_CONFIG_HOME/form-forge/config.toml`
/// 4. `~/.config/form-forge/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    let local = PathBuf::from("config.toml");
    if local.exists() {
        return load_config_from_path(&local);
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("form-forge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config/form-forge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Ok(CliConfig::default())
}

fn load_config_from_path(path: &Path) -> Result<CliConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| CliError::Config {
        message: format!("failed to parse {}: {}", path.display(), e),
    })
}
