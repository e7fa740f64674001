use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$FLOWHUB_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/flowhub/config.toml`
/// 4. `~/.config/flowhub/config.toml`
///
/// When no file is found, built-in defaults apply.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => Some(path.to_owned()),
        None => discover_config(),
    };

    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

fn discover_config() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("FLOWHUB_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("flowhub/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let p = PathBuf::from(home).join(".config/flowhub/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}
