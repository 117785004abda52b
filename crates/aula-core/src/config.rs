//! Portal configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::SESSION_DOCUMENT;
use crate::content::COURSES_DOCUMENT;
use crate::credentials::USERS_DOCUMENT;

/// Environment variable that overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "AULA_DATA_DIR";

/// Top-level aula configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Directory holding every document.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Users document file name, relative to `data_dir`.
    #[serde(default = "default_users_file")]
    pub users_file: String,
    /// Courses document file name, relative to `data_dir`.
    #[serde(default = "default_courses_file")]
    pub courses_file: String,
    /// Session document file name, relative to `data_dir`.
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_users_file() -> String {
    USERS_DOCUMENT.to_string()
}
fn default_courses_file() -> String {
    COURSES_DOCUMENT.to_string()
}
fn default_session_file() -> String {
    SESSION_DOCUMENT.to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            users_file: default_users_file(),
            courses_file: default_courses_file(),
            session_file: default_session_file(),
        }
    }
}

/// Expand `${VAR}` references. Unset variables expand to nothing; an
/// unterminated `${` is left as-is.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &rest[start + 2..start + 2 + len];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `aula.toml` in the current directory
/// 2. `~/.config/aula/config.toml`
///
/// `AULA_DATA_DIR` overrides `data_dir` from either source.
pub fn load_config() -> Result<PortalConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PortalConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("aula.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<PortalConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => PortalConfig::default(),
    };

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            config.data_dir = PathBuf::from(dir);
        }
    }

    let expanded = resolve_env_vars(&config.data_dir.to_string_lossy());
    config.data_dir = PathBuf::from(expanded);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("aula"))
}
