//! Settings file support.
//!
//! Connection strings can live in a JSON file shaped like
//!
//! ```json
//! { "ConnectionStrings": { "OldDb": "postgres://...", "NewDb": "postgres://..." } }
//! ```
//!
//! Values given on the command line or through the environment take precedence.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    #[serde(rename = "ConnectionStrings", default)]
    pub connection_strings: ConnectionStrings,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConnectionStrings {
    #[serde(rename = "OldDb")]
    pub old_db: Option<String>,
    #[serde(rename = "NewDb")]
    pub new_db: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No {side} schema source given: pass --{side}, set {env}, or add ConnectionStrings.{key} to the settings file")]
    MissingSource {
        side: &'static str,
        env: &'static str,
        key: &'static str,
    },
}

impl AppSettings {
    pub fn from_json(path: &Path, content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads a settings file. An explicitly requested file must exist; the
    /// default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_SETTINGS_FILE), false),
        };

        match std::fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "loaded settings file");
                Self::from_json(path, &content)
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                Ok(AppSettings::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// The old and new schema sources after merging flags, environment and settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSources {
    pub old: String,
    pub new: String,
}

pub fn resolve_sources(
    old: Option<String>,
    new: Option<String>,
    settings: &AppSettings,
) -> Result<ResolvedSources, ConfigError> {
    let old = old
        .or_else(|| settings.connection_strings.old_db.clone())
        .ok_or(ConfigError::MissingSource {
            side: "old",
            env: "COMPARADB_OLD",
            key: "OldDb",
        })?;
    let new = new
        .or_else(|| settings.connection_strings.new_db.clone())
        .ok_or(ConfigError::MissingSource {
            side: "new",
            env: "COMPARADB_NEW",
            key: "NewDb",
        })?;

    Ok(ResolvedSources { old, new })
}
