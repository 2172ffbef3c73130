use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::version::filter::Filter;

/// Default log level when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON filter document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML filter document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Format of a filter document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// `.json` files are JSON, everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Keys under which a document may nest the filter
const NESTED_KEYS: [&str; 2] = ["versionfilter", "versionFilter"];

/// Parse a filter from an in-memory document.
///
/// The document is either the bare filter or holds it under `versionfilter`.
/// The filter is returned as written; call [`Filter::init`] to apply defaults
/// and validate it.
pub fn filter_from_str(content: &str, format: ConfigFormat) -> Result<Filter, ConfigError> {
    let filter = match format {
        ConfigFormat::Json => {
            let mut document: serde_json::Value = serde_json::from_str(content)?;
            let nested = NESTED_KEYS
                .iter()
                .find_map(|key| document.as_object_mut()?.remove(*key));
            serde_json::from_value(nested.unwrap_or(document))?
        }
        ConfigFormat::Yaml => {
            let mut document: serde_yaml::Value = serde_yaml::from_str(content)?;
            let nested = NESTED_KEYS
                .iter()
                .find_map(|key| document.as_mapping_mut()?.remove(*key));
            serde_yaml::from_value(nested.unwrap_or(document))?
        }
    };
    Ok(filter)
}

/// Load a filter from a JSON or YAML file
pub fn load_filter(path: &Path) -> Result<Filter, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    filter_from_str(&content, ConfigFormat::from_path(path))
}

/// Returns the path to the data directory for version-filter.
/// Uses $XDG_DATA_HOME/version-filter if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-filter,
/// or ./version-filter if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("version-filter.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("version-filter")
}
