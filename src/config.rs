use crate::error::{ExplorerError, Result, ResultExt as _};
use crate::filters::City;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExplorerSettings {
    /// Directory holding the three city CSV files
    pub data_dir: PathBuf,
    /// Rows shown per page by the raw data pager
    pub page_size: usize,
    /// Whether to write the rolling log file
    pub log_to_file: bool,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
            log_to_file: true,
        }
    }
}

impl ExplorerSettings {
    pub fn dataset_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }

    /// # Errors
    ///
    /// Returns [`ExplorerError::Config`] when `page_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ExplorerError::Config(
                "page_size must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bikeshare").join("config.json"))
}

/// Loads settings from `path`, or from [`get_config_path`] when `None`.
///
/// An explicit path must exist and parse. The default location is optional:
/// a missing or unreadable file yields the defaults.
///
/// # Errors
///
/// Fails when an explicit path cannot be read or parsed, or when the loaded
/// settings are invalid.
pub fn load_settings(path: Option<&Path>) -> Result<ExplorerSettings> {
    let settings = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file {}", path.display()))?;
            serde_json::from_str(&content)?
        }
        None => load_default_settings(),
    };
    settings.validate()?;
    Ok(settings)
}

fn load_default_settings() -> ExplorerSettings {
    if let Some(path) = get_config_path()
        && path.exists()
        && let Ok(content) = std::fs::read_to_string(&path)
    {
        match serde_json::from_str::<ExplorerSettings>(&content) {
            Ok(settings) => return settings,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings file");
            }
        }
    }
    ExplorerSettings::default()
}
