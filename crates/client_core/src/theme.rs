//! Theme preference persistence.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use shared::domain::ThemePreference;
use thiserror::Error;
use tracing::{info, warn};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write settings file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("settings file '{path}' is not valid json: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable key/value slot holding the theme preference.
pub trait ThemeStore: Send + Sync {
    fn load(&self) -> Result<Option<ThemePreference>, ThemeStoreError>;
    fn save(&self, theme: ThemePreference) -> Result<(), ThemeStoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct PersistedClientSettings {
    theme: Option<ThemePreference>,
}

/// Stores the preference as `{"theme":"dark"}` in a JSON settings file.
#[derive(Debug, Clone)]
pub struct JsonThemeStore {
    path: PathBuf,
}

impl JsonThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for JsonThemeStore {
    fn load(&self) -> Result<Option<ThemePreference>, ThemeStoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ThemeStoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let settings: PersistedClientSettings =
            serde_json::from_slice(&raw).map_err(|source| ThemeStoreError::Decode {
                path: self.path.clone(),
                source,
            })?;
        Ok(settings.theme)
    }

    fn save(&self, theme: ThemePreference) -> Result<(), ThemeStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ThemeStoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let bytes = serde_json::to_vec_pretty(&PersistedClientSettings { theme: Some(theme) })?;
        fs::write(&self.path, bytes).map_err(|source| ThemeStoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Load-on-start, save-on-toggle lifecycle for the theme preference.
/// Storage failures are logged and never surface to the caller.
pub struct ThemePersistence {
    store: Box<dyn ThemeStore>,
}

impl ThemePersistence {
    pub fn new(store: impl ThemeStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn load(&self) -> ThemePreference {
        match self.store.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => ThemePreference::default(),
            Err(err) => {
                warn!("falling back to default theme: {err}");
                ThemePreference::default()
            }
        }
    }

    pub fn toggle(&self, current: ThemePreference) -> ThemePreference {
        let next = current.toggled();
        self.persist(next);
        next
    }

    pub fn persist(&self, theme: ThemePreference) {
        match self.store.save(theme) {
            Ok(()) => info!(theme = %theme, "saved theme preference"),
            Err(err) => warn!("failed to save theme preference: {err}"),
        }
    }
}
