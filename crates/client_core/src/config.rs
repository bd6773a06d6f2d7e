use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use anyhow::{anyhow, Result};
use tracing::warn;

use crate::{endpoint::DEFAULT_BACKEND_URL, form::DEFAULT_SUBMITTED_BY, health::HEALTH_TIMEOUT};

pub const CONFIG_FILE_NAME: &str = "task-review.toml";
const APP_DIR_NAME: &str = "task-review";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Raw base address; normalized once by `Endpoints::from_raw`.
    pub backend_url: String,
    pub submitted_by: String,
    pub health_timeout: Duration,
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            submitted_by: DEFAULT_SUBMITTED_BY.into(),
            health_timeout: HEALTH_TIMEOUT,
            data_dir: None,
        }
    }
}

impl Settings {
    /// Directory holding persisted client state.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::config_dir()
            .or_else(dirs::data_local_dir)
            .ok_or_else(|| anyhow!("unable to resolve a per-user config directory"))?;
        Ok(base.join(APP_DIR_NAME))
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(CONFIG_FILE_NAME).ok();
    settings_from_sources(file.as_deref(), |name| std::env::var(name).ok())
}

/// Layers, lowest to highest: defaults, the optional toml file, then the
/// environment. `REVIEW_BACKEND_URL` is read before `APP__BACKEND_URL`.
pub(crate) fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("backend_url").and_then(toml::Value::as_str) {
                    settings.backend_url = v.to_string();
                }
                if let Some(v) = file_cfg.get("submitted_by").and_then(toml::Value::as_str) {
                    settings.submitted_by = v.to_string();
                }
                if let Some(v) = file_cfg
                    .get("health_timeout_ms")
                    .and_then(toml::Value::as_integer)
                {
                    match u64::try_from(v) {
                        Ok(ms) => settings.health_timeout = Duration::from_millis(ms),
                        Err(_) => warn!("ignoring negative health_timeout_ms in {CONFIG_FILE_NAME}"),
                    }
                }
            }
            Err(err) => warn!("ignoring malformed {CONFIG_FILE_NAME}: {err}"),
        }
    }

    if let Some(v) = env("REVIEW_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__SUBMITTED_BY") {
        settings.submitted_by = v;
    }
    if let Some(v) = env("APP__HEALTH_TIMEOUT_MS") {
        match v.parse::<u64>() {
            Ok(ms) => settings.health_timeout = Duration::from_millis(ms),
            Err(err) => warn!("ignoring APP__HEALTH_TIMEOUT_MS={v}: {err}"),
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
