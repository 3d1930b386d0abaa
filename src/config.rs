use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dashboard::Tab;
use crate::error::{StoreError, StoreResult};
use crate::models::SortDirection;
use crate::utils;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: Option<PathBuf>,
    pub default_sort: SortDirection,
    pub default_tab: Tab,
}

impl AppConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(utils::database_path)
    }
}

pub struct ConfigStore {
    path: PathBuf,
    data: Mutex<AppConfig>,
}

impl ConfigStore {
    pub fn load() -> Self {
        Self::load_from(utils::config_path())
    }

    /// A missing or unreadable file falls back to defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = read_config(&path).unwrap_or_else(|err| {
            warn!("ignoring config at {:?}: {err}", path);
            AppConfig::default()
        });
        Self {
            path,
            data: Mutex::new(data),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> AppConfig {
        match self.data.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update<F>(&self, transform: F) -> StoreResult<AppConfig>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = self
            .data
            .lock()
            .map_err(|_| StoreError::Poisoned("config"))?;
        transform(&mut guard);
        write_config(&self.path, &guard)?;
        Ok(guard.clone())
    }
}

fn read_config(path: &Path) -> StoreResult<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_config(path: &Path, config: &AppConfig) -> StoreResult<()> {
    utils::ensure_parent(path);
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::load_from(dir.path().join("config.json"));
        let config = store.read();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_sort, SortDirection::Descending);
        assert_eq!(config.default_tab, Tab::Djs);
    }

    #[test]
    fn update_persists_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.json");
        let store = ConfigStore::load_from(&path);

        let updated = store
            .update(|config| {
                config.default_sort = SortDirection::Ascending;
                config.default_tab = Tab::Events;
            })
            .expect("update config");
        assert_eq!(updated.default_tab, Tab::Events);

        let reloaded = ConfigStore::load_from(&path).read();
        assert_eq!(reloaded, updated);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_sort":"ascending"}"#).expect("write config");

        let config = ConfigStore::load_from(&path).read();
        assert_eq!(config.default_sort, SortDirection::Ascending);
        assert_eq!(config.default_tab, Tab::Djs);
        assert_eq!(config.database_path, None);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").expect("write config");

        assert_eq!(ConfigStore::load_from(&path).read(), AppConfig::default());
    }
}
