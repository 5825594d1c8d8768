use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::log_warn;
use crate::models::{HoleCount, SelectionPolicy};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub default_policy: SelectionPolicy,
    pub default_hole_count: HoleCount,
    /// Id of the user signed in when the app last ran.
    pub session_user_id: Option<String>,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!(
                    "Ignoring unreadable settings file {}: {err}",
                    path.display()
                );
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> UserSettings {
        self.read().clone()
    }

    pub fn default_policy(&self) -> SelectionPolicy {
        self.read().default_policy
    }

    pub fn default_hole_count(&self) -> HoleCount {
        self.read().default_hole_count
    }

    pub fn session_user_id(&self) -> Option<String> {
        self.read().session_user_id.clone()
    }

    /// Apply `change` and write the result to disk under the same lock.
    pub fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut UserSettings),
    {
        let mut guard = self.write();
        change(&mut guard);
        self.persist(&guard)
    }

    pub fn set_default_policy(&self, policy: SelectionPolicy) -> Result<()> {
        self.update(|settings| settings.default_policy = policy)
    }

    pub fn set_default_hole_count(&self, hole_count: HoleCount) -> Result<()> {
        self.update(|settings| settings.default_hole_count = hole_count)
    }

    pub fn set_session_user_id(&self, user_id: Option<String>) -> Result<()> {
        self.update(|settings| settings.session_user_id = user_id)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.snapshot(), UserSettings::default());
        assert_eq!(store.default_hole_count(), HoleCount::Eighteen);
    }

    #[test]
    fn changes_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();
        store.set_default_policy(SelectionPolicy::Last5).unwrap();
        store.set_default_hole_count(HoleCount::Nine).unwrap();
        store.set_session_user_id(Some("user-1".into())).unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        assert_eq!(reopened.default_policy(), SelectionPolicy::Last5);
        assert_eq!(reopened.default_hole_count(), HoleCount::Nine);
        assert_eq!(reopened.session_user_id().as_deref(), Some("user-1"));
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.snapshot(), UserSettings::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"defaultPolicy": "last20"}"#).unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.default_policy(), SelectionPolicy::Last20);
        assert_eq!(store.default_hole_count(), HoleCount::Eighteen);
        assert_eq!(store.session_user_id(), None);
    }
}
