//! User preferences persisted next to the database as JSON.
//!
//! The record store never reads these; they belong to the presentation shell.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub number: String,
}

impl EmergencyContact {
    /// `tel:` URI built from the digits of `number`.
    pub fn dial_uri(&self) -> Option<String> {
        let digits: String = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            None
        } else {
            Some(format!("tel:{digits}"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub notifications_enabled: bool,
    pub biometric_lock: bool,
    pub emergency_contact: EmergencyContact,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            notifications_enabled: true,
            biometric_lock: false,
            emergency_contact: EmergencyContact::default(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<Preferences>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring unreadable settings at {}: {err}", path.display());
                Preferences::default()
            })
        } else {
            Preferences::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn preferences(&self) -> Preferences {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update_theme(&self, theme: Theme) -> Result<()> {
        self.update(|prefs| prefs.theme = theme)
    }

    pub fn set_notifications_enabled(&self, enabled: bool) -> Result<()> {
        self.update(|prefs| prefs.notifications_enabled = enabled)
    }

    pub fn set_biometric_lock(&self, enabled: bool) -> Result<()> {
        self.update(|prefs| prefs.biometric_lock = enabled)
    }

    pub fn update_emergency_contact(&self, contact: EmergencyContact) -> Result<()> {
        self.update(|prefs| prefs.emergency_contact = contact)
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: Preferences = serde_json::from_str(&contents)?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        *guard = data;
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        apply(&mut guard);
        self.persist(&guard)
    }

    fn persist(&self, data: &Preferences) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();

        let prefs = store.preferences();
        assert_eq!(prefs.theme, Theme::System);
        assert!(prefs.notifications_enabled);
        assert!(!prefs.biometric_lock);
    }

    #[test]
    fn updates_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();
        store.update_theme(Theme::Dark).unwrap();
        store
            .update_emergency_contact(EmergencyContact {
                name: "Sam".into(),
                number: "(555) 010-2030".into(),
            })
            .unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        let prefs = reopened.preferences();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(
            prefs.emergency_contact.dial_uri().as_deref(),
            Some("tel:5550102030")
        );
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{{{").unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.preferences(), Preferences::default());
        assert!(store.reload().is_err());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"theme":"light"}"#).unwrap();

        let prefs = SettingsStore::new(path).unwrap().preferences();
        assert_eq!(prefs.theme, Theme::Light);
        assert!(prefs.notifications_enabled);
    }

    #[test]
    fn blank_number_has_no_dial_uri() {
        assert_eq!(EmergencyContact::default().dial_uri(), None);
    }
}
