use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::KeyValueStorage;

pub const TASKS_STORAGE_KEY: &str = "tasks";
pub const THEME_STORAGE_KEY: &str = "dark";
pub const SETTINGS_STORAGE_KEY: &str = "taskpad.settings";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub reminders: ReminderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub enabled: bool,
    /// Local hour of the due date at which a task counts as due.
    pub due_hour: u32,
    /// How far ahead of the due instant a reminder may fire.
    pub lead_hours: u32,
    pub check_interval_secs: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            due_hour: 9,
            lead_hours: 24,
            check_interval_secs: 60,
        }
    }
}

impl ReminderConfig {
    fn clamped(mut self) -> Self {
        self.due_hour = self.due_hour.min(23);
        self.lead_hours = self.lead_hours.clamp(1, 720);
        self.check_interval_secs = self.check_interval_secs.clamp(10, 3_600);
        self
    }

    pub fn check_interval_millis(&self) -> u32 {
        self.check_interval_secs.saturating_mul(1_000)
    }
}

impl Settings {
    /// Reads the optional settings override; anything unreadable yields defaults.
    #[tracing::instrument(skip(storage))]
    pub fn load<S: KeyValueStorage>(storage: &S) -> Self {
        let raw = match storage.get_item(SETTINGS_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no settings stored; using defaults");
                return Self::default();
            }
            Err(error) => {
                warn!(%error, "failed reading settings from storage");
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&raw) {
            Ok(settings) => Settings {
                reminders: settings.reminders.clamped(),
            },
            Err(error) => {
                warn!(%error, "failed parsing settings from storage");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn missing_settings_use_defaults() {
        let settings = Settings::load(&MemoryStorage::new());
        assert_eq!(settings.reminders, ReminderConfig::default());
        assert_eq!(settings.reminders.check_interval_millis(), 60_000);
    }

    #[test]
    fn partial_settings_are_merged_and_clamped() {
        let storage = MemoryStorage::new().with_item(
            SETTINGS_STORAGE_KEY,
            r#"{"reminders":{"due_hour":42,"check_interval_secs":1}}"#,
        );
        let settings = Settings::load(&storage);
        assert_eq!(settings.reminders.due_hour, 23);
        assert_eq!(settings.reminders.check_interval_secs, 10);
        assert_eq!(settings.reminders.lead_hours, 24);
        assert!(settings.reminders.enabled);
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        let storage = MemoryStorage::new().with_item(SETTINGS_STORAGE_KEY, "{nope");
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
