use tracing::warn;

use crate::config::THEME_STORAGE_KEY;
use crate::error::StorageError;
use crate::storage::KeyValueStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn storage_value(self) -> &'static str {
        match self {
            Theme::Light => "false",
            Theme::Dark => "true",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn load<S: KeyValueStorage>(storage: &S) -> Self {
        match storage.get_item(THEME_STORAGE_KEY) {
            Ok(Some(raw)) if raw == "true" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(error) => {
                warn!(%error, "failed reading theme preference");
                Theme::Light
            }
        }
    }

    pub fn save<S: KeyValueStorage>(self, storage: &mut S) -> Result<(), StorageError> {
        storage.set_item(THEME_STORAGE_KEY, self.storage_value())
    }
}
