use taskpad_core::{
  KeyValueStorage,
  StorageError
};

/// `window.localStorage`, or nothing when
/// the runtime refuses access to it.
pub struct BrowserStorage {
  inner: Option<web_sys::Storage>
}

impl BrowserStorage {
  pub fn open() -> Self {
    let inner = web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      });

    if inner.is_none() {
      tracing::warn!(
        "local storage unavailable; \
         tasks will not persist"
      );
    }

    Self { inner }
  }

  fn storage(
    &self
  ) -> Result<&web_sys::Storage, StorageError>
  {
    self
      .inner
      .as_ref()
      .ok_or(StorageError::Unavailable)
  }
}

impl KeyValueStorage for BrowserStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    self.storage()?.get_item(key).map_err(
      |error| StorageError::Read {
        key:     key.to_string(),
        message: format!("{error:?}")
      }
    )
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    self
      .storage()?
      .set_item(key, value)
      .map_err(|error| {
        StorageError::Write {
          key:     key.to_string(),
          message: format!("{error:?}")
        }
      })
  }
}
