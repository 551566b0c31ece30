use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter title and due date")]
    MissingTitleOrDueDate,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("key-value storage is unavailable")]
    Unavailable,

    #[error("failed to read `{key}`: {message}")]
    Read { key: String, message: String },

    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },

    #[error("failed to encode tasks")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to persist tasks")]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Message suitable for showing to the user in a blocking dialog.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Validation(err) => err.to_string(),
            StoreError::Storage(_) => "Could not save tasks".to_string(),
        }
    }
}
