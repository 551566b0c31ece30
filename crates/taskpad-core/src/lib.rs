pub mod config;
pub mod drag;
pub mod error;
pub mod reminders;
pub mod storage;
pub mod store;
pub mod task;
pub mod theme;
pub mod view;

pub use error::{StorageError, StoreError, ValidationError};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::TaskStore;
pub use task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
pub use view::{Filter, Projection, ViewState};
