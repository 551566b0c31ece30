use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::TASKS_STORAGE_KEY;
use crate::error::{StorageError, StoreError};
use crate::storage::KeyValueStorage;
use crate::task::{Task, TaskDraft, TaskId, TaskPatch, next_task_id};

/// Canonical ordered task list mirrored to key-value storage.
///
/// Every mutation writes the whole list back before returning. The `bool`
/// returned by mutations reports whether anything changed, so callers only
/// re-render when needed. A [`StoreError::Storage`] is only raised after the
/// in-memory change was applied; the list stays changed but unsaved.
#[derive(Debug)]
pub struct TaskStore<S> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Reads the persisted list; absent or corrupt data starts an empty list
    /// and unreadable rows are skipped.
    #[tracing::instrument(skip(storage))]
    pub fn load(storage: S) -> Self {
        let tasks = match storage.get_item(TASKS_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
                Ok(rows) => dedupe_ids(parse_rows(rows)),
                Err(error) => {
                    warn!(%error, "persisted tasks are malformed; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, "failed reading persisted tasks; starting empty");
                Vec::new()
            }
        };

        info!(count = tasks.len(), "loaded tasks");
        Self { storage, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id).collect()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Result<TaskId, StoreError> {
        draft.validate()?;

        let max_id = self.tasks.iter().map(|t| t.id).max();
        let id = next_task_id(now, max_id);
        self.tasks.push(draft.into_task(id));
        self.persist()?;

        info!(%id, "created task");
        Ok(id)
    }

    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    pub fn update(&mut self, id: TaskId, patch: &TaskPatch) -> Result<bool, StoreError> {
        patch.validate()?;

        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!("update target not found");
            return Ok(false);
        };
        *slot = slot.patched(patch);
        self.persist()?;

        info!("updated task");
        Ok(true)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn toggle_complete(&mut self, id: TaskId) -> Result<bool, StoreError> {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!("toggle target not found");
            return Ok(false);
        };
        let patch = TaskPatch {
            complete: Some(!slot.complete),
            ..TaskPatch::default()
        };
        *slot = slot.patched(&patch);
        let complete = slot.complete;
        self.persist()?;

        info!(complete, "toggled task");
        Ok(true)
    }

    /// Removes the task after `confirm` approves it. `confirm` is not asked
    /// about ids that are not in the list.
    #[tracing::instrument(skip(self, confirm), fields(id = %id))]
    pub fn delete<F>(&mut self, id: TaskId, confirm: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&Task) -> bool,
    {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            debug!("delete target not found");
            return Ok(false);
        };
        if !confirm(&self.tasks[idx]) {
            debug!("delete declined");
            return Ok(false);
        }

        self.tasks.remove(idx);
        self.persist()?;

        info!("deleted task");
        Ok(true)
    }

    /// Rebuilds the list in `order`. Unknown ids are skipped and tasks the
    /// order does not name are dropped.
    #[tracing::instrument(skip(self, order), fields(len = order.len()))]
    pub fn reorder(&mut self, order: &[TaskId]) -> Result<(), StoreError> {
        let before = self.tasks.len();
        let mut by_id: HashMap<TaskId, Task> =
            self.tasks.drain(..).map(|t| (t.id, t)).collect();
        self.tasks = order.iter().filter_map(|id| by_id.remove(id)).collect();

        if !by_id.is_empty() {
            warn!(dropped = by_id.len(), "reorder omitted tasks; dropping them");
        }
        self.persist()?;

        debug!(before, after = self.tasks.len(), "reordered tasks");
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.tasks)?;
        self.storage.set_item(TASKS_STORAGE_KEY, &json)
    }
}

/// Decodes rows one at a time so a single unreadable row only costs itself.
fn parse_rows(rows: Vec<serde_json::Value>) -> Vec<Task> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match serde_json::from_value::<Task>(row) {
            Ok(task) => Some(task),
            Err(error) => {
                warn!(idx, %error, "dropping unreadable persisted task");
                None
            }
        })
        .collect()
}

fn dedupe_ids(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = BTreeSet::new();
    let before = tasks.len();
    let kept: Vec<Task> = tasks.into_iter().filter(|t| seen.insert(t.id)).collect();
    if kept.len() != before {
        warn!(dropped = before - kept.len(), "dropped tasks with duplicate ids");
    }
    kept
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::error::ValidationError;
    use crate::storage::MemoryStorage;
    use crate::task::Priority;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).single().expect("valid instant")
    }

    fn store_with(titles: &[&str]) -> TaskStore<MemoryStorage> {
        let mut store = TaskStore::load(MemoryStorage::new());
        for (idx, title) in titles.iter().enumerate() {
            store
                .create(
                    TaskDraft::new(*title, "", "2030-01-01", Priority::Medium),
                    at(idx as i64 + 1),
                )
                .expect("create task");
        }
        store
    }

    #[test]
    fn create_rejects_blank_title_or_due_date() {
        let mut store = store_with(&[]);
        let err = store
            .create(TaskDraft::new("   ", "", "2030-01-01", Priority::Low), at(1))
            .expect_err("blank title");
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::MissingTitleOrDueDate)
        ));
        assert!(store
            .create(TaskDraft::new("x", "", "", Priority::Low), at(1))
            .is_err());
        assert!(store.tasks().is_empty());
        assert!(store.storage().get(TASKS_STORAGE_KEY).is_none());
    }

    #[test]
    fn create_trims_and_persists() {
        let mut store = store_with(&[]);
        let id = store
            .create(
                TaskDraft::new("  Pay rent ", " monthly ", "2030-01-01", Priority::High),
                at(42),
            )
            .expect("create");
        assert_eq!(id, TaskId(42));

        let task = store.get(id).expect("task exists");
        assert_eq!(task.title, "Pay rent");
        assert_eq!(task.description, "monthly");
        assert!(!task.complete);

        let raw = store.storage().get(TASKS_STORAGE_KEY).expect("persisted");
        let json: serde_json::Value = serde_json::from_str(raw).expect("json");
        assert_eq!(json[0]["title"], "Pay rent");
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let mut store = store_with(&["a"]);
        let id = store.ids()[0];
        let before = store.get(id).cloned().expect("task");

        let patch = TaskPatch {
            description: Some("details".to_string()),
            ..TaskPatch::default()
        };
        assert!(store.update(id, &patch).expect("update"));

        let after = store.get(id).expect("task");
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.due_date, before.due_date);
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.description, "details");
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = store_with(&["a"]);
        let patch = TaskPatch {
            title: Some("b".to_string()),
            ..TaskPatch::default()
        };
        assert!(!store.update(TaskId(999), &patch).expect("update"));
        assert_eq!(store.tasks()[0].title, "a");
    }

    #[test]
    fn update_rejects_blank_title() {
        let mut store = store_with(&["a"]);
        let id = store.ids()[0];
        let patch = TaskPatch {
            title: Some(" ".to_string()),
            ..TaskPatch::default()
        };
        assert!(store.update(id, &patch).is_err());
        assert_eq!(store.tasks()[0].title, "a");
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut store = store_with(&["a"]);
        let id = store.ids()[0];
        store.toggle_complete(id).expect("toggle");
        assert!(store.get(id).expect("task").complete);
        store.toggle_complete(id).expect("toggle");
        assert!(!store.get(id).expect("task").complete);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut store = store_with(&["a", "b"]);
        let id = store.ids()[0];

        assert!(!store.delete(id, |_| false).expect("declined"));
        assert_eq!(store.tasks().len(), 2);

        assert!(store.delete(id, |task| task.title == "a").expect("confirmed"));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "b");
    }

    #[test]
    fn delete_unknown_id_never_asks() {
        let mut store = store_with(&["a"]);
        let removed = store
            .delete(TaskId(12345), |_| panic!("confirm must not run"))
            .expect("delete");
        assert!(!removed);
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn reorder_drops_unknown_and_unnamed_ids() {
        let mut store = store_with(&["a", "b", "c"]);
        let ids = store.ids();

        store
            .reorder(&[ids[2], TaskId(77), ids[0], ids[2]])
            .expect("reorder");
        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a"]);
    }

    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            })
        }
    }

    #[test]
    fn failed_write_keeps_change_in_memory() {
        let mut store = TaskStore::load(ReadOnlyStorage);
        let draft = TaskDraft::new("a", "", "2030-01-01", Priority::Low);

        let err = store.create(draft, at(1)).expect_err("write fails");
        assert!(matches!(err, StoreError::Storage(StorageError::Write { .. })));
        assert_eq!(store.tasks().len(), 1);

        let id = store.ids()[0];
        assert!(matches!(
            store.toggle_complete(id),
            Err(StoreError::Storage(_))
        ));
        assert!(store.get(id).expect("task").complete);

        assert!(matches!(
            store.delete(id, |_| true),
            Err(StoreError::Storage(_))
        ));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn one_unreadable_row_keeps_the_rest() {
        let raw = r#"[
            {"id":1,"title":"keep me","description":"","dueDate":"2030-01-01","priority":"low","complete":false},
            {"id":"two","title":"bad id","dueDate":"2030-01-01"},
            {"id":3,"title":"null desc","description":null,"dueDate":"2030-01-01","priority":"urgent","complete":false}
        ]"#;
        let mut store = TaskStore::load(MemoryStorage::new().with_item(TASKS_STORAGE_KEY, raw));
        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["keep me", "null desc"]);

        store
            .create(TaskDraft::new("new", "", "2030-01-01", Priority::Low), at(10))
            .expect("create");
        let saved = store.storage().get(TASKS_STORAGE_KEY).expect("persisted");
        assert!(saved.contains("keep me"));
    }

    #[test]
    fn load_drops_duplicate_ids() {
        let raw = r#"[
            {"id":1,"title":"a","description":"","dueDate":"2030-01-01","priority":"low","complete":false},
            {"id":1,"title":"dup","description":"","dueDate":"2030-01-01","priority":"low","complete":false}
        ]"#;
        let store = TaskStore::load(MemoryStorage::new().with_item(TASKS_STORAGE_KEY, raw));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "a");
    }
}
