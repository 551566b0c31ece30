use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Parses the value of a priority `<select>`; unknown values map to medium.
    pub fn from_form_value(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,

    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "dueDate")]
    pub due_date: String,

    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Priority,

    #[serde(default, deserialize_with = "null_as_default")]
    pub complete: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rows written by older builds may carry any priority string, or none.
fn lenient_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(value)) => Priority::from_form_value(&value),
        _ => Priority::default(),
    })
}

impl Task {
    pub fn due(&self) -> Option<NaiveDate> {
        parse_due_date(&self.due_date)
    }

    /// Text the search box matches against.
    pub fn search_text(&self) -> String {
        format!("{}{}", self.title, self.description).to_lowercase()
    }

    fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(due_date) = &patch.due_date {
            self.due_date = due_date.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(complete) = patch.complete {
            self.complete = complete;
        }
    }

    pub(crate) fn patched(&self, patch: &TaskPatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

/// Input of the add form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: due_date.into(),
            priority,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() || self.due_date.trim().is_empty() {
            return Err(ValidationError::MissingTitleOrDueDate);
        }
        Ok(())
    }

    pub(crate) fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            due_date: self.due_date.trim().to_string(),
            priority: self.priority,
            complete: false,
        }
    }
}

/// Field replacement for an existing task. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub complete: Option<bool>,
}

impl TaskPatch {
    /// Patch replacing every form-editable field, as the edit form submits.
    pub fn from_draft(draft: TaskDraft) -> Self {
        Self {
            title: Some(draft.title.trim().to_string()),
            description: Some(draft.description.trim().to_string()),
            due_date: Some(draft.due_date.trim().to_string()),
            priority: Some(draft.priority),
            complete: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        let blank = |value: &Option<String>| value.as_deref().is_some_and(|v| v.trim().is_empty());
        if blank(&self.title) || blank(&self.due_date) {
            return Err(ValidationError::MissingTitleOrDueDate);
        }
        Ok(())
    }
}

pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DUE_DATE_FORMAT).ok()
}

/// Locale-neutral due label; falls back to the raw stored string.
pub fn format_due_date(raw: &str) -> String {
    match parse_due_date(raw) {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}

/// Ids come from the creation timestamp, bumped past `max_existing` so they stay unique.
pub(crate) fn next_task_id(now: DateTime<Utc>, max_existing: Option<TaskId>) -> TaskId {
    let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    match max_existing {
        Some(TaskId(max)) if stamp <= max => TaskId(max.saturating_add(1)),
        _ => TaskId(stamp),
    }
}
