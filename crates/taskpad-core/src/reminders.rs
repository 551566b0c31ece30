use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, trace};

use crate::config::ReminderConfig;
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub task_id: TaskId,
    pub title: String,
    /// Raw stored due date; the host localizes it for display.
    pub due_date: String,
}

impl Reminder {
    pub fn heading(&self) -> String {
        format!("Task due soon: {}", self.title)
    }
}

/// Local instant at which a task counts as due.
pub fn due_instant(task: &Task, config: &ReminderConfig) -> Option<NaiveDateTime> {
    task.due()?.and_hms_opt(config.due_hour, 0, 0)
}

/// Ids reminded during this session. Never persisted, so a reload starts over.
#[derive(Debug, Clone, Default)]
pub struct ReminderTracker {
    notified: BTreeSet<TaskId>,
}

impl ReminderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_notified(&self, id: TaskId) -> bool {
        self.notified.contains(&id)
    }

    /// Reminders for incomplete tasks due within the lead window, each at
    /// most once per tracker. Returned reminders are marked as sent.
    pub fn collect_due(
        &mut self,
        tasks: &[Task],
        now: NaiveDateTime,
        config: &ReminderConfig,
    ) -> Vec<Reminder> {
        if !config.enabled {
            return Vec::new();
        }

        let lead = Duration::hours(i64::from(config.lead_hours));
        let mut due = Vec::new();

        for task in tasks.iter().filter(|t| !t.complete) {
            let Some(at) = due_instant(task, config) else {
                trace!(id = %task.id, due_date = %task.due_date, "skipping unparsable due date");
                continue;
            };
            let remaining = at - now;
            if remaining <= Duration::zero() || remaining > lead {
                continue;
            }
            if !self.notified.insert(task.id) {
                continue;
            }

            debug!(id = %task.id, minutes = remaining.num_minutes(), "task due soon");
            due.push(Reminder {
                task_id: task.id,
                title: task.title.clone(),
                due_date: task.due_date.clone(),
            });
        }

        due
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::task::Priority;

    fn task(id: u64, due_date: &str, complete: bool) -> Task {
        Task {
            id: TaskId(id),
            title: format!("task {id}"),
            description: String::new(),
            due_date: due_date.to_string(),
            priority: Priority::Medium,
            complete,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, 1)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
    }

    #[test]
    fn reminds_once_per_session() {
        let config = ReminderConfig::default();
        let tasks = vec![task(1, "2030-01-02", false)];
        let mut tracker = ReminderTracker::new();

        let first = tracker.collect_due(&tasks, now(), &config);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].heading(), "Task due soon: task 1");
        assert!(tracker.was_notified(TaskId(1)));

        assert!(tracker.collect_due(&tasks, now(), &config).is_empty());

        let mut reloaded = ReminderTracker::new();
        assert_eq!(reloaded.collect_due(&tasks, now(), &config).len(), 1);
    }

    #[test]
    fn skips_complete_past_far_and_malformed() {
        let config = ReminderConfig::default();
        let tasks = vec![
            task(1, "2030-01-02", true),
            task(2, "2030-01-01", false),
            task(3, "2030-01-03", false),
            task(4, "someday", false),
        ];
        let mut tracker = ReminderTracker::new();
        assert!(tracker.collect_due(&tasks, now(), &config).is_empty());
    }

    #[test]
    fn window_is_inclusive_of_exactly_lead_hours() {
        let config = ReminderConfig::default();
        let tasks = vec![task(1, "2030-01-02", false)];
        let edge = NaiveDate::from_ymd_opt(2030, 1, 1)
            .expect("valid date")
            .and_hms_opt(9, 0, 0)
            .expect("valid time");
        let mut tracker = ReminderTracker::new();
        assert_eq!(tracker.collect_due(&tasks, edge, &config).len(), 1);
    }

    #[test]
    fn disabled_config_never_reminds() {
        let config = ReminderConfig {
            enabled: false,
            ..ReminderConfig::default()
        };
        let tasks = vec![task(1, "2030-01-02", false)];
        let mut tracker = ReminderTracker::new();
        assert!(tracker.collect_due(&tasks, now(), &config).is_empty());
        assert!(!tracker.was_notified(TaskId(1)));
    }
}
