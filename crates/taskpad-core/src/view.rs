use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Complete,
    Incomplete,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Complete, Filter::Incomplete];

    /// Value carried by the filter buttons' `data-filter` attribute.
    pub fn data_value(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Complete => "complete",
            Filter::Incomplete => "incomplete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Complete => "Completed",
            Filter::Incomplete => "Incomplete",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Complete => task.complete,
            Filter::Incomplete => !task.complete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub filter: Filter,
    pub query: String,
}

impl ViewState {
    fn normalized_query(&self) -> Option<String> {
        let query = self.query.trim().to_lowercase();
        (!query.is_empty()).then_some(query)
    }
}

/// Rows currently visible, in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub rows: Vec<Task>,
    /// Search results are rendered without drag handles.
    pub reorderable: bool,
}

/// A non-empty search replaces the filter instead of narrowing it.
// NOTE: composing search with the active filter would likely be the expected
// behavior; it is kept bypassing the filter until that is confirmed.
pub fn project(tasks: &[Task], view: &ViewState) -> Projection {
    if let Some(query) = view.normalized_query() {
        return Projection {
            rows: tasks
                .iter()
                .filter(|t| t.search_text().contains(&query))
                .cloned()
                .collect(),
            reorderable: false,
        };
    }

    Projection {
        rows: tasks
            .iter()
            .filter(|t| view.filter.matches(t))
            .cloned()
            .collect(),
        reorderable: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskId};

    fn task(id: u64, title: &str, description: &str, complete: bool) -> Task {
        Task {
            id: TaskId(id),
            title: title.to_string(),
            description: description.to_string(),
            due_date: "2030-01-01".to_string(),
            priority: Priority::Medium,
            complete,
        }
    }

    fn titles(projection: &Projection) -> Vec<&str> {
        projection.rows.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn filter_selects_by_completion() {
        let tasks = vec![task(1, "a", "", true), task(2, "b", "", false)];
        let done = project(
            &tasks,
            &ViewState {
                filter: Filter::Complete,
                query: String::new(),
            },
        );
        assert_eq!(titles(&done), vec!["a"]);
        assert!(done.reorderable);

        let open = project(
            &tasks,
            &ViewState {
                filter: Filter::Incomplete,
                query: "   ".to_string(),
            },
        );
        assert_eq!(titles(&open), vec!["b"]);
    }

    #[test]
    fn search_bypasses_filter_and_matches_description() {
        let tasks = vec![
            task(1, "Groceries", "milk and EGGS", true),
            task(2, "Laundry", "", false),
        ];
        let view = ViewState {
            filter: Filter::Incomplete,
            query: " eggs ".to_string(),
        };
        let projection = project(&tasks, &view);
        assert_eq!(titles(&projection), vec!["Groceries"]);
        assert!(!projection.reorderable);
    }

    #[test]
    fn search_matches_across_title_description_boundary() {
        let tasks = vec![task(1, "buy", "milk", false)];
        let view = ViewState {
            filter: Filter::All,
            query: "ymi".to_string(),
        };
        assert_eq!(project(&tasks, &view).rows.len(), 1);
    }

    #[test]
    fn markup_characters_are_kept_verbatim() {
        let tasks = vec![task(1, "<script>alert(1)</script>", "a & b", false)];
        let projection = project(&tasks, &ViewState::default());
        assert_eq!(projection.rows[0].title, "<script>alert(1)</script>");
        assert_eq!(projection.rows[0].description, "a & b");
    }
}
