mod filter_bar;
mod search_box;
mod task_form;
mod task_list;
mod task_list_row;
mod theme_toggle;

pub use filter_bar::FilterBar;
pub use search_box::SearchBox;
pub use task_form::{
  TaskForm,
  TaskFormState
};
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use theme_toggle::ThemeToggle;
