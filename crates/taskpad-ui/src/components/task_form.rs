use taskpad_core::{
  Priority,
  Task,
  TaskDraft,
  TaskId
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement
};
use yew::{
  Callback,
  Html,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html
};

#[derive(Clone, PartialEq, Default)]
pub struct TaskFormState {
  pub title:       String,
  pub description: String,
  pub due_date:    String,
  pub priority:    Priority,
  pub editing:     Option<TaskId>
}

impl TaskFormState {
  pub fn editing(task: &Task) -> Self {
    Self {
      title:       task.title.clone(),
      description: task
        .description
        .clone(),
      due_date:    task.due_date.clone(),
      priority:    task.priority,
      editing:     Some(task.id)
    }
  }

  pub fn to_draft(&self) -> TaskDraft {
    TaskDraft::new(
      self.title.clone(),
      self.description.clone(),
      self.due_date.clone(),
      self.priority
    )
  }

  fn submit_label(
    &self
  ) -> &'static str {
    if self.editing.is_some() {
      "Update Task"
    } else {
      "Add Task"
    }
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub state:     TaskFormState,
  pub on_change:
    Callback<TaskFormState>,
  pub on_submit: Callback<()>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let on_title = {
    let state = props.state.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: yew::InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_change.emit(TaskFormState {
          title: input.value(),
          ..state.clone()
        });
      }
    )
  };

  let on_description = {
    let state = props.state.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: yew::InputEvent| {
        let input: HtmlTextAreaElement =
          e.target_unchecked_into();
        on_change.emit(TaskFormState {
          description: input.value(),
          ..state.clone()
        });
      }
    )
  };

  let on_due = {
    let state = props.state.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: yew::Event| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_change.emit(TaskFormState {
          due_date: input.value(),
          ..state.clone()
        });
      }
    )
  };

  let on_priority = {
    let state = props.state.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: yew::Event| {
        let select: HtmlSelectElement =
          e.target_unchecked_into();
        on_change.emit(TaskFormState {
          priority:
            Priority::from_form_value(
              &select.value()
            ),
          ..state.clone()
        });
      }
    )
  };

  let onsubmit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };

  let state = &props.state;

  html! {
      <form id="taskForm" class="task-form" {onsubmit}>
          <input
              id="title"
              type="text"
              placeholder="Title"
              value={state.title.clone()}
              oninput={on_title}
          />
          <textarea
              id="description"
              placeholder="Description"
              value={state.description.clone()}
              oninput={on_description}
          />
          <input
              id="dueDate"
              type="date"
              value={state.due_date.clone()}
              onchange={on_due}
          />
          <select id="priority" onchange={on_priority}>
              {
                  for Priority::ALL.into_iter().map(|priority| html! {
                      <option
                          value={priority.as_str()}
                          selected={state.priority == priority}
                      >
                          { priority.label() }
                      </option>
                  })
              }
          </select>
          <button id="addBtn" type="submit">{ state.submit_label() }</button>
      </form>
  }
}
