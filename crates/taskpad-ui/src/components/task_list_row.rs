use taskpad_core::{
  Task,
  TaskId
};
use taskpad_core::drag::{
  DRAG_MIME,
  parse_row_dom_id,
  row_dom_id
};
use web_sys::{
  DragEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use crate::app::localized_due_label;

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:         Task,
  pub draggable:    bool,
  pub is_dragging:  bool,
  pub is_over:      bool,
  pub on_toggle:    Callback<TaskId>,
  pub on_edit:      Callback<TaskId>,
  pub on_delete:    Callback<TaskId>,
  pub on_drag_start: Callback<TaskId>,
  pub on_drag_over: Callback<TaskId>,
  pub on_drop:
    Callback<(Option<TaskId>, TaskId)>,
  pub on_drag_end:  Callback<()>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let task_id = props.task.id;
  let draggable = props.draggable;

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    Callback::from(
      move |event: DragEvent| {
        if !draggable {
          return;
        }
        if let Some(data_transfer) =
          event.data_transfer()
        {
          data_transfer
            .set_effect_allowed("move");
          if let Err(error) = data_transfer
            .set_data(
              DRAG_MIME,
              &row_dom_id(task_id)
            )
          {
            tracing::warn!(
              ?error,
              "failed writing drag data"
            );
          }
        }
        on_drag_start.emit(task_id);
      }
    )
  };

  let ondragover = {
    let on_drag_over =
      props.on_drag_over.clone();
    Callback::from(
      move |event: DragEvent| {
        if !draggable {
          return;
        }
        event.prevent_default();
        if let Some(data_transfer) =
          event.data_transfer()
        {
          data_transfer
            .set_drop_effect("move");
        }
        on_drag_over.emit(task_id);
      }
    )
  };

  let ondrop = {
    let on_drop = props.on_drop.clone();
    Callback::from(
      move |event: DragEvent| {
        if !draggable {
          return;
        }
        event.prevent_default();
        let payload = event
          .data_transfer()
          .and_then(|data_transfer| {
            data_transfer
              .get_data(DRAG_MIME)
              .ok()
          })
          .and_then(|raw| {
            parse_row_dom_id(&raw)
          });
        on_drop.emit((payload, task_id));
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(
      move |_: DragEvent| {
        on_drag_end.emit(());
      }
    )
  };

  let on_toggle = {
    let on_toggle =
      props.on_toggle.clone();
    move |_: MouseEvent| on_toggle.emit(task_id)
  };
  let on_edit = {
    let on_edit = props.on_edit.clone();
    move |_: MouseEvent| on_edit.emit(task_id)
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    move |_: MouseEvent| on_delete.emit(task_id)
  };

  let task = &props.task;
  let priority = task.priority.as_str();

  html! {
      <li
          id={row_dom_id(task_id)}
          class={classes!(
              "task",
              task.complete.then_some("completed"),
              props.is_dragging.then_some("dragging"),
              props.is_over.then_some("over")
          )}
          draggable={if draggable { "true" } else { "false" }}
          {ondragstart}
          {ondragover}
          {ondrop}
          {ondragend}
      >
          <div class="meta">
              <div>
                  <div class="title">{ &task.title }</div>
                  <div class="due">{ localized_due_label(&task.due_date) }</div>
              </div>
              <div>
                  <span class={classes!("priority", priority)}>{ priority }</span>
              </div>
          </div>
          <p class="desc">{ &task.description }</p>
          <div class="actions">
              <button class="icon" type="button" onclick={on_toggle}>
                  { if task.complete { "↺" } else { "✔" } }
              </button>
              <button class="icon" type="button" onclick={on_edit}>{ "Edit" }</button>
              <button class="icon warn" type="button" onclick={on_delete}>{ "Delete" }</button>
          </div>
      </li>
  }
}
