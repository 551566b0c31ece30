use taskpad_core::TaskId;
use taskpad_core::drag::DragSession;
use taskpad_core::view::Projection;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub projection:    Projection,
  pub drag:          DragSession,
  pub on_toggle:     Callback<TaskId>,
  pub on_edit:       Callback<TaskId>,
  pub on_delete:     Callback<TaskId>,
  pub on_drag_start: Callback<TaskId>,
  pub on_drag_over:  Callback<TaskId>,
  pub on_drop:
    Callback<(Option<TaskId>, TaskId)>,
  pub on_drag_end:   Callback<()>
}

/// Task text reaches the DOM as text nodes
/// only, so markup in titles stays inert.
#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.projection.rows.is_empty() {
    return html! {
        <ul id="taskList" class="task-list">
            <li class="empty">{ "No tasks" }</li>
        </ul>
    };
  }

  html! {
      <ul id="taskList" class="task-list">
          {
              for props.projection.rows.iter().cloned().map(|task| {
                  let task_id = task.id;
                  html! {
                      <TaskListRow
                          key={task_id.to_string()}
                          task={task}
                          draggable={props.projection.reorderable}
                          is_dragging={props.drag.is_dragging(task_id)}
                          is_over={props.drag.is_over(task_id)}
                          on_toggle={props.on_toggle.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                          on_drag_start={props.on_drag_start.clone()}
                          on_drag_over={props.on_drag_over.clone()}
                          on_drop={props.on_drop.clone()}
                          on_drag_end={props.on_drag_end.clone()}
                      />
                  }
              })
          }
      </ul>
  }
}
