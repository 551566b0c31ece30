mod dates;
mod notifications;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{
  Local,
  Utc
};
use gloo::dialogs::{
  alert,
  confirm
};
use gloo::timers::callback::Interval;
use taskpad_core::config::Settings;
use taskpad_core::drag::DragSession;
use taskpad_core::reminders::ReminderTracker;
use taskpad_core::theme::Theme;
use taskpad_core::view::project;
use taskpad_core::{
  Filter,
  StoreError,
  TaskId,
  TaskPatch,
  TaskStore,
  ViewState
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

pub use self::dates::localized_due_label;
use self::notifications::{
  notify,
  request_notification_permission
};
use self::storage::BrowserStorage;
use crate::components::{
  FilterBar,
  SearchBox,
  TaskForm,
  TaskFormState,
  TaskList,
  ThemeToggle
};

type SharedStore =
  Rc<RefCell<TaskStore<BrowserStorage>>>;

/// Surfaces a store failure. Validation
/// problems block with an alert and yield
/// `None`. A storage failure only happens
/// after the in-memory list changed, so it
/// is logged and `applied` stands in for
/// the operation's result.
fn report<T>(
  result: Result<T, StoreError>,
  applied: T
) -> Option<T> {
  match result {
    | Ok(value) => Some(value),
    | Err(
      error @ StoreError::Validation(_)
    ) => {
      alert(&error.user_message());
      None
    }
    | Err(error) => {
      tracing::error!(
        %error,
        "task change applied but not \
         saved"
      );
      Some(applied)
    }
  }
}

fn apply_theme_class(theme: Theme) {
  let Some(body) = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.body()
    })
  else {
    return;
  };

  if let Err(error) = body
    .class_list()
    .toggle_with_force(
      "dark",
      theme.is_dark()
    )
  {
    tracing::warn!(
      ?error,
      "failed toggling dark class"
    );
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let store: SharedStore =
    use_mut_ref(|| {
      TaskStore::load(
        BrowserStorage::open()
      )
    });
  let settings = {
    let store = store.clone();
    use_state(move || {
      Settings::load(
        store.borrow().storage()
      )
    })
  };
  let theme = {
    let store = store.clone();
    use_state(move || {
      Theme::load(
        store.borrow().storage()
      )
    })
  };
  let tracker =
    use_mut_ref(ReminderTracker::new);
  let view =
    use_state(ViewState::default);
  let form =
    use_state(TaskFormState::default);
  let drag =
    use_state(DragSession::default);
  let refresh_tick =
    use_state(|| 0_u64);

  let refresh = {
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(move |_: ()| {
      refresh_tick.set(
        (*refresh_tick)
          .wrapping_add(1)
      );
    })
  };

  use_effect_with(*theme, |theme| {
    apply_theme_class(*theme);
    || ()
  });

  use_effect_with((), |_| {
    request_notification_permission();
    || ()
  });

  {
    let store = store.clone();
    let tracker = tracker.clone();
    use_effect_with(
      (*settings).clone(),
      move |settings| {
        let config =
          settings.reminders.clone();
        let period_ms =
          config.check_interval_millis();
        tracing::info!(
          period_ms,
          enabled = config.enabled,
          "starting reminder checker"
        );

        let interval = Interval::new(
          period_ms,
          move || {
            let now =
              Local::now().naive_local();
            let reminders = tracker
              .borrow_mut()
              .collect_due(
                store.borrow().tasks(),
                now,
                &config
              );
            for reminder in &reminders {
              notify(reminder);
            }
          }
        );

        move || drop(interval)
      }
    );
  }

  let on_form_change = {
    let form = form.clone();
    Callback::from(
      move |next: TaskFormState| {
        form.set(next);
      }
    )
  };

  let on_submit = {
    let store = store.clone();
    let form = form.clone();
    let refresh = refresh.clone();
    Callback::from(move |_: ()| {
      let draft = form.to_draft();
      let saved = match form.editing {
        | Some(id) => report(
          store.borrow_mut().update(
            id,
            &TaskPatch::from_draft(
              draft
            )
          ),
          true
        )
        .is_some(),
        | None => report(
          store
            .borrow_mut()
            .create(draft, Utc::now())
            .map(|_| ()),
          ()
        )
        .is_some()
      };

      if saved {
        form.set(
          TaskFormState::default()
        );
      }
      refresh.emit(());
    })
  };

  let on_toggle = {
    let store = store.clone();
    let refresh = refresh.clone();
    Callback::from(move |id: TaskId| {
      report(
        store
          .borrow_mut()
          .toggle_complete(id),
        true
      );
      refresh.emit(());
    })
  };

  let on_edit = {
    let store = store.clone();
    let form = form.clone();
    Callback::from(move |id: TaskId| {
      match store.borrow().get(id) {
        | Some(task) => {
          form.set(
            TaskFormState::editing(task)
          );
        }
        | None => {
          tracing::warn!(
            %id,
            "edit requested for \
             unknown task"
          );
        }
      }
    })
  };

  let on_delete = {
    let store = store.clone();
    let form = form.clone();
    let refresh = refresh.clone();
    Callback::from(move |id: TaskId| {
      let removed = report(
        store.borrow_mut().delete(
          id,
          |_| confirm("Delete this task?")
        ),
        true
      )
      .unwrap_or(false);

      if removed {
        if form.editing == Some(id) {
          form.set(
            TaskFormState::default()
          );
        }
        refresh.emit(());
      }
    })
  };

  let on_filter = {
    let view = view.clone();
    Callback::from(
      move |filter: Filter| {
        view.set(ViewState {
          filter,
          ..(*view).clone()
        });
      }
    )
  };

  let on_search = {
    let view = view.clone();
    Callback::from(
      move |query: String| {
        view.set(ViewState {
          query,
          ..(*view).clone()
        });
      }
    )
  };

  let on_theme_toggle = {
    let store = store.clone();
    let theme = theme.clone();
    Callback::from(move |_: ()| {
      let next = theme.toggled();
      if let Err(error) = next.save(
        store.borrow_mut().storage_mut()
      ) {
        tracing::error!(
          %error,
          "failed saving theme preference"
        );
      }
      theme.set(next);
    })
  };

  let on_drag_start = {
    let drag = drag.clone();
    Callback::from(move |id: TaskId| {
      tracing::debug!(%id, "drag start");
      let mut next = (*drag).clone();
      next.start(id);
      drag.set(next);
    })
  };

  let on_drag_over = {
    let drag = drag.clone();
    Callback::from(move |id: TaskId| {
      let mut next = (*drag).clone();
      if next.enter(id) {
        drag.set(next);
      }
    })
  };

  let on_drop = {
    let store = store.clone();
    let drag = drag.clone();
    let refresh = refresh.clone();
    Callback::from(
      move |(payload, target): (
        Option<TaskId>,
        TaskId
      )| {
        let mut session =
          (*drag).clone();
        let order = store.borrow().ids();
        let next = session.drop_on(
          payload, target, &order
        );
        drag.set(session);

        if let Some(next) = next {
          tracing::debug!(
            %target,
            "drop reordered tasks"
          );
          report(
            store
              .borrow_mut()
              .reorder(&next),
            ()
          );
          refresh.emit(());
        }
      }
    )
  };

  let on_drag_end = {
    let drag = drag.clone();
    Callback::from(move |_: ()| {
      if *drag != DragSession::default()
      {
        drag.set(DragSession::default());
      }
    })
  };

  let projection = project(
    store.borrow().tasks(),
    &view
  );

  html! {
      <div class="container">
          <header class="app-header">
              <h1>{ "Task Manager" }</h1>
              <ThemeToggle theme={*theme} on_toggle={on_theme_toggle} />
          </header>
          <TaskForm
              state={(*form).clone()}
              on_change={on_form_change}
              on_submit={on_submit}
          />
          <div class="toolbar">
              <SearchBox value={view.query.clone()} on_input={on_search} />
              <FilterBar active={view.filter} on_select={on_filter} />
          </div>
          <TaskList
              projection={projection}
              drag={(*drag).clone()}
              on_toggle={on_toggle}
              on_edit={on_edit}
              on_delete={on_delete}
              on_drag_start={on_drag_start}
              on_drag_over={on_drag_over}
              on_drop={on_drop}
              on_drag_end={on_drag_end}
          />
      </div>
  }
}

#[cfg(test)]
mod tests {
  use taskpad_core::StorageError;

  use super::*;

  #[test]
  fn unsaved_change_still_counts_as_applied(
  ) {
    let created = report(
      Err::<(), _>(StoreError::Storage(
        StorageError::Unavailable
      )),
      ()
    );
    assert_eq!(created, Some(()));

    let removed = report(
      Err::<bool, _>(StoreError::Storage(
        StorageError::Write {
          key:     "tasks".to_string(),
          message: "quota".to_string()
        }
      )),
      true
    );
    assert_eq!(removed, Some(true));
  }

  #[test]
  fn successful_result_passes_through() {
    assert_eq!(
      report(Ok::<bool, StoreError>(false), true),
      Some(false)
    );
  }
}
