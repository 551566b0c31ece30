use taskpad_core::reminders::Reminder;
use wasm_bindgen::JsValue;

use super::dates::localized_due_label;

/// Where this page stands with the
/// Notification API.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum NotificationPermission {
  Default,
  Granted,
  Denied,
  Unsupported
}

impl NotificationPermission {
  pub fn is_granted(self) -> bool {
    self == Self::Granted
  }

  /// Whether asking the user can still
  /// change the answer.
  pub fn can_request(self) -> bool {
    self == Self::Default
  }
}

impl From<web_sys::NotificationPermission>
  for NotificationPermission
{
  fn from(
    raw: web_sys::NotificationPermission
  ) -> Self {
    use web_sys::NotificationPermission as Raw;

    match raw {
      | Raw::Granted => Self::Granted,
      | Raw::Denied => Self::Denied,
      | Raw::Default => Self::Default,
      | _ => Self::Unsupported
    }
  }
}

/// The `Notification` constructor is
/// missing in some webviews and insecure
/// contexts; touching it there throws.
fn notification_api_present() -> bool {
  js_sys::Reflect::get(
    &js_sys::global(),
    &JsValue::from_str("Notification")
  )
  .is_ok_and(|ctor| {
    !ctor.is_undefined()
  })
}

pub fn current_permission()
-> NotificationPermission {
  if !notification_api_present() {
    return NotificationPermission::Unsupported;
  }
  web_sys::Notification::permission()
    .into()
}

/// Asks once at startup; the answer is
/// re-read whenever a reminder fires.
pub fn request_notification_permission()
{
  let current = current_permission();
  if current
    == NotificationPermission::Unsupported
  {
    tracing::warn!(
      "browser notification API \
       unsupported in this runtime"
    );
    return;
  }
  if !current.can_request() {
    tracing::debug!(
      permission = ?current,
      "notification permission already \
       decided"
    );
    return;
  }

  match web_sys::Notification::request_permission()
  {
    | Ok(promise) => {
      wasm_bindgen_futures::spawn_local(
        async move {
          match wasm_bindgen_futures::JsFuture::from(
            promise
          )
          .await
          {
            | Ok(_) => {
              tracing::info!(
                permission = ?current_permission(),
                "notification permission \
                 request completed"
              );
            }
            | Err(error) => {
              tracing::error!(
                error = ?error,
                "notification permission \
                 request failed"
              );
            }
          }
        }
      );
    }
    | Err(error) => {
      tracing::error!(
        error = ?error,
        "failed starting notification \
         permission request"
      );
    }
  }
}

/// Desktop notification when permitted,
/// a log line otherwise.
pub fn notify(reminder: &Reminder) {
  let title = reminder.heading();
  let body = format!(
    "Due: {}",
    localized_due_label(
      &reminder.due_date
    )
  );

  if !current_permission().is_granted() {
    tracing::info!(
      task_id = %reminder.task_id,
      "Reminder: {title} {body}"
    );
    return;
  }

  let options =
    web_sys::NotificationOptions::new();
  options.set_body(&body);

  match web_sys::Notification::new_with_options(
    &title, &options
  ) {
    | Ok(_) => {
      tracing::info!(
        task_id = %reminder.task_id,
        "emitted due notification"
      );
    }
    | Err(error) => {
      tracing::error!(
        error = ?error,
        task_id = %reminder.task_id,
        "failed to emit due notification"
      );
    }
  }
}
