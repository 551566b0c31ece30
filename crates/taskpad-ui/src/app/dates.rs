use taskpad_core::task::{
  format_due_date,
  parse_due_date
};
use wasm_bindgen::JsValue;

/// Local-midnight timestamp for a stored
/// `YYYY-MM-DD`, in the form `Date`'s
/// string constructor reads as local time.
fn local_midnight(
  raw: &str
) -> Option<String> {
  let date = parse_due_date(raw)?;
  Some(format!(
    "{}T00:00:00",
    date.format("%Y-%m-%d")
  ))
}

/// Due date in the browser's locale; the
/// raw stored string when it won't parse.
pub fn localized_due_label(
  raw: &str
) -> String {
  let Some(stamp) = local_midnight(raw)
  else {
    return raw.to_string();
  };

  // The string form keeps years below 100
  // literal; the numeric constructor maps
  // them onto 19xx.
  let js_date = js_sys::Date::new(
    &JsValue::from_str(&stamp)
  );
  if js_date.get_time().is_nan() {
    return format_due_date(raw);
  }

  js_date
    .to_locale_date_string(
      "default",
      &JsValue::UNDEFINED
    )
    .into()
}
