use taskpad_core::theme::Theme;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
  pub theme:     Theme,
  pub on_toggle: Callback<()>
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(
  props: &ThemeToggleProps
) -> Html {
  let on_toggle =
    props.on_toggle.clone();
  let label = if props.theme.is_dark() {
    "Light mode"
  } else {
    "Dark mode"
  };

  html! {
      <button
          id="darkToggle"
          type="button"
          onclick={move |_| on_toggle.emit(())}
      >
          { label }
      </button>
  }
}
