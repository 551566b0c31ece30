use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SearchBoxProps {
  pub value:    String,
  pub on_input: Callback<String>
}

#[function_component(SearchBox)]
pub fn search_box(
  props: &SearchBoxProps
) -> Html {
  let oninput = {
    let on_input =
      props.on_input.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };

  html! {
      <input
          id="search"
          type="search"
          placeholder="Search tasks"
          value={props.value.clone()}
          {oninput}
      />
  }
}
