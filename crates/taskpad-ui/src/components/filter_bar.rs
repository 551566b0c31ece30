use taskpad_core::Filter;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub active:    Filter,
  pub on_select: Callback<Filter>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  html! {
      <div class="filters">
          {
              for Filter::ALL.into_iter().map(|filter| {
                  let on_select = props.on_select.clone();
                  html! {
                      <button
                          type="button"
                          data-filter={filter.data_value()}
                          class={classes!((props.active == filter).then_some("active"))}
                          onclick={move |_| on_select.emit(filter)}
                      >
                          { filter.label() }
                      </button>
                  }
              })
          }
      </div>
  }
}
