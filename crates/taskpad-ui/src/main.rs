mod app;
mod components;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting Taskpad frontend"
  );

  let root = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.get_element_by_id("app")
    });

  match root {
    | Some(root) => {
      yew::Renderer::<app::App>::with_root(
        root
      )
      .render();
    }
    | None => {
      tracing::warn!(
        "no #app element; mounting on body"
      );
      yew::Renderer::<app::App>::new()
        .render();
    }
  }
}
