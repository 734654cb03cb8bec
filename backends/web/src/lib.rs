#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::future_not_send)]

//! Browser host for `demohost`.
//!
//! On module start the page's `?demo=<Name>` parameter is dispatched once the DOM is
//! ready. Other callers (a navigation menu, for instance) use the exported `load`
//! function or a configured [`DemoHost`].
//!
//! Every demo is compiled separately and fetched with a dynamic `import()` only when
//! selected; see [`loader`] for how module URLs are derived.

mod app;
mod console;
mod dom;
mod error;
mod host;
pub mod loader;

pub use app::{BrowserDispatcher, DemoHost, DemoHostBuilder};
pub use console::{ConsoleWriter, init_diagnostics};
pub use error::{JsFailure, WebError};
pub use host::BrowserHost;

use demohost::DispatcherConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Page entry point: enables diagnostics, then dispatches `?demo=` once the DOM has
/// loaded.
///
/// A rejected or failed dispatch surfaces as an unhandled promise rejection.
///
/// # Errors
///
/// Returns an error if the DOM is unavailable.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let config = DispatcherConfig::default();
    init_diagnostics(config.log_level.as_deref());

    let window = dom::window()?;
    let document = dom::document(&window)?;
    if dom::is_loading(&document) {
        let on_ready = Closure::once_into_js(move || dispatch_page(config));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        dispatch_page(config);
    }
    Ok(())
}

fn dispatch_page(config: DispatcherConfig) {
    let host = match DemoHostBuilder::with_config(config).build() {
        Ok(host) => host,
        Err(err) => {
            tracing::error!(error = %err, "demo host unavailable");
            wasm_bindgen::throw_val(err.into());
        }
    };
    // Nobody awaits the page dispatch: a rejection surfaces as an unhandled
    // rejection in the browser console.
    let dispatch = host.dispatch_from_environment();
    drop(dispatch);
}

/// Loads `name` into the document body with the default configuration.
///
/// # Errors
///
/// Rejects with `UnsupportedDemo` for unknown names, and with the load or init
/// failure otherwise.
#[wasm_bindgen(js_name = load)]
pub fn load_demo(name: String) -> js_sys::Promise {
    match DemoHostBuilder::new().build() {
        Ok(host) => host.load(name),
        Err(err) => future_to_promise(async move { Err(err.into()) }),
    }
}

/// Names of every loadable demo, in declaration order.
#[wasm_bindgen]
#[must_use]
pub fn demos() -> js_sys::Array {
    app::demo_names()
}
