use std::rc::Rc;

use demohost::{DemoId, Dispatcher, DispatcherConfig, Flags};
use js_sys::{Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::Element;

use crate::{error::WebError, host::BrowserHost, loader};

/// Dispatcher bound to the current page.
pub type BrowserDispatcher = Dispatcher<BrowserHost, JsValue>;

/// Builder for [`DemoHost`].
#[derive(Debug, Default, Clone)]
pub struct DemoHostBuilder {
    config: DispatcherConfig,
}

impl DemoHostBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    #[must_use]
    pub const fn with_config(config: DispatcherConfig) -> Self {
        Self { config }
    }

    /// Sets the DOM element identifier demos should be mounted into.
    #[must_use]
    pub fn with_root_id(mut self, id: impl Into<String>) -> Self {
        self.config = self.config.with_root_id(id);
        self
    }

    /// Sets the flags passed to every demo.
    #[must_use]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.config = self.config.with_flags(flags);
        self
    }

    /// Sets where compiled demo modules are fetched from.
    #[must_use]
    pub fn with_module_base(mut self, base: impl Into<String>) -> Self {
        self.config = self.config.with_module_base(base);
        self
    }

    /// The configuration built so far.
    #[must_use]
    pub const fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Finalises the builder and creates a [`DemoHost`].
    ///
    /// # Errors
    ///
    /// Returns an error if the browser window is not reachable.
    pub fn build(self) -> Result<DemoHost, WebError> {
        let host = BrowserHost::new(self.config.root_id.clone())?;
        let registry = loader::registry(&self.config);
        Ok(DemoHost {
            dispatcher: Rc::new(Dispatcher::new(registry, host, self.config)),
        })
    }
}

/// Loads demos into the current page.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DemoHost {
    dispatcher: Rc<BrowserDispatcher>,
}

#[wasm_bindgen]
impl DemoHost {
    /// Creates a host from an optional plain configuration object, e.g.
    /// `{ rootId: "app", flags: {} }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is malformed or the DOM is unavailable.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<js_sys::Object>) -> Result<Self, WebError> {
        let config = match config {
            Some(object) => config_from_js(&object)?,
            None => DispatcherConfig::default(),
        };
        DemoHostBuilder::with_config(config).build()
    }

    /// Validates, loads and mounts `name` into the default target.
    ///
    /// The promise rejects with an `UnsupportedDemo` error for unknown names.
    pub fn load(&self, name: String) -> Promise {
        let dispatcher = Rc::clone(&self.dispatcher);
        future_to_promise(async move {
            dispatcher
                .load(&name)
                .await
                .map_err(|err| WebError::from(err).into())
        })
    }

    /// Like `load`, mounting into `node`.
    #[wasm_bindgen(js_name = loadInto)]
    pub fn load_into(&self, name: String, node: Element) -> Promise {
        let dispatcher = Rc::clone(&self.dispatcher);
        future_to_promise(async move {
            dispatcher
                .load_into(&name, &node)
                .await
                .map_err(|err| WebError::from(err).into())
        })
    }

    /// Mounts the demo selected by `?demo=`. Resolves to `undefined` when nothing is
    /// selected.
    #[wasm_bindgen(js_name = dispatchFromEnvironment)]
    pub fn dispatch_from_environment(&self) -> Promise {
        let dispatcher = Rc::clone(&self.dispatcher);
        future_to_promise(async move {
            match dispatcher.dispatch_from_environment().await {
                Ok(instance) => Ok(instance.unwrap_or(JsValue::UNDEFINED)),
                Err(err) => {
                    tracing::error!(error = %err, "demo dispatch failed");
                    Err(WebError::from(err).into())
                }
            }
        })
    }

    /// Phase reached by the most recent call, e.g. `"Mounted"` or `"Rejected"`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.dispatcher.phase().as_str().to_owned()
    }

    /// Removes the current demo's markup from the default target.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be found.
    pub fn clear(&self) -> Result<(), WebError> {
        self.dispatcher.host().clear()
    }

    /// Names of every loadable demo.
    pub fn demos() -> Array {
        demo_names()
    }
}

pub(crate) fn demo_names() -> Array {
    DemoId::ALL
        .into_iter()
        .map(|demo| JsValue::from_str(demo.as_str()))
        .collect()
}

fn config_from_js(object: &js_sys::Object) -> Result<DispatcherConfig, WebError> {
    let json: String = js_sys::JSON::stringify(object)?.into();
    Ok(DispatcherConfig::from_json(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_configuration() {
        let builder = DemoHostBuilder::new()
            .with_root_id("app")
            .with_module_base("/elm/")
            .with_flags(Flags::new());
        assert_eq!(builder.config().root_id.as_deref(), Some("app"));
        assert_eq!(builder.config().module_base, "/elm/");
    }

    #[test]
    fn builder_can_start_from_a_config() {
        let config = DispatcherConfig::default().with_log_level("debug");
        let builder = DemoHostBuilder::with_config(config.clone());
        assert_eq!(builder.config(), &config);
    }
}
