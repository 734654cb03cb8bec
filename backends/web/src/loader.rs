//! Dynamic `import()` of compiled demo modules.
//!
//! A demo's module URL and export path are derived from its [`DemoId`] only. For the
//! default configuration, `Binary` is fetched from `./demos/binary.js` and mounted
//! through `Elm.Demos.Binary.init({ node, flags })`.

use demohost::{
    DemoId, DemoModule, DispatcherConfig, Flags, InitOptions, LazyLoader, LoadFuture, ModuleError,
    Registry,
};
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

use crate::{dom, error::module_error};

#[wasm_bindgen(inline_js = "export function import_module(url) { return import(url); }")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn import_module(url: &str) -> Result<Promise, JsValue>;
}

/// Builds the registry of browser demos for `config`.
#[must_use]
pub fn registry(config: &DispatcherConfig) -> Registry<Element, JsValue> {
    Registry::from_fn(|demo| ModuleLoader::new(demo, config))
}

/// Lazily imports the ES module of one demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLoader {
    demo: DemoId,
    url: String,
    export_path: Vec<String>,
}

impl ModuleLoader {
    /// Derives the module URL and export path of `demo`.
    #[must_use]
    pub fn new(demo: DemoId, config: &DispatcherConfig) -> Self {
        let mut export_path = config.export_path.clone();
        export_path.push(demo.as_str().to_owned());
        Self {
            demo,
            url: format!("{}{}.js", config.module_base, demo.slug()),
            export_path,
        }
    }

    /// The demo this loader fetches.
    #[must_use]
    pub const fn demo(&self) -> DemoId {
        self.demo
    }

    /// Module URL, relative to the page.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Exports walked inside the module namespace to reach the entry point.
    #[must_use]
    pub fn export_path(&self) -> &[String] {
        &self.export_path
    }
}

impl LazyLoader<Element, JsValue> for ModuleLoader {
    fn load(&self) -> LoadFuture<Element, JsValue> {
        let loader = self.clone();
        Box::pin(async move {
            let entry = loader.import().await.map_err(module_error)?;
            Ok(Box::new(JsDemo { entry }) as Box<dyn DemoModule<Element, JsValue>>)
        })
    }
}

impl ModuleLoader {
    async fn import(&self) -> Result<JsValue, JsValue> {
        let window = dom::window()?;
        let url = dom::resolve_url(&window, &self.url)?;
        tracing::debug!(url = %url, "importing demo module");
        let namespace = JsFuture::from(import_module(&url)?).await?;

        let mut entry = namespace;
        for key in &self.export_path {
            entry = Reflect::get(&entry, &JsValue::from_str(key))?;
            if entry.is_undefined() {
                return Err(JsValue::from_str(&format!(
                    "module {} has no export `{}`",
                    self.url,
                    self.export_path.join(".")
                )));
            }
        }
        Ok(entry)
    }
}

/// Entry point of a loaded demo, exposing `init(options)`.
#[derive(Debug)]
struct JsDemo {
    entry: JsValue,
}

impl DemoModule<Element, JsValue> for JsDemo {
    fn init(&self, options: InitOptions<'_, Element>) -> Result<JsValue, ModuleError> {
        self.call_init(options.node, options.flags).map_err(module_error)
    }
}

impl JsDemo {
    fn call_init(&self, node: &Element, flags: &Flags) -> Result<JsValue, JsValue> {
        let init: Function = Reflect::get(&self.entry, &JsValue::from_str("init"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("demo entry point has no `init` function"))?;

        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("node"), node)?;
        Reflect::set(&options, &JsValue::from_str("flags"), &flags_to_js(flags)?)?;
        init.call1(&self.entry, &options)
    }
}

fn flags_to_js(flags: &Flags) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(flags).map_err(|err| JsValue::from_str(&err.to_string()))?;
    js_sys::JSON::parse(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_exports_come_from_the_demo_id() {
        let config = DispatcherConfig::default();
        let loader = ModuleLoader::new(DemoId::Binary, &config);
        assert_eq!(loader.demo(), DemoId::Binary);
        assert_eq!(loader.url(), "./demos/binary.js");
        assert_eq!(loader.export_path(), ["Elm", "Demos", "Binary"]);
    }

    #[test]
    fn module_base_and_export_path_are_configurable() {
        let config = DispatcherConfig::default()
            .with_module_base("/static/elm/")
            .with_export_path(["Demos"]);
        let loader = ModuleLoader::new(DemoId::Spreading, &config);
        assert_eq!(loader.url(), "/static/elm/spreading.js");
        assert_eq!(loader.export_path(), ["Demos", "Spreading"]);
    }

    #[test]
    fn every_demo_gets_its_own_module() {
        let config = DispatcherConfig::default();
        let urls: Vec<String> = DemoId::ALL
            .into_iter()
            .map(|demo| ModuleLoader::new(demo, &config).url().to_owned())
            .collect();
        assert_eq!(
            urls,
            ["./demos/spreading.js", "./demos/binary.js", "./demos/empty.js"]
        );
    }
}
