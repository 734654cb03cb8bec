//! Dispatcher configuration.

use demohost_registry::Flags;
use serde::{Deserialize, Serialize};

/// Name of the query parameter carrying the demo selection.
pub const DEMO_PARAM: &str = "demo";

/// Default location of the compiled demo modules, relative to the page.
pub const DEFAULT_MODULE_BASE: &str = "./demos/";

/// Configuration shared by the dispatcher and the hosts.
///
/// Every field has a default, so a partial (or empty) JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DispatcherConfig {
    /// Id of the mount element. `None` mounts into the document body.
    pub root_id: Option<String>,
    /// Flags passed to every demo's `init`.
    pub flags: Flags,
    /// Prefix the module file name is appended to.
    pub module_base: String,
    /// Export path walked inside a loaded module before the demo name segment.
    pub export_path: Vec<String>,
    /// Default `tracing` filter directive used when no environment filter is set.
    pub log_level: Option<String>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            root_id: None,
            flags: Flags::new(),
            module_base: DEFAULT_MODULE_BASE.to_owned(),
            export_path: vec!["Elm".to_owned(), "Demos".to_owned()],
            log_level: None,
        }
    }
}

impl DispatcherConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the input is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the DOM element identifier demos should be mounted into.
    #[must_use]
    pub fn with_root_id(mut self, id: impl Into<String>) -> Self {
        self.root_id = Some(id.into());
        self
    }

    /// Replaces the flags payload.
    #[must_use]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Adds a single flag.
    #[must_use]
    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.flags.insert(key.into(), value.into());
        self
    }

    /// Sets the base URL of the compiled demo modules.
    #[must_use]
    pub fn with_module_base(mut self, base: impl Into<String>) -> Self {
        self.module_base = base.into();
        self
    }

    /// Sets the export path walked before the demo name segment.
    #[must_use]
    pub fn with_export_path<S: Into<String>>(mut self, path: impl IntoIterator<Item = S>) -> Self {
        self.export_path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default log filter directive.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }
}

/// Invalid configuration input.
#[derive(Debug, thiserror::Error)]
#[error("invalid demohost configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = DispatcherConfig::from_json("{}").expect("empty config parses");
        assert_eq!(config, DispatcherConfig::default());
        assert_eq!(config.module_base, "./demos/");
        assert_eq!(config.export_path, ["Elm", "Demos"]);
        assert!(config.flags.is_empty());
    }

    #[test]
    fn camel_case_fields_are_read() {
        let config = DispatcherConfig::from_json(
            r#"{ "rootId": "app", "moduleBase": "/static/", "flags": { "seed": 7 }, "logLevel": "debug" }"#,
        )
        .expect("config parses");
        assert_eq!(config.root_id.as_deref(), Some("app"));
        assert_eq!(config.module_base, "/static/");
        assert_eq!(config.flags.get("seed"), Some(&serde_json::json!(7)));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_input_is_an_error() {
        let err = DispatcherConfig::from_json(r#"{ "flags": [] }"#).expect_err("flags must be an object");
        assert!(err.to_string().starts_with("invalid demohost configuration"));
    }

    #[test]
    fn builder_methods_compose() {
        let config = DispatcherConfig::new()
            .with_root_id("main")
            .with_flag("theme", "dark")
            .with_module_base("/m/")
            .with_export_path(["Demos"])
            .with_log_level("trace");
        assert_eq!(config.root_id.as_deref(), Some("main"));
        assert_eq!(config.flags.get("theme"), Some(&serde_json::json!("dark")));
        assert_eq!(config.export_path, ["Demos"]);
        assert_eq!(config.log_level.as_deref(), Some("trace"));
    }
}
