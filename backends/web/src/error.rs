use core::fmt;

use demohost::{ConfigError, DispatchError, HostError, ModuleError};
use wasm_bindgen::JsValue;

/// Error type produced by the web backend.
#[derive(Debug, Clone)]
pub enum WebError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    DomUnavailable,
    /// The requested mounting node cannot be located.
    RootNotFound(String),
    /// The configuration object could not be read.
    Config(String),
    /// Wrapper around JavaScript exceptions.
    Js(String),
    /// A dispatch failed.
    Dispatch(DispatchError),
}

impl WebError {
    /// Name given to the JavaScript `Error` this converts into.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DomUnavailable | Self::RootNotFound(_) => "HostError",
            Self::Config(_) => "ConfigError",
            Self::Js(_) => "Error",
            Self::Dispatch(err) => err.kind(),
        }
    }

    /// The JavaScript value originally thrown by a demo's loader or `init`, if any.
    #[must_use]
    pub fn thrown(&self) -> Option<&JsValue> {
        let Self::Dispatch(err) = self else {
            return None;
        };
        let mut cause = std::error::Error::source(err);
        while let Some(current) = cause {
            if let Some(failure) = current.downcast_ref::<JsFailure>() {
                return Some(&failure.value);
            }
            cause = current.source();
        }
        None
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomUnavailable => write!(f, "DOM is not available"),
            Self::RootNotFound(id) => write!(f, "Failed to find DOM element with id `{id}`"),
            Self::Config(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::Js(msg) => write!(f, "JavaScript error: {msg}"),
            Self::Dispatch(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dispatch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DispatchError> for WebError {
    fn from(value: DispatchError) -> Self {
        Self::Dispatch(value)
    }
}

impl From<ConfigError> for WebError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<WebError> for HostError {
    fn from(value: WebError) -> Self {
        match value {
            WebError::DomUnavailable => Self::Unavailable,
            WebError::RootNotFound(id) => Self::TargetNotFound(id),
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_message(&value))
    }
}

impl From<WebError> for JsValue {
    fn from(value: WebError) -> Self {
        // Failures thrown by a demo are rethrown as-is.
        if let Some(thrown) = value.thrown() {
            return thrown.clone();
        }
        let error = js_sys::Error::new(&value.to_string());
        error.set_name(value.name());
        error.into()
    }
}

/// A value thrown by JavaScript, kept alongside its readable message.
#[derive(Debug, Clone)]
pub struct JsFailure {
    value: JsValue,
    message: String,
}

impl JsFailure {
    /// Wraps a thrown value.
    #[must_use]
    pub fn new(value: JsValue) -> Self {
        let message = js_message(&value);
        Self { value, message }
    }

    /// The value exactly as it was thrown.
    #[must_use]
    pub const fn value(&self) -> &JsValue {
        &self.value
    }
}

impl fmt::Display for JsFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for JsFailure {}

/// Wraps a thrown value as a [`ModuleError`], keeping the value as its source.
pub(crate) fn module_error(value: JsValue) -> ModuleError {
    ModuleError::from_source(JsFailure::new(value))
}

/// Best-effort message extraction from a thrown JavaScript value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
