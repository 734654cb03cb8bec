//! Errors surfaced by the dispatcher.
//!
//! A missing selection is not represented here: dispatching without a `demo`
//! parameter simply yields `Ok(None)`.

use demohost_registry::{DemoId, InvalidDemoId, ModuleError};

/// Failure of a single dispatch call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchError {
    /// The requested name matches no declared demo.
    #[error("Unsupported demo value: {0}")]
    UnsupportedDemo(String),
    /// The lazy load of a valid demo failed.
    #[error("failed to load demo `{demo}`: {source}")]
    ModuleLoad {
        /// Demo being loaded.
        demo: DemoId,
        /// Failure reported by the loader.
        #[source]
        source: ModuleError,
    },
    /// The module loaded but its `init` failed.
    #[error("demo `{demo}` failed to initialise: {source}")]
    Init {
        /// Demo being mounted.
        demo: DemoId,
        /// Failure reported by the module.
        #[source]
        source: ModuleError,
    },
    /// The host could not provide a mount target.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl DispatchError {
    /// The offending input when the request was rejected during validation.
    #[must_use]
    pub fn unsupported_name(&self) -> Option<&str> {
        match self {
            Self::UnsupportedDemo(name) => Some(name),
            _ => None,
        }
    }

    /// Short, stable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedDemo(_) => "UnsupportedDemo",
            Self::ModuleLoad { .. } => "ModuleLoadFailure",
            Self::Init { .. } => "ModuleInitFailure",
            Self::Host(_) => "HostError",
        }
    }
}

impl From<InvalidDemoId> for DispatchError {
    fn from(value: InvalidDemoId) -> Self {
        Self::UnsupportedDemo(value.into_raw())
    }
}

/// Failure of the host environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host environment (e.g. the DOM) is not reachable.
    #[error("host environment is not available")]
    Unavailable,
    /// No element could serve as the mount target.
    #[error("failed to find mount target `{0}`")]
    TargetNotFound(String),
    /// Any other host-specific failure.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_demo_message_names_the_input() {
        let err = DispatchError::from(DemoId::parse("Foo").expect_err("Foo is invalid"));
        assert_eq!(err.unsupported_name(), Some("Foo"));
        assert_eq!(err.kind(), "UnsupportedDemo");
        assert_eq!(err.to_string(), "Unsupported demo value: Foo");
    }

    #[test]
    fn load_failures_keep_their_source() {
        let err = DispatchError::ModuleLoad {
            demo: DemoId::Binary,
            source: ModuleError::new("404"),
        };
        assert_eq!(err.to_string(), "failed to load demo `Binary`: 404");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.unsupported_name(), None);
    }

    #[test]
    fn host_errors_are_transparent() {
        let err = DispatchError::from(HostError::TargetNotFound("app".into()));
        assert_eq!(err.to_string(), "failed to find mount target `app`");
        assert_eq!(err.kind(), "HostError");
    }
}
