use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

/// Payload handed to every demo on initialisation. Always passed, possibly empty.
pub type Flags = serde_json::Map<String, serde_json::Value>;

/// Options passed to [`DemoModule::init`].
///
/// The mount target is only borrowed for the duration of the call.
#[derive(Debug)]
pub struct InitOptions<'a, N> {
    /// Element the demo renders into.
    pub node: &'a N,
    /// Flags forwarded to the demo.
    pub flags: &'a Flags,
}

impl<'a, N> InitOptions<'a, N> {
    /// Bundles a mount target with its flags.
    #[must_use]
    pub const fn new(node: &'a N, flags: &'a Flags) -> Self {
        Self { node, flags }
    }
}

impl<N> Clone for InitOptions<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for InitOptions<'_, N> {}

/// A loaded UI module.
///
/// Once `init` returns, the instance owns the demo's lifecycle; the caller keeps nothing.
pub trait DemoModule<N, I> {
    /// Mounts the demo into `options.node`.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError`] if the module fails while initialising.
    fn init(&self, options: InitOptions<'_, N>) -> Result<I, ModuleError>;
}

impl<N, I, F> DemoModule<N, I> for F
where
    F: for<'a> Fn(InitOptions<'a, N>) -> Result<I, ModuleError>,
{
    fn init(&self, options: InitOptions<'_, N>) -> Result<I, ModuleError> {
        self(options)
    }
}

/// Opaque failure raised by a loader or a module.
///
/// The original failure, when there is one, is kept untouched and reachable through
/// [`Error::source`].
#[derive(Debug, Clone)]
pub struct ModuleError {
    message: Cow<'static, str>,
    source: Option<Rc<dyn Error + 'static>>,
}

impl ModuleError {
    /// Creates an error with the given message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps `source`, using its `Display` output as the message.
    pub fn from_source(source: impl Error + 'static) -> Self {
        Self {
            message: source.to_string().into(),
            source: Some(Rc::new(source)),
        }
    }

    /// Wraps `source` under a custom message.
    pub fn with_source(message: impl Into<Cow<'static, str>>, source: impl Error + 'static) -> Self {
        Self {
            message: message.into(),
            source: Some(Rc::new(source)),
        }
    }

    /// Human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ModuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref()
    }
}

impl From<String> for ModuleError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&'static str> for ModuleError {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn closures_are_modules() {
        let module = |options: InitOptions<'_, String>| -> Result<usize, ModuleError> {
            Ok(options.node.len() + options.flags.len())
        };
        let node = String::from("body");
        let flags = Flags::new();
        let mounted = module.init(InitOptions::new(&node, &flags)).expect("init succeeds");
        assert_eq!(mounted, 4);
    }

    #[test]
    fn module_error_keeps_its_message() {
        let err = ModuleError::from(String::from("network down"));
        assert_eq!(err.message(), "network down");
        assert_eq!(err.to_string(), "network down");
        assert!(err.source().is_none());
    }

    #[test]
    fn original_failure_stays_reachable() {
        let err = ModuleError::from_source(io::Error::new(io::ErrorKind::NotFound, "binary.js"));
        assert_eq!(err.message(), "binary.js");

        let original = err
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .expect("io error kept as source");
        assert_eq!(original.kind(), io::ErrorKind::NotFound);

        let cloned = err.clone();
        assert!(cloned.source().is_some_and(|source| source.is::<io::Error>()));
    }

    #[test]
    fn custom_message_keeps_the_source() {
        let err = ModuleError::with_source("init threw", io::Error::other("TypeError"));
        assert_eq!(err.to_string(), "init threw");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("TypeError"));
    }
}
