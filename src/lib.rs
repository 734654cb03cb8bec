#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::future_not_send)]

pub mod config;
pub mod debug;
pub mod dispatcher;
pub mod error;
pub mod host;

pub use config::{ConfigError, DEMO_PARAM, DispatcherConfig};
pub use debug::init_diagnostics;
pub use dispatcher::{DispatchPhase, Dispatcher, PendingLoad};
pub use error::{DispatchError, HostError};
pub use host::{Host, UrlHost};

#[doc(inline)]
pub use demohost_registry::{
    BoxedModule, DemoId, DemoModule, Flags, InitOptions, InvalidDemoId, LazyLoader, LoadFuture,
    ModuleError, Registry, is_valid, parse,
};

pub mod prelude {
    //! Commonly used types for host integrations.
    //!
    //! ```rust
    //! use demohost::prelude::*;
    //!
    //! assert!(is_valid("Binary"));
    //! assert!(!is_valid("binary"));
    //! ```
    pub use crate::{
        DemoId, DemoModule, DispatchError, Dispatcher, DispatcherConfig, Flags, Host, InitOptions,
        ModuleError, Registry, is_valid,
    };
}
