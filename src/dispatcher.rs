//! Validation, lazy loading and mounting of a single demo.
//!
//! Each call walks the same state machine:
//!
//! ```text
//! Idle ──▶ Validating ──▶ Rejected
//!                 │
//!                 └────▶ Loading ──▶ Mounted
//! ```
//!
//! Validation is synchronous and always finishes before any load starts. The lazy
//! load is the only suspension point; the mount runs once it resolves. Nothing is
//! retried or cached: callers may simply call again. [`Dispatcher::phase`] reports
//! how far the most recent call got.

use core::cell::Cell;
use core::fmt;

use demohost_registry::{BoxedModule, DemoId, InitOptions, Registry};
use tracing::Instrument;

use crate::config::{DEMO_PARAM, DispatcherConfig};
use crate::error::DispatchError;
use crate::host::Host;

/// Phase of a dispatch call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// The raw name is being checked against the registry.
    Validating,
    /// The name matched no demo. Terminal.
    Rejected,
    /// Waiting for the lazy load to complete.
    Loading,
    /// The demo has been initialised into its target. Terminal.
    Mounted,
}

impl DispatchPhase {
    /// Name of the phase, as shown to JavaScript callers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating",
            Self::Rejected => "Rejected",
            Self::Loading => "Loading",
            Self::Mounted => "Mounted",
        }
    }
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a demo name into a mounted demo instance.
pub struct Dispatcher<H: Host, I> {
    registry: Registry<H::Node, I>,
    host: H,
    config: DispatcherConfig,
    phase: Cell<DispatchPhase>,
}

impl<H: Host, I> Dispatcher<H, I> {
    /// Creates a dispatcher over `registry`, reading its environment from `host`.
    pub const fn new(registry: Registry<H::Node, I>, host: H, config: DispatcherConfig) -> Self {
        Self {
            registry,
            host,
            config,
            phase: Cell::new(DispatchPhase::Idle),
        }
    }

    /// Phase reached by the most recent call.
    ///
    /// A load or init failure leaves it at [`DispatchPhase::Loading`]; a missing
    /// selection leaves it untouched.
    pub fn phase(&self) -> DispatchPhase {
        self.phase.get()
    }

    fn enter(&self, phase: DispatchPhase) {
        self.phase.set(phase);
    }

    /// The registry of loadable demos.
    pub const fn registry(&self) -> &Registry<H::Node, I> {
        &self.registry
    }

    /// The host environment.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The active configuration.
    pub const fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Validates `name`, without loading anything.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnsupportedDemo`] if `name` matches no demo.
    pub fn prepare(&self, name: &str) -> Result<PendingLoad<'_, H, I>, DispatchError> {
        self.enter(DispatchPhase::Validating);
        tracing::debug!(demo = name, phase = %DispatchPhase::Validating, "validating demo selection");
        match DemoId::parse(name) {
            Ok(demo) => Ok(PendingLoad {
                dispatcher: self,
                demo,
            }),
            Err(err) => {
                self.enter(DispatchPhase::Rejected);
                tracing::warn!(demo = name, phase = %DispatchPhase::Rejected, "rejected unsupported demo");
                Err(err.into())
            }
        }
    }

    /// Mounts the demo named by the `demo` query parameter, if any.
    ///
    /// Resolves to `Ok(None)` when the parameter is absent or empty: no selection is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::load`].
    pub async fn dispatch_from_environment(&self) -> Result<Option<I>, DispatchError> {
        let Some(name) = self
            .host
            .query_param(DEMO_PARAM)
            .filter(|name| !name.is_empty())
        else {
            tracing::debug!("no demo selected");
            return Ok(None);
        };
        self.load(&name).await.map(Some)
    }

    /// Validates, loads and mounts `name` into the host's default target.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnsupportedDemo`] before any load starts when `name`
    /// is not a demo, and the load, init or host failure otherwise.
    pub async fn load(&self, name: &str) -> Result<I, DispatchError> {
        let pending = self.prepare(name)?;
        let span = tracing::info_span!("dispatch", demo = %pending.demo());
        pending.mount_default().instrument(span).await
    }

    /// Like [`Dispatcher::load`], mounting into `node` instead of the default target.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::load`], minus host failures.
    pub async fn load_into(&self, name: &str, node: &H::Node) -> Result<I, DispatchError> {
        let pending = self.prepare(name)?;
        let span = tracing::info_span!("dispatch", demo = %pending.demo());
        pending.mount(node).instrument(span).await
    }
}

impl<H: Host + fmt::Debug, I> fmt::Debug for Dispatcher<H, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("host", &self.host)
            .field("config", &self.config)
            .field("phase", &self.phase.get())
            .finish()
    }
}

/// A validated request, ready to be loaded and mounted.
pub struct PendingLoad<'d, H: Host, I> {
    dispatcher: &'d Dispatcher<H, I>,
    demo: DemoId,
}

impl<H: Host, I> PendingLoad<'_, H, I> {
    /// The validated demo.
    #[must_use]
    pub const fn demo(&self) -> DemoId {
        self.demo
    }

    /// Loads the demo and mounts it into `node`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ModuleLoad`] or [`DispatchError::Init`].
    pub async fn mount(self, node: &H::Node) -> Result<I, DispatchError> {
        let module = self.fetch().await?;
        self.init(module.as_ref(), node)
    }

    /// Loads the demo and mounts it into the host's default target.
    ///
    /// The target is looked up after the load completes.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ModuleLoad`], [`DispatchError::Host`] or
    /// [`DispatchError::Init`].
    pub async fn mount_default(self) -> Result<I, DispatchError> {
        let module = self.fetch().await?;
        let node = self.dispatcher.host.default_target()?;
        self.init(module.as_ref(), &node)
    }

    async fn fetch(&self) -> Result<BoxedModule<H::Node, I>, DispatchError> {
        let demo = self.demo;
        self.dispatcher.enter(DispatchPhase::Loading);
        tracing::info!(phase = %DispatchPhase::Loading, "loading demo {demo}");
        self.dispatcher
            .registry
            .resolve(demo)
            .load()
            .await
            .map_err(|source| {
                tracing::error!(error = %source, "failed to load demo {demo}");
                DispatchError::ModuleLoad { demo, source }
            })
    }

    fn init(
        &self,
        module: &dyn demohost_registry::DemoModule<H::Node, I>,
        node: &H::Node,
    ) -> Result<I, DispatchError> {
        let demo = self.demo;
        let options = InitOptions::new(node, &self.dispatcher.config.flags);
        let instance = module.init(options).map_err(|source| {
            tracing::error!(error = %source, "demo {demo} failed to initialise");
            DispatchError::Init { demo, source }
        })?;
        self.dispatcher.enter(DispatchPhase::Mounted);
        tracing::info!(phase = %DispatchPhase::Mounted, "mounted demo {demo}");
        Ok(instance)
    }
}

impl<H: Host, I> fmt::Debug for PendingLoad<'_, H, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingLoad").field("demo", &self.demo).finish_non_exhaustive()
    }
}
