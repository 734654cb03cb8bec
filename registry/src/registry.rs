use core::fmt;
use core::future::Future;

use futures::future::LocalBoxFuture;

use crate::{DemoId, DemoModule, ModuleError};

/// A module handle produced by a [`LazyLoader`].
pub type BoxedModule<N, I> = Box<dyn DemoModule<N, I>>;

/// Future resolving to a loaded module. Not `Send`: loads run on the page's event loop.
pub type LoadFuture<N, I> = LocalBoxFuture<'static, Result<BoxedModule<N, I>, ModuleError>>;

/// Obtains a demo module on demand.
///
/// Nothing is fetched until [`LazyLoader::load`] is called. Implemented for any
/// closure returning a suitable future.
pub trait LazyLoader<N, I> {
    /// Starts fetching the module.
    fn load(&self) -> LoadFuture<N, I>;
}

impl<N, I, F, Fut> LazyLoader<N, I> for F
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<BoxedModule<N, I>, ModuleError>> + 'static,
{
    fn load(&self) -> LoadFuture<N, I> {
        Box::pin(self())
    }
}

/// Mapping from every [`DemoId`] to its loader.
///
/// The table is built from a function over all ids, so there is exactly one loader
/// per demo and [`Registry::resolve`] cannot fail.
pub struct Registry<N, I> {
    loaders: [Box<dyn LazyLoader<N, I>>; DemoId::COUNT],
}

impl<N, I> Registry<N, I> {
    /// Builds a registry by asking `loader_for` for the loader of each demo, in
    /// declaration order.
    pub fn from_fn<F, L>(mut loader_for: F) -> Self
    where
        F: FnMut(DemoId) -> L,
        L: LazyLoader<N, I> + 'static,
    {
        let loaders = core::array::from_fn(|index| {
            Box::new(loader_for(DemoId::ALL[index])) as Box<dyn LazyLoader<N, I>>
        });
        Self { loaders }
    }

    /// Returns the loader associated with `id`.
    #[must_use]
    pub fn resolve(&self, id: DemoId) -> &dyn LazyLoader<N, I> {
        self.loaders[id.index()].as_ref()
    }

    /// Iterates over the demos this registry can load.
    #[allow(clippy::unused_self)]
    pub fn ids(&self) -> impl Iterator<Item = DemoId> + '_ {
        DemoId::ALL.into_iter()
    }
}

impl<N, I> fmt::Debug for Registry<N, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("demos", &DemoId::ALL)
            .finish_non_exhaustive()
    }
}
