//! Diagnostics registration: tracing subscriber and panic routing.
//!
//! Both installers are guarded by [`Once`], so the host's startup sequence may call
//! [`init_diagnostics`] as often as it likes. A failure to install is reported on
//! stderr and never stops dispatching.

use std::io::{self, Write};
use std::panic;
use std::sync::Once;

use tracing::Metadata;
use tracing_subscriber::fmt::writer::MakeWriter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const TRACING_PREFIX: &str = "[demohost] ";
const DEFAULT_DIRECTIVE: &str = "info";

static PANIC_HOOK_INSTALLED: Once = Once::new();
static TRACING_INSTALLED: Once = Once::new();

/// Enables diagnostics with output on stderr and the default filter.
pub fn init_diagnostics() {
    init_diagnostics_with(io::stderr, None);
}

/// Enables diagnostics, writing formatted events to `writer`.
///
/// `directive` is the filter used when `RUST_LOG` is not set; it falls back to `info`.
pub fn init_diagnostics_with<W>(writer: W, directive: Option<&str>)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    install_panic_hook();
    install_tracing(writer, directive);
}

/// Returns `true` once a subscriber installation has been attempted.
#[must_use]
pub fn diagnostics_installed() -> bool {
    TRACING_INSTALLED.is_completed()
}

/// Routes panics through `tracing`, keeping any previously installed hook (idempotent).
pub fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            tracing_panic::panic_hook(info);
            previous(info);
        }));
    });
}

fn install_tracing<W>(writer: W, directive: Option<&str>)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive.unwrap_or(DEFAULT_DIRECTIVE)));

        let layer = fmt::layer()
            .with_writer(Prefixed(writer))
            .with_ansi(false)
            .without_time()
            .with_filter(filter);

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            eprintln!("demohost diagnostics failed to initialize");
        }
    });
}

// ============================================================================
// Writer
// ============================================================================

/// Prefixes every formatted event so demo output is distinguishable in shared consoles.
struct Prefixed<M>(M);

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for Prefixed<M> {
    type Writer = PrefixedWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        PrefixedWriter::new(self.0.make_writer())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        PrefixedWriter::new(self.0.make_writer_for(meta))
    }
}

struct PrefixedWriter<W> {
    inner: W,
    wrote_prefix: bool,
}

impl<W> PrefixedWriter<W> {
    const fn new(inner: W) -> Self {
        Self {
            inner,
            wrote_prefix: false,
        }
    }
}

impl<W: Write> Write for PrefixedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.wrote_prefix {
            self.inner.write_all(TRACING_PREFIX.as_bytes())?;
            self.wrote_prefix = true;
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
