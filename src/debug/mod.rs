//! Diagnostics for host pages.
//!
//! The host's startup sequence calls [`init_diagnostics`] before dispatching. The
//! call is idempotent; backends supply their own writer through
//! [`init_diagnostics_with`].

pub mod logging;

pub use logging::{diagnostics_installed, init_diagnostics, init_diagnostics_with, install_panic_hook};
