#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! The closed set of demos a host page may load.
//!
//! Every demo is identified by a [`DemoId`]. Untrusted input (a query parameter, a
//! menu entry) is turned into a [`DemoId`] with [`parse`] before anything else happens,
//! and only a [`DemoId`] can be used to reach a loader through [`Registry::resolve`].
//! No string ever selects a module path directly.

mod module;
mod registry;

use core::fmt;
use core::str::FromStr;

pub use module::{DemoModule, Flags, InitOptions, ModuleError};
pub use registry::{BoxedModule, LazyLoader, LoadFuture, Registry};

/// Identifier of a demo known at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DemoId {
    /// Spreading activation demo.
    Spreading,
    /// Binary demo.
    Binary,
    /// A demo that renders nothing, useful as a smoke test for the loader.
    Empty,
}

impl DemoId {
    /// Every declared demo, in declaration order.
    pub const ALL: [Self; 3] = [Self::Spreading, Self::Binary, Self::Empty];

    /// Number of declared demos.
    pub const COUNT: usize = Self::ALL.len();

    /// The exact string a caller must supply to select this demo.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spreading => "Spreading",
            Self::Binary => "Binary",
            Self::Empty => "Empty",
        }
    }

    /// Lower-case file stem of the compiled module for this demo.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Spreading => "spreading",
            Self::Binary => "binary",
            Self::Empty => "empty",
        }
    }

    /// Coerces a raw string into a [`DemoId`].
    ///
    /// Matching is exact and case-sensitive: no trimming or normalisation is applied.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDemoId`] carrying the offending input when it names no demo.
    pub fn parse(raw: &str) -> Result<Self, InvalidDemoId> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == raw)
            .ok_or_else(|| InvalidDemoId(raw.to_owned()))
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemoId {
    type Err = InvalidDemoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Raw input that does not name any declared demo.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported demo value: {0}")]
pub struct InvalidDemoId(String);

impl InvalidDemoId {
    /// The rejected input, exactly as supplied.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Consumes the error, returning the rejected input.
    #[must_use]
    pub fn into_raw(self) -> String {
        self.0
    }
}

/// Returns `true` iff `raw` exactly matches one of the declared demo names.
#[must_use]
pub fn is_valid(raw: &str) -> bool {
    DemoId::parse(raw).is_ok()
}

/// Free-function form of [`DemoId::parse`].
///
/// # Errors
///
/// Returns [`InvalidDemoId`] when `raw` names no demo.
pub fn parse(raw: &str) -> Result<DemoId, InvalidDemoId> {
    DemoId::parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_declared_name_is_valid() {
        for id in DemoId::ALL {
            assert!(is_valid(id.as_str()), "{id} should be valid");
            assert_eq!(parse(id.as_str()), Ok(id));
            assert_eq!(id.to_string(), id.as_str());
        }
    }

    #[test]
    fn matching_is_exact() {
        for raw in ["", "Foo", "binary", "BINARY", " Binary", "Binary ", "Binary\n", "Emptyy"] {
            assert!(!is_valid(raw), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn rejection_carries_the_raw_input() {
        let err = DemoId::parse("Foo").expect_err("Foo is not a demo");
        assert_eq!(err.raw(), "Foo");
        assert_eq!(err.to_string(), "Unsupported demo value: Foo");
        assert_eq!(err.into_raw(), "Foo");
    }

    #[test]
    fn validation_is_stable_across_calls() {
        for _ in 0..3 {
            assert!(is_valid("Spreading"));
            assert!(!is_valid("spreading"));
        }
    }

    #[test]
    fn from_str_delegates_to_parse() {
        assert_eq!("Empty".parse::<DemoId>(), Ok(DemoId::Empty));
        assert!("empty".parse::<DemoId>().is_err());
    }

    #[test]
    fn indices_follow_declaration_order() {
        for (position, id) in DemoId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), position);
        }
        assert_eq!(DemoId::COUNT, 3);
    }
}
