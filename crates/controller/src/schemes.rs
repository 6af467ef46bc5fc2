//! User selection of which job kinds to activate.

use std::fmt;

use crate::error::SchemeError;
use crate::registry::{supported_schemes, SchemeRegistry};

/// Ordered, append-only selection of canonical job kinds.
///
/// Every entry is a key of the backing registry: [`set`](Self::set) only
/// appends after a successful case-insensitive match and
/// [`fill_all`](Self::fill_all) copies the registry's keys. Nothing is
/// deduplicated; filling twice, or filling and then setting, yields repeats.
#[derive(Debug, Clone)]
pub struct EnabledSchemes<'r> {
    registry: &'r SchemeRegistry,
    kinds: Vec<&'static str>,
}

impl EnabledSchemes<'static> {
    /// Empty selection backed by [`supported_schemes`].
    pub fn new() -> Self {
        Self::with_registry(supported_schemes())
    }
}

impl Default for EnabledSchemes<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> EnabledSchemes<'r> {
    pub fn with_registry(registry: &'r SchemeRegistry) -> Self {
        Self {
            registry,
            kinds: Vec::new(),
        }
    }

    /// Validate `kind` against the registry, ignoring case, and append the
    /// canonical spelling.
    ///
    /// On failure the selection is left untouched and the error carries
    /// `kind` exactly as given.
    pub fn set(&mut self, kind: &str) -> Result<(), SchemeError> {
        let canonical = self
            .registry
            .canonical(kind)
            .ok_or_else(|| SchemeError::Unsupported(kind.to_string()))?;
        self.kinds.push(canonical);
        Ok(())
    }

    /// Append every registered kind.
    pub fn fill_all(&mut self) {
        self.kinds.extend(self.registry.keys());
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'static str] {
        &self.kinds
    }

    pub fn registry(&self) -> &'r SchemeRegistry {
        self.registry
    }
}

/// Comma-joined kinds in insertion order; empty selection renders as "".
impl fmt::Display for EnabledSchemes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kinds.join(","))
    }
}
