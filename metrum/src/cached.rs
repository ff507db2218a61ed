//! Memoizing runtime.
//!
//! Parsing a unit runs a regex per component and a table lookup per unit; applications tend to parse the same few
//! strings over and over. [`CachedRuntime`] keeps every successfully parsed unit, keyed by the exact input text.

use std::collections::HashMap;

use log::trace;
use parking_lot::RwLock;

use metrum_core::{MeasureUnit, Runtime, UnitResult};

/// Wraps a [`Runtime`] and caches [`Runtime::parse`] results.
///
/// The cache is shared between threads behind a read/write lock. Failed parses are not cached, so the error is
/// reported again on the next call.
#[derive(Debug)]
pub struct CachedRuntime<R> {
    runtime: R,
    cache: RwLock<HashMap<String, MeasureUnit>>,
}

impl<R: Runtime> CachedRuntime<R> {
    /// Create an empty cache in front of `runtime`.
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Drop every cached unit.
    pub fn clear(&self) {
        self.cache.write().clear();
    }

    /// Number of cached units.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// The wrapped runtime.
    pub fn inner(&self) -> &R {
        &self.runtime
    }
}

impl<R: Runtime> Runtime for CachedRuntime<R> {
    fn parse(&self, text: &str) -> UnitResult<MeasureUnit> {
        if let Some(unit) = self.cache.read().get(text) {
            trace!("unit cache hit for {text:?}");
            return Ok(unit.clone());
        }

        trace!("unit cache miss for {text:?}");
        let unit = self.runtime.parse(text)?;
        self.cache
            .write()
            .entry(text.to_string())
            .or_insert_with(|| unit.clone());
        Ok(unit)
    }

    fn normalize(&self, unit: &MeasureUnit) -> UnitResult<MeasureUnit> {
        self.runtime.normalize(unit)
    }
}
