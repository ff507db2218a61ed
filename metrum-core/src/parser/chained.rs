use std::sync::Arc;

use log::debug;

use super::Parser;
use crate::component::UnitComponent;
use crate::error::{UnitError, UnitResult};

/// Tries each parser in order and returns the first success.
///
/// When every parser fails, the last failure is returned.
#[derive(Clone)]
pub struct ChainedParser {
    parsers: Vec<Arc<dyn Parser>>,
}

impl ChainedParser {
    /// # Errors
    ///
    /// [`UnitError::Construction`] for an empty chain.
    pub fn new(parsers: Vec<Arc<dyn Parser>>) -> UnitResult<Self> {
        if parsers.is_empty() {
            return Err(UnitError::Construction(
                "a parser chain needs at least one parser".to_string(),
            ));
        }
        Ok(Self { parsers })
    }
}

impl Parser for ChainedParser {
    fn parse(&self, text: &str) -> UnitResult<Vec<UnitComponent>> {
        let mut last_error = UnitError::parse(text);

        for (index, parser) in self.parsers.iter().enumerate() {
            match parser.parse(text) {
                Ok(components) => return Ok(components),
                Err(e) => {
                    debug!("parser #{index} rejected {text:?}: {e}");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

impl core::fmt::Debug for ChainedParser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChainedParser")
            .field("parsers", &self.parsers.len())
            .finish()
    }
}
