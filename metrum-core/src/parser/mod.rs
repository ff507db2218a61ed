//! Unit expression grammars.
//!
//! A [`Parser`] turns unit text into an ordered list of raw [`UnitComponent`]s; it knows which symbols exist but
//! nothing about how they relate to each other (that is the normalizer's job).
//!
//! - [`SiFormParser`]: strict dot-separated form, `10 km.h-1`, `kg.m.s-2`.
//! - [`HumanFormParser`]: permissive form with parentheses and division, `kg m / (s s)`, `1/min`.
//! - [`ChainedParser`]: tries several grammars in order.
//!
//! # Examples
//!
//! ```rust
//! use metrum_core::{MetricPrefix, Parser, SiFormParser};
//!
//! let parser = SiFormParser::new(&["m", "s"], &["ft"]).unwrap();
//! let components = parser.parse("km.s-2").unwrap();
//! assert_eq!(components[0].prefix, MetricPrefix::Kilo);
//! assert_eq!(components[1].exponent, -2);
//! ```

mod chained;
mod human_form;
mod si_form;
mod symbols;

pub use chained::ChainedParser;
pub use human_form::HumanFormParser;
pub use si_form::SiFormParser;

use crate::component::UnitComponent;
use crate::error::UnitResult;

/// Converts unit text into raw components.
///
/// Implementations must be `Send + Sync` so a configured runtime can be shared across threads.
pub trait Parser: Send + Sync {
    /// Parses `text`.
    ///
    /// # Errors
    ///
    /// [`UnitError::Parse`](crate::UnitError::Parse) carrying `text` on any lexical or grammatical mismatch, an
    /// unknown unit symbol or a malformed numeric factor.
    fn parse(&self, text: &str) -> UnitResult<Vec<UnitComponent>>;
}
