//! Built-in unit tables.
//!
//! Each table is a list of `(abbreviation, rule)` pairs ready for
//! [`TransitionNormalizer::new`](metrum_core::TransitionNormalizer::new) or for
//! [`UnitsOfMeasureBuilder`](crate::UnitsOfMeasureBuilder):
//!
//! - [`si_base_units`]: the seven SI base units, with the gram standing in for the kilogram so that `kg` is
//!   simply `k` + `g`.
//! - [`si_derived_units`]: named SI derived units plus the non-SI units accepted for use with SI (hour, litre,
//!   tonne, electronvolt, ...).
//! - [`other_metric_units`]: pressure units that are metric but not SI.
//! - [`imperial_units`]: international imperial lengths and areas. These take no metric prefix.
//!
//! ```rust
//! use metrum::units;
//!
//! let base = units::si_base_units();
//! assert!(base.contains(&"g"));
//! assert!(units::imperial_units().iter().any(|(name, _)| *name == "acre"));
//! ```

mod imperial;
mod metric;
mod si;

pub use imperial::imperial_units;
pub use metric::other_metric_units;
pub use si::{si_base_units, si_derived_units};

use metrum_core::{MetricPrefix, TransitionRule, TransitionTarget};

/// A named unit and its transition rule.
pub type UnitDefinition = (&'static str, TransitionRule);

fn unit(name: &str) -> TransitionTarget {
    TransitionTarget::unit(name)
}

fn power(name: &str, exponent: i32) -> TransitionTarget {
    TransitionTarget::new(name, exponent, MetricPrefix::None)
}

fn prefixed(prefix: MetricPrefix, name: &str) -> TransitionTarget {
    TransitionTarget::new(name, 1, prefix)
}
