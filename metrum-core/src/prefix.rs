//! SI metric prefixes.
//!
//! [`MetricPrefix`] is a closed set: `yotta` down to `yocto`, plus [`MetricPrefix::None`] for unprefixed units.
//! Each prefix is plain data (a symbol and a power of ten); symbol lookups go through a table built once.
//!
//! ```rust
//! use metrum_core::MetricPrefix;
//!
//! assert_eq!(MetricPrefix::from_symbol("k"), Some(MetricPrefix::Kilo));
//! assert_eq!(MetricPrefix::Kilo.ratio_to(MetricPrefix::Milli).exponent(), 6);
//! ```

use core::fmt;
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An SI prefix, or none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetricPrefix {
    Yotta,
    Zetta,
    Exa,
    Peta,
    Tera,
    Giga,
    Mega,
    Kilo,
    Hecto,
    Deca,
    #[default]
    None,
    Deci,
    Centi,
    Milli,
    Micro,
    Nano,
    Pico,
    Femto,
    Atto,
    Zepto,
    Yocto,
}

/// Symbol → prefix, including the alternative spellings of micro.
static BY_SYMBOL: Lazy<HashMap<&'static str, MetricPrefix>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, MetricPrefix> = MetricPrefix::ALL
        .iter()
        .filter(|p| !p.is_none())
        .map(|p| (p.symbol(), *p))
        .collect();
    table.insert("µ", MetricPrefix::Micro);
    table.insert("μ", MetricPrefix::Micro);
    table
});

/// Symbols tried while stripping a prefix from a unit token, longest first.
static LONGEST_FIRST: Lazy<Vec<(&'static str, MetricPrefix)>> = Lazy::new(|| {
    let mut symbols: Vec<(&'static str, MetricPrefix)> =
        BY_SYMBOL.iter().map(|(s, p)| (*s, *p)).collect();
    symbols.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
    symbols
});

impl MetricPrefix {
    /// Every prefix, largest factor first.
    pub const ALL: [MetricPrefix; 21] = [
        MetricPrefix::Yotta,
        MetricPrefix::Zetta,
        MetricPrefix::Exa,
        MetricPrefix::Peta,
        MetricPrefix::Tera,
        MetricPrefix::Giga,
        MetricPrefix::Mega,
        MetricPrefix::Kilo,
        MetricPrefix::Hecto,
        MetricPrefix::Deca,
        MetricPrefix::None,
        MetricPrefix::Deci,
        MetricPrefix::Centi,
        MetricPrefix::Milli,
        MetricPrefix::Micro,
        MetricPrefix::Nano,
        MetricPrefix::Pico,
        MetricPrefix::Femto,
        MetricPrefix::Atto,
        MetricPrefix::Zepto,
        MetricPrefix::Yocto,
    ];

    /// ASCII symbol; empty for [`MetricPrefix::None`]. Micro is `u`.
    pub const fn symbol(self) -> &'static str {
        match self {
            MetricPrefix::Yotta => "Y",
            MetricPrefix::Zetta => "Z",
            MetricPrefix::Exa => "E",
            MetricPrefix::Peta => "P",
            MetricPrefix::Tera => "T",
            MetricPrefix::Giga => "G",
            MetricPrefix::Mega => "M",
            MetricPrefix::Kilo => "k",
            MetricPrefix::Hecto => "h",
            MetricPrefix::Deca => "da",
            MetricPrefix::None => "",
            MetricPrefix::Deci => "d",
            MetricPrefix::Centi => "c",
            MetricPrefix::Milli => "m",
            MetricPrefix::Micro => "u",
            MetricPrefix::Nano => "n",
            MetricPrefix::Pico => "p",
            MetricPrefix::Femto => "f",
            MetricPrefix::Atto => "a",
            MetricPrefix::Zepto => "z",
            MetricPrefix::Yocto => "y",
        }
    }

    /// Power of ten carried by the prefix.
    pub const fn exponent(self) -> i32 {
        match self {
            MetricPrefix::Yotta => 24,
            MetricPrefix::Zetta => 21,
            MetricPrefix::Exa => 18,
            MetricPrefix::Peta => 15,
            MetricPrefix::Tera => 12,
            MetricPrefix::Giga => 9,
            MetricPrefix::Mega => 6,
            MetricPrefix::Kilo => 3,
            MetricPrefix::Hecto => 2,
            MetricPrefix::Deca => 1,
            MetricPrefix::None => 0,
            MetricPrefix::Deci => -1,
            MetricPrefix::Centi => -2,
            MetricPrefix::Milli => -3,
            MetricPrefix::Micro => -6,
            MetricPrefix::Nano => -9,
            MetricPrefix::Pico => -12,
            MetricPrefix::Femto => -15,
            MetricPrefix::Atto => -18,
            MetricPrefix::Zepto => -21,
            MetricPrefix::Yocto => -24,
        }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, MetricPrefix::None)
    }

    /// `10^exponent` as an exact [`Decimal`].
    pub fn factor(self) -> Decimal {
        Decimal::new(1.0, self.exponent())
    }

    pub fn as_f64(self) -> f64 {
        10f64.powi(self.exponent())
    }

    /// Factor converting a value expressed with `self` into one expressed with `other`.
    pub fn ratio_to(self, other: MetricPrefix) -> Decimal {
        Decimal::new(1.0, self.exponent() - other.exponent())
    }

    /// Looks a prefix up by symbol. `µ` and `μ` are accepted for micro; the empty string is not a prefix.
    pub fn from_symbol(symbol: &str) -> Option<MetricPrefix> {
        BY_SYMBOL.get(symbol).copied()
    }

    /// Prefix symbols ordered longest first, so `da` is tried before `d`.
    pub(crate) fn longest_first() -> &'static [(&'static str, MetricPrefix)] {
        &LONGEST_FIRST
    }
}

impl fmt::Display for MetricPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn symbols_round_trip() {
        for prefix in MetricPrefix::ALL.iter().filter(|p| !p.is_none()) {
            assert_eq!(MetricPrefix::from_symbol(prefix.symbol()), Some(*prefix));
        }
        assert_eq!(MetricPrefix::from_symbol(""), None);
        assert_eq!(MetricPrefix::from_symbol("x"), None);
    }

    #[test]
    fn micro_aliases() {
        assert_eq!(MetricPrefix::from_symbol("µ"), Some(MetricPrefix::Micro));
        assert_eq!(MetricPrefix::from_symbol("μ"), Some(MetricPrefix::Micro));
    }

    #[test]
    fn deca_is_tried_before_deci() {
        let order = MetricPrefix::longest_first();
        let da = order.iter().position(|(s, _)| *s == "da");
        let d = order.iter().position(|(s, _)| *s == "d");
        assert!(da < d);
    }

    #[test]
    fn factors() {
        assert_relative_eq!(MetricPrefix::Kilo.as_f64(), 1e3);
        assert_relative_eq!(MetricPrefix::Micro.factor().as_f64(), 1e-6, max_relative = 1e-12);
        assert!(MetricPrefix::None.factor().is_one());
        assert_eq!(MetricPrefix::Yocto.factor().exponent(), -24);
    }

    #[test]
    fn ratio_between_prefixes() {
        let r = MetricPrefix::Mega.ratio_to(MetricPrefix::Kilo);
        assert_relative_eq!(r.as_f64(), 1e3, max_relative = 1e-12);
        let r = MetricPrefix::Milli.ratio_to(MetricPrefix::Kilo);
        assert_eq!(r.exponent(), -6);
    }

    #[test]
    fn ordered_largest_first() {
        let exps: Vec<i32> = MetricPrefix::ALL.iter().map(|p| p.exponent()).collect();
        assert!(exps.windows(2).all(|w| w[0] > w[1]));
    }
}
