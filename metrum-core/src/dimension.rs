//! Canonical dimension vectors over base units.
//!
//! A dimension is the set of `(base unit, exponent)` pairs a unit reduces to. The canonical form is sorted by
//! abbreviation, has unique abbreviations and never holds a zero exponent; [`ExponentSum`] builds it.

use std::collections::BTreeMap;

use crate::decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One base unit raised to a non-zero power.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalizedComponent {
    pub abbrev: String,
    pub exponent: i32,
}

impl NormalizedComponent {
    pub fn new(abbrev: impl Into<String>, exponent: i32) -> Self {
        Self {
            abbrev: abbrev.into(),
            exponent,
        }
    }
}

/// Output of a normalizer: a scalar factor and the canonical dimension vector.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedForm {
    pub factor: Decimal,
    pub components: Vec<NormalizedComponent>,
}

impl NormalizedForm {
    pub fn new(factor: Decimal, components: Vec<NormalizedComponent>) -> Self {
        Self { factor, components }
    }

    /// Factor one, no dimension.
    pub fn dimensionless() -> Self {
        Self::new(Decimal::ONE, Vec::new())
    }
}

/// Running per-abbreviation exponent sum.
#[derive(Clone, Debug, Default)]
pub(crate) struct ExponentSum {
    exponents: BTreeMap<String, i32>,
}

impl ExponentSum {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds `exponent` to the sum of `abbrev`; `None` when the sum leaves the `i32` range.
    #[must_use]
    pub(crate) fn add(&mut self, abbrev: &str, exponent: i32) -> Option<()> {
        let sum = self.exponents.entry(abbrev.to_string()).or_insert(0);
        *sum = sum.checked_add(exponent)?;
        Some(())
    }

    /// Adds every component of `components`, each scaled by `weight`.
    #[must_use]
    pub(crate) fn add_scaled(&mut self, components: &[NormalizedComponent], weight: i32) -> Option<()> {
        for component in components {
            self.add(&component.abbrev, component.exponent.checked_mul(weight)?)?;
        }
        Some(())
    }

    /// Canonical vector: sorted, zero exponents dropped.
    pub(crate) fn into_components(self) -> Vec<NormalizedComponent> {
        self.exponents
            .into_iter()
            .filter(|(_, exponent)| *exponent != 0)
            .map(|(abbrev, exponent)| NormalizedComponent { abbrev, exponent })
            .collect()
    }
}
