//! Measure units and their algebra.
//!
//! A [`MeasureUnit`] keeps two views of the same unit:
//!
//! - the *raw* view (factor and components as they were written, e.g. `15 min-1.m3`), used for display;
//! - the *normalized* view (factor and sorted base-unit vector), used for every comparison and conversion.
//!
//! Units are immutable; [`MeasureUnit::multiply_by`], [`MeasureUnit::divide_by`] and [`MeasureUnit::invert`] return
//! new units. Conversion between two units of the same dimension (or of reciprocal dimensions, like `Hz` and `s`)
//! yields a [`Ratio`].
//!
//! # Examples
//!
//! ```rust
//! use metrum_core::{Decimal, MeasureUnit, NormalizedComponent, NormalizedForm, UnitComponent, MetricPrefix};
//!
//! let km = MeasureUnit::new(
//!     Decimal::ONE,
//!     vec![UnitComponent::new(Decimal::ONE, MetricPrefix::Kilo, "m", 1)],
//!     NormalizedForm::new(Decimal::new(1.0, 3), vec![NormalizedComponent::new("m", 1)]),
//! )
//! .unwrap();
//! let m = MeasureUnit::new(
//!     Decimal::ONE,
//!     vec![UnitComponent::simple("m", 1)],
//!     NormalizedForm::new(Decimal::ONE, vec![NormalizedComponent::new("m", 1)]),
//! )
//! .unwrap();
//!
//! let ratio = km.to(&m).unwrap();
//! assert_eq!(ratio.apply_to(2.5), 2500.0);
//! ```

use core::fmt;
use std::collections::BTreeSet;

use crate::component::UnitComponent;
use crate::decimal::Decimal;
use crate::dimension::{ExponentSum, NormalizedComponent, NormalizedForm};
use crate::error::{UnitError, UnitResult};
use crate::ratio::Ratio;

/// An immutable unit of measure.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasureUnit {
    factor: Decimal,
    components: Vec<UnitComponent>,
    normalized: Option<NormalizedForm>,
}

impl MeasureUnit {
    /// Builds a normalized unit.
    ///
    /// The normalized components are put in canonical order and zero exponents are dropped.
    ///
    /// # Errors
    ///
    /// [`UnitError::Construction`] when an abbreviation appears twice among the normalized components.
    pub fn new(
        factor: Decimal,
        components: Vec<UnitComponent>,
        normalized: NormalizedForm,
    ) -> UnitResult<Self> {
        let mut seen = BTreeSet::new();
        for component in &normalized.components {
            if !seen.insert(component.abbrev.as_str()) {
                return Err(UnitError::Construction(format!(
                    "normalized component {:?} appears more than once",
                    component.abbrev
                )));
            }
        }

        let mut canonical: Vec<NormalizedComponent> = normalized
            .components
            .into_iter()
            .filter(|c| c.exponent != 0)
            .collect();
        canonical.sort_by(|a, b| a.abbrev.cmp(&b.abbrev));

        Ok(Self {
            factor,
            components,
            normalized: Some(NormalizedForm::new(normalized.factor, canonical)),
        })
    }

    /// A unit with only its written form; it can be displayed but not compared or combined.
    pub fn raw(factor: Decimal, components: Vec<UnitComponent>) -> Self {
        Self {
            factor,
            components,
            normalized: None,
        }
    }

    /// A pure number: no components, both factors equal to `factor`.
    pub fn scalar(factor: Decimal) -> Self {
        Self {
            factor,
            components: Vec::new(),
            normalized: Some(NormalizedForm::new(factor, Vec::new())),
        }
    }

    /// The unit-less unit.
    pub fn dimensionless() -> Self {
        Self::scalar(Decimal::ONE)
    }

    /// Factor of the written form.
    #[inline]
    pub fn factor(&self) -> Decimal {
        self.factor
    }

    /// Components of the written form, in written order.
    #[inline]
    pub fn components(&self) -> &[UnitComponent] {
        &self.components
    }

    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.normalized.is_some()
    }

    /// Factor and base-unit vector, or `None` for a [`raw`](MeasureUnit::raw) unit.
    #[inline]
    pub fn normalized_form(&self) -> Option<&NormalizedForm> {
        self.normalized.as_ref()
    }

    /// Base-unit vector, or `None` for a raw unit.
    pub fn dimension(&self) -> Option<&[NormalizedComponent]> {
        self.normalized.as_ref().map(|n| n.components.as_slice())
    }

    fn require_normalized(&self) -> UnitResult<&NormalizedForm> {
        self.normalized.as_ref().ok_or_else(|| {
            UnitError::ContractViolation(format!("unit [{self}] has no normalized form"))
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Algebra
    // ─────────────────────────────────────────────────────────────────────────

    /// Product of two units.
    ///
    /// Normalized vectors are summed per base unit. Written components sharing abbreviation, prefix and factor
    /// are merged, so `m.m` times `m-1` is written `m`.
    ///
    /// # Errors
    ///
    /// [`UnitError::ContractViolation`] when either unit is raw or an exponent leaves the `i32` range.
    pub fn multiply_by(&self, other: &MeasureUnit) -> UnitResult<MeasureUnit> {
        let lhs = self.require_normalized()?;
        let rhs = other.require_normalized()?;

        let overflow = || {
            UnitError::ContractViolation(format!("exponent overflow in [{self}] times [{other}]"))
        };

        let mut exponents = ExponentSum::new();
        exponents.add_scaled(&lhs.components, 1).ok_or_else(overflow)?;
        exponents.add_scaled(&rhs.components, 1).ok_or_else(overflow)?;

        let mut merged: Vec<UnitComponent> = Vec::with_capacity(self.components.len() + other.components.len());
        for component in self.components.iter().chain(&other.components) {
            match merged.iter_mut().find(|c| c.same_base(component)) {
                Some(existing) => {
                    existing.exponent = existing
                        .exponent
                        .checked_add(component.exponent)
                        .ok_or_else(overflow)?;
                }
                None => merged.push(component.clone()),
            }
        }
        merged.retain(|c| c.exponent != 0);

        Ok(MeasureUnit {
            factor: self.factor.multiply_by(other.factor),
            components: merged,
            normalized: Some(NormalizedForm::new(
                lhs.factor.multiply_by(rhs.factor),
                exponents.into_components(),
            )),
        })
    }

    /// `self * other^-1`.
    ///
    /// # Errors
    ///
    /// [`UnitError::ContractViolation`] when either unit is raw, [`UnitError::DivisionByZero`] when `other` has a
    /// zero factor.
    pub fn divide_by(&self, other: &MeasureUnit) -> UnitResult<MeasureUnit> {
        self.multiply_by(&other.invert()?)
    }

    /// Negates every exponent and inverts both factors.
    ///
    /// # Errors
    ///
    /// - [`UnitError::DivisionByZero`] for a unit with a zero factor.
    /// - [`UnitError::ContractViolation`] when an exponent is `i32::MIN` and has no negation.
    pub fn invert(&self) -> UnitResult<MeasureUnit> {
        let overflow = || UnitError::ContractViolation(format!("exponent overflow inverting [{self}]"));

        let normalized = match &self.normalized {
            Some(form) => Some(NormalizedForm::new(
                form.factor.inverse()?,
                form.components
                    .iter()
                    .map(|c| {
                        let exponent = c.exponent.checked_neg().ok_or_else(overflow)?;
                        Ok::<_, UnitError>(NormalizedComponent::new(c.abbrev.clone(), exponent))
                    })
                    .collect::<UnitResult<_>>()?,
            )),
            None => None,
        };

        Ok(MeasureUnit {
            factor: self.factor.inverse()?,
            components: self
                .components
                .iter()
                .map(|c| c.inverted().ok_or_else(overflow))
                .collect::<UnitResult<_>>()?,
            normalized,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion and comparison
    // ─────────────────────────────────────────────────────────────────────────

    /// Ratio converting a value in `self` into a value in `other`.
    ///
    /// Units with the same dimension give a direct ratio; units with exactly reciprocal dimensions (`Hz` and `s`)
    /// give an inverted one.
    ///
    /// # Errors
    ///
    /// - [`UnitError::Conversion`] when the dimensions are neither equal nor reciprocal.
    /// - [`UnitError::ContractViolation`] when either unit is raw or the ratio would be zero.
    pub fn to(&self, other: &MeasureUnit) -> UnitResult<Ratio> {
        if core::ptr::eq(self, other) {
            return Ok(Ratio::ONE);
        }

        let lhs = self.require_normalized()?;
        let rhs = other.require_normalized()?;

        let incompatible = || UnitError::Conversion {
            from: self.to_string(),
            to: other.to_string(),
        };

        if lhs.components.len() != rhs.components.len() {
            return Err(incompatible());
        }

        let mut matches = true;
        let mut matches_inverted = true;
        for (a, b) in lhs.components.iter().zip(&rhs.components) {
            if a.abbrev != b.abbrev {
                return Err(incompatible());
            }
            matches = matches && a.exponent == b.exponent;
            matches_inverted = matches_inverted && a.exponent.checked_neg() == Some(b.exponent);
            if !matches && !matches_inverted {
                return Err(incompatible());
            }
        }

        if matches {
            Ratio::new(lhs.factor.divide_by(rhs.factor)?, false)
        } else {
            Ratio::new(lhs.factor.multiply_by(rhs.factor), true)
        }
    }

    /// `true` when both units have the same dimension and their normalized factors agree within `epsilon`.
    ///
    /// # Errors
    ///
    /// [`UnitError::ContractViolation`] when either unit is raw.
    pub fn equals_to(&self, other: &MeasureUnit, epsilon: f64) -> UnitResult<bool> {
        let lhs = self.require_normalized()?;
        let rhs = other.require_normalized()?;
        Ok(lhs.components == rhs.components && lhs.factor.equals_to(rhs.factor, epsilon))
    }

    /// [`equals_to`](MeasureUnit::equals_to) with [`Decimal::DEFAULT_EPSILON`].
    pub fn equals(&self, other: &MeasureUnit) -> UnitResult<bool> {
        self.equals_to(other, Decimal::DEFAULT_EPSILON)
    }
}

/// Minimal rendering of the written form (`2 km.h-1`), meant for error messages and logs.
impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.factor.is_one() {
            write!(f, "{}", self.factor.as_f64())?;
            if !self.components.is_empty() {
                f.write_str(" ")?;
            }
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::MetricPrefix;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn nc(abbrev: &str, exponent: i32) -> NormalizedComponent {
        NormalizedComponent::new(abbrev, exponent)
    }

    fn unit(factor: f64, written: Vec<UnitComponent>, dimension: Vec<NormalizedComponent>) -> MeasureUnit {
        MeasureUnit::new(Decimal::ONE, written, NormalizedForm::new(Decimal::from(factor), dimension)).unwrap()
    }

    fn meter() -> MeasureUnit {
        unit(1.0, vec![UnitComponent::simple("m", 1)], vec![nc("m", 1)])
    }

    fn kilometer() -> MeasureUnit {
        unit(
            1e3,
            vec![UnitComponent::new(Decimal::ONE, MetricPrefix::Kilo, "m", 1)],
            vec![nc("m", 1)],
        )
    }

    fn second() -> MeasureUnit {
        unit(1.0, vec![UnitComponent::simple("s", 1)], vec![nc("s", 1)])
    }

    fn two_hertz() -> MeasureUnit {
        MeasureUnit::new(
            Decimal::ONE,
            vec![UnitComponent::new(Decimal::from(2.0), MetricPrefix::None, "Hz", 1)],
            NormalizedForm::new(Decimal::from(2.0), vec![nc("s", -1)]),
        )
        .unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn duplicate_normalized_abbrev_is_rejected() {
        let result = MeasureUnit::new(
            Decimal::ONE,
            vec![],
            NormalizedForm::new(Decimal::ONE, vec![nc("m", 1), nc("m", 2)]),
        );
        assert!(matches!(result, Err(UnitError::Construction(_))));
    }

    #[test]
    fn normalized_components_are_canonical() {
        let u = unit(1.0, vec![], vec![nc("s", -1), nc("g", 0), nc("m", 1)]);
        assert_eq!(u.dimension().unwrap(), &[nc("m", 1), nc("s", -1)]);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Algebra
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn multiply_merges_written_and_normalized_forms() {
        let area = meter().multiply_by(&meter()).unwrap();
        assert_eq!(area.components(), &[UnitComponent::simple("m", 2)]);
        assert_eq!(area.dimension().unwrap(), &[nc("m", 2)]);

        let mixed = kilometer().multiply_by(&meter()).unwrap();
        assert_eq!(mixed.components().len(), 2);
        assert_relative_eq!(mixed.normalized_form().unwrap().factor.as_f64(), 1e3, max_relative = 1e-12);
    }

    #[test]
    fn divide_cancels() {
        let speed = kilometer().divide_by(&second()).unwrap();
        assert_eq!(speed.dimension().unwrap(), &[nc("m", 1), nc("s", -1)]);
        assert_eq!(speed.to_string(), "km.s-1");

        let back = speed.multiply_by(&second()).unwrap();
        assert_eq!(back.components(), kilometer().components());
        assert!(back.equals(&kilometer()).unwrap());
    }

    #[test]
    fn invert_flips_everything() {
        let inv = two_hertz().invert().unwrap();
        assert_eq!(inv.dimension().unwrap(), &[nc("s", 1)]);
        assert_eq!(inv.components()[0].exponent, -1);
        assert_relative_eq!(inv.normalized_form().unwrap().factor.as_f64(), 0.5, max_relative = 1e-12);
    }

    #[test]
    fn invert_zero_factor_fails() {
        let zero = MeasureUnit::scalar(Decimal::ZERO);
        assert_eq!(zero.invert(), Err(UnitError::DivisionByZero));
    }

    #[test]
    fn exponent_overflow_is_an_error() {
        let huge = unit(1.0, vec![UnitComponent::simple("m", i32::MAX)], vec![nc("m", i32::MAX)]);
        assert!(matches!(huge.multiply_by(&meter()), Err(UnitError::ContractViolation(_))));
        assert!(huge.invert().is_ok());

        let lowest = unit(1.0, vec![UnitComponent::simple("m", i32::MIN)], vec![nc("m", i32::MIN)]);
        assert!(matches!(lowest.invert(), Err(UnitError::ContractViolation(_))));
        assert!(matches!(meter().divide_by(&lowest), Err(UnitError::ContractViolation(_))));
        assert!(matches!(lowest.to(&huge), Err(UnitError::Conversion { .. })));
    }

    #[test]
    fn raw_units_cannot_be_combined() {
        let raw = MeasureUnit::raw(Decimal::ONE, vec![UnitComponent::simple("m", 1)]);
        assert!(!raw.is_normalized());
        assert!(matches!(meter().multiply_by(&raw), Err(UnitError::ContractViolation(_))));
        assert!(matches!(raw.to(&meter()), Err(UnitError::ContractViolation(_))));
        assert!(matches!(raw.equals(&meter()), Err(UnitError::ContractViolation(_))));
        assert!(raw.invert().is_ok());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn identity_conversion() {
        let km = kilometer();
        let ratio = km.to(&km).unwrap();
        assert!(ratio.factor().is_one());
        assert!(!ratio.is_inverted());
    }

    #[test]
    fn direct_conversion() {
        let ratio = kilometer().to(&meter()).unwrap();
        assert_relative_eq!(ratio.factor().as_f64(), 1000.0, max_relative = 1e-12);
        assert!(!ratio.is_inverted());
    }

    #[test]
    fn reciprocal_conversion() {
        let ratio = two_hertz().to(&second()).unwrap();
        assert_relative_eq!(ratio.factor().as_f64(), 2.0, max_relative = 1e-12);
        assert!(ratio.is_inverted());
    }

    #[test]
    fn incompatible_dimensions() {
        let err = meter().to(&second()).unwrap_err();
        assert_eq!(
            err,
            UnitError::Conversion {
                from: "m".into(),
                to: "s".into()
            }
        );
        assert!(matches!(
            meter().to(&MeasureUnit::dimensionless()),
            Err(UnitError::Conversion { .. })
        ));

        let area = meter().multiply_by(&meter()).unwrap();
        assert!(matches!(area.to(&meter()), Err(UnitError::Conversion { .. })));

        // m.s-1 against m.s: one exponent matches, the other is negated.
        let speed = meter().divide_by(&second()).unwrap();
        let absement = meter().multiply_by(&second()).unwrap();
        assert!(matches!(speed.to(&absement), Err(UnitError::Conversion { .. })));
    }

    #[test]
    fn dimensionless_units_convert() {
        let ratio = MeasureUnit::scalar(Decimal::from(4.0))
            .to(&MeasureUnit::dimensionless())
            .unwrap();
        assert_relative_eq!(ratio.apply_to(1.5), 6.0, max_relative = 1e-12);
    }

    #[test]
    fn display() {
        assert_eq!(MeasureUnit::dimensionless().to_string(), "");
        assert_eq!(MeasureUnit::scalar(Decimal::from(2.0)).to_string(), "2");
        assert_eq!(two_hertz().to_string(), "2 Hz");
        let raw = MeasureUnit::raw(
            Decimal::from(3.0),
            vec![UnitComponent::simple("m", 3), UnitComponent::new(Decimal::from(15.0), MetricPrefix::None, "min", -1)],
        );
        assert_eq!(raw.to_string(), "3 m3.15 min-1");
    }

    proptest! {
        #[test]
        fn prop_self_conversion_is_one(f in 1e-6f64..1e6, e in -3i32..=3) {
            let u = unit(f, vec![UnitComponent::simple("m", e)], vec![nc("m", e)]);
            let ratio = u.to(&u).unwrap();
            prop_assert!(ratio.factor().is_one());
            prop_assert!(!ratio.is_inverted());
        }

        #[test]
        fn prop_multiply_then_divide_is_identity(
            f1 in 1e-6f64..1e6,
            f2 in 1e-6f64..1e6,
            e1 in -3i32..=3,
            e2 in -3i32..=3,
        ) {
            let u = unit(f1, vec![UnitComponent::simple("m", e1)], vec![nc("m", e1), nc("s", 1)]);
            let v = unit(f2, vec![UnitComponent::simple("g", e2)], vec![nc("g", e2)]);
            let back = u.multiply_by(&v).unwrap().divide_by(&v).unwrap();
            prop_assert!(back.equals_to(&u, 1e-9).unwrap());
        }
    }
}
