//! Scalar values bound to a unit.

use core::fmt;

use crate::error::{UnitError, UnitResult};
use crate::unit::MeasureUnit;

/// A value with a unit.
///
/// Every operation returns a new quantity. Addition and subtraction first convert the right-hand side into the
/// left-hand unit; multiplication and division compose the units instead.
///
/// # Examples
///
/// ```rust
/// use metrum_core::{Decimal, MeasureUnit, Quantity};
///
/// let dozen = MeasureUnit::scalar(Decimal::from(12.0));
/// let eggs = Quantity::new(2.0, dozen);
/// let single = eggs.to(&MeasureUnit::dimensionless()).unwrap();
/// assert!((single.value() - 24.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: MeasureUnit,
}

impl Quantity {
    /// Default absolute tolerance of [`Quantity::equals`].
    pub const DEFAULT_EPSILON: f64 = 1e-9;

    pub fn new(value: f64, unit: MeasureUnit) -> Self {
        Self { value, unit }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn measure_unit(&self) -> &MeasureUnit {
        &self.unit
    }

    /// Applies `f` to the value, keeping the unit.
    ///
    /// ```rust
    /// use metrum_core::{MeasureUnit, Quantity};
    /// let q = Quantity::new(-3.0, MeasureUnit::dimensionless()).map_value(f64::abs);
    /// assert_eq!(q.value(), 3.0);
    /// ```
    pub fn map_value(&self, f: impl FnOnce(f64) -> f64) -> Quantity {
        Quantity::new(f(self.value), self.unit.clone())
    }

    /// Sum in the unit of `self`.
    ///
    /// # Errors
    ///
    /// Whatever [`MeasureUnit::to`] fails with when `other` cannot be converted into this unit.
    pub fn add(&self, other: &Quantity) -> UnitResult<Quantity> {
        let converted = other.unit.to(&self.unit)?.apply_to(other.value);
        Ok(Quantity::new(self.value + converted, self.unit.clone()))
    }

    /// Difference in the unit of `self`.
    ///
    /// # Errors
    ///
    /// Whatever [`MeasureUnit::to`] fails with when `other` cannot be converted into this unit.
    pub fn subtract(&self, other: &Quantity) -> UnitResult<Quantity> {
        let converted = other.unit.to(&self.unit)?.apply_to(other.value);
        Ok(Quantity::new(self.value - converted, self.unit.clone()))
    }

    /// Product of values, product of units.
    pub fn multiply_by(&self, other: &Quantity) -> UnitResult<Quantity> {
        Ok(Quantity::new(
            self.value * other.value,
            self.unit.multiply_by(&other.unit)?,
        ))
    }

    /// Quotient of values, quotient of units.
    ///
    /// # Errors
    ///
    /// [`UnitError::DivisionByZero`] when `other` is zero.
    pub fn divide_by(&self, other: &Quantity) -> UnitResult<Quantity> {
        if other.value == 0.0 {
            return Err(UnitError::DivisionByZero);
        }
        Ok(Quantity::new(
            self.value / other.value,
            self.unit.divide_by(&other.unit)?,
        ))
    }

    /// Reciprocal value in the inverted unit.
    ///
    /// # Errors
    ///
    /// [`UnitError::DivisionByZero`] for a zero value.
    pub fn invert(&self) -> UnitResult<Quantity> {
        if self.value == 0.0 {
            return Err(UnitError::DivisionByZero);
        }
        Ok(Quantity::new(1.0 / self.value, self.unit.invert()?))
    }

    /// The same quantity expressed in `unit`.
    pub fn to(&self, unit: &MeasureUnit) -> UnitResult<Quantity> {
        let ratio = self.unit.to(unit)?;
        Ok(Quantity::new(ratio.apply_to(self.value), unit.clone()))
    }

    /// Converts `other` into the unit of `self` and compares values within an absolute `epsilon`.
    ///
    /// # Errors
    ///
    /// Whatever [`MeasureUnit::to`] fails with for incompatible units.
    pub fn equals_to(&self, other: &Quantity, epsilon: f64) -> UnitResult<bool> {
        let converted = other.unit.to(&self.unit)?.apply_to(other.value);
        Ok((self.value - converted).abs() < epsilon)
    }

    /// [`equals_to`](Quantity::equals_to) with [`Quantity::DEFAULT_EPSILON`].
    pub fn equals(&self, other: &Quantity) -> UnitResult<bool> {
        self.equals_to(other, Self::DEFAULT_EPSILON)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::UnitComponent;
    use crate::decimal::Decimal;
    use crate::dimension::{NormalizedComponent, NormalizedForm};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn unit(abbrev: &str, factor: f64, base: &str, exponent: i32) -> MeasureUnit {
        MeasureUnit::new(
            Decimal::ONE,
            vec![UnitComponent::simple(abbrev, 1)],
            NormalizedForm::new(Decimal::from(factor), vec![NormalizedComponent::new(base, exponent)]),
        )
        .unwrap()
    }

    fn hour() -> MeasureUnit {
        unit("h", 3600.0, "s", 1)
    }

    fn minute() -> MeasureUnit {
        unit("min", 60.0, "s", 1)
    }

    fn meter() -> MeasureUnit {
        unit("m", 1.0, "m", 1)
    }

    fn hertz() -> MeasureUnit {
        unit("Hz", 1.0, "s", -1)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Additive operations
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn add_converts_into_receiver_unit() {
        let sum = Quantity::new(1.0, hour())
            .add(&Quantity::new(15.0, minute()))
            .unwrap();
        assert_abs_diff_eq!(sum.value(), 1.25, epsilon = 1e-12);
        assert_eq!(sum.measure_unit(), &hour());
        assert!(sum.equals(&Quantity::new(1.25, hour())).unwrap());
    }

    #[test]
    fn subtract_converts_into_receiver_unit() {
        let diff = Quantity::new(2.0, minute())
            .subtract(&Quantity::new(0.5, hour()))
            .unwrap();
        assert_abs_diff_eq!(diff.value(), -28.0, epsilon = 1e-12);
    }

    #[test]
    fn add_incompatible_fails() {
        let err = Quantity::new(1.0, hour())
            .add(&Quantity::new(1.0, meter()))
            .unwrap_err();
        assert!(matches!(err, UnitError::Conversion { .. }));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Multiplicative operations
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn multiply_composes_units() {
        let q = Quantity::new(3.0, meter())
            .multiply_by(&Quantity::new(2.0, hour()))
            .unwrap();
        assert_eq!(q.value(), 6.0);
        assert_eq!(
            q.measure_unit().dimension().unwrap(),
            &[NormalizedComponent::new("m", 1), NormalizedComponent::new("s", 1)]
        );
    }

    #[test]
    fn divide_composes_units() {
        let speed = Quantity::new(100.0, meter())
            .divide_by(&Quantity::new(20.0, minute()))
            .unwrap();
        assert_eq!(speed.value(), 5.0);
        assert_eq!(speed.measure_unit().to_string(), "m.min-1");
    }

    #[test]
    fn divide_by_zero() {
        let err = Quantity::new(1.0, meter())
            .divide_by(&Quantity::new(0.0, hour()))
            .unwrap_err();
        assert_eq!(err, UnitError::DivisionByZero);
    }

    #[test]
    fn invert() {
        let period = Quantity::new(4.0, hertz()).invert().unwrap();
        assert_eq!(period.value(), 0.25);
        assert_eq!(
            period.measure_unit().dimension().unwrap(),
            &[NormalizedComponent::new("s", 1)]
        );
        assert_eq!(
            Quantity::new(0.0, hertz()).invert(),
            Err(UnitError::DivisionByZero)
        );
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion and comparison
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn convert() {
        let q = Quantity::new(90.0, minute()).to(&hour()).unwrap();
        assert_relative_eq!(q.value(), 1.5, max_relative = 1e-12);
        assert_eq!(q.measure_unit(), &hour());
    }

    #[test]
    fn convert_reciprocal() {
        let q = Quantity::new(4.0, hertz()).to(&unit("s", 1.0, "s", 1)).unwrap();
        assert_relative_eq!(q.value(), 0.25, max_relative = 1e-12);
        let zero = Quantity::new(0.0, hertz()).to(&unit("s", 1.0, "s", 1)).unwrap();
        assert_eq!(zero.value(), 0.0);
    }

    #[test]
    fn equality_with_tolerance() {
        let a = Quantity::new(60.0, minute());
        let b = Quantity::new(1.0 + 1e-12, hour());
        assert!(a.equals(&b).unwrap());
        assert!(!a.equals_to(&b, 1e-12).unwrap());
        assert!(a.equals(&Quantity::new(1.0, meter())).is_err());
    }

    #[test]
    fn map_value_keeps_unit() {
        let q = Quantity::new(16.0, meter()).map_value(f64::sqrt);
        assert_eq!(q.value(), 4.0);
        assert_eq!(q.measure_unit(), &meter());
    }

    #[test]
    fn display() {
        assert_eq!(Quantity::new(2.5, meter()).to_string(), "2.5 [m]");
    }

    proptest! {
        #[test]
        fn prop_add_then_subtract_is_identity(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let h = Quantity::new(a, hour());
            let m = Quantity::new(b, minute());
            let back = h.add(&m).unwrap().subtract(&m).unwrap();
            prop_assert!((back.value() - a).abs() <= 1e-9 * (1.0 + a.abs() + b.abs()));
        }

        #[test]
        fn prop_conversion_round_trip(v in -1e9f64..1e9) {
            let q = Quantity::new(v, minute());
            let back = q.to(&hour()).unwrap().to(&minute()).unwrap();
            prop_assert!((back.value() - v).abs() <= 1e-12 * (1.0 + v.abs()));
        }
    }
}
