//! Conversion ratios between two units.

use core::fmt;

use crate::decimal::Decimal;
use crate::error::{UnitError, UnitResult};

/// A non-zero conversion factor, possibly reciprocal.
///
/// A direct ratio multiplies (`km` → `m`: `v * 1000`). An inverted ratio maps between reciprocal dimensions
/// (`2 Hz` → `s`: `1 / (2 v)`).
///
/// Ratios are produced by [`MeasureUnit::to`](crate::MeasureUnit::to).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ratio {
    factor: Decimal,
    inverted: bool,
}

impl Ratio {
    /// The identity conversion.
    pub const ONE: Ratio = Ratio {
        factor: Decimal::ONE,
        inverted: false,
    };

    pub(crate) fn new(factor: Decimal, inverted: bool) -> UnitResult<Self> {
        if factor.is_zero() {
            return Err(UnitError::ContractViolation(
                "a conversion ratio cannot be zero".to_string(),
            ));
        }
        Ok(Self { factor, inverted })
    }

    #[inline]
    pub fn factor(&self) -> Decimal {
        self.factor
    }

    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Converts `value`.
    ///
    /// An inverted ratio leaves zero unchanged instead of dividing by it.
    ///
    /// ```rust
    /// use metrum_core::Ratio;
    /// assert_eq!(Ratio::ONE.apply_to(4.2), 4.2);
    /// ```
    pub fn apply_to(&self, value: f64) -> f64 {
        if self.inverted && value == 0.0 {
            return value;
        }
        if self.factor.is_one() {
            return if self.inverted { 1.0 / value } else { value };
        }

        let scaled = self.factor.multiply_by(Decimal::from(value)).as_f64();
        if self.inverted {
            1.0 / scaled
        } else {
            scaled
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.inverted { "invert" } else { "no-invert" };
        write!(f, "{} {}", self.factor.as_f64(), mode)
    }
}
