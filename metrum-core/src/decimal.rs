//! Scientific-notation scalar used for every factor and conversion ratio.
//!
//! A [`Decimal`] stores `mantissa * 10^exponent` with `|mantissa|` always kept in `[1, 10)` (zero is stored as
//! `0 * 10^0`). Unit conversions chain many multiplications of factors that differ by dozens of orders of
//! magnitude (`yocto`, `yotta`, astronomical units, electron-volts, …); keeping the exponent outside of the `f64`
//! keeps the mantissa well inside its precision range and makes epsilon comparisons scale-independent.
//!
//! # Examples
//!
//! ```rust
//! use metrum_core::Decimal;
//!
//! let kilo = Decimal::new(1.0, 3);
//! let milli = Decimal::new(1.0, -3);
//! assert!(kilo.multiply_by(milli).equals_to(Decimal::ONE, Decimal::DEFAULT_EPSILON));
//! assert_eq!(Decimal::from(2500.0).exponent(), 3);
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::error::{UnitError, UnitResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest power of ten applied to an `f64` in one step while rescaling.
const MAX_STEP: i32 = 300;

/// Relative distance under which a mantissa is snapped onto `1` (or `10`).
const SNAP: f64 = 4.0 * f64::EPSILON;

/// A normalized `mantissa * 10^exponent` value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "DecimalRepr"))]
pub struct Decimal {
    mantissa: f64,
    exponent: i32,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DecimalRepr {
    mantissa: f64,
    exponent: i32,
}

#[cfg(feature = "serde")]
impl From<DecimalRepr> for Decimal {
    fn from(repr: DecimalRepr) -> Self {
        Decimal::new(repr.mantissa, repr.exponent)
    }
}

impl Decimal {
    /// The value one.
    pub const ONE: Decimal = Decimal {
        mantissa: 1.0,
        exponent: 0,
    };

    /// The value zero.
    pub const ZERO: Decimal = Decimal {
        mantissa: 0.0,
        exponent: 0,
    };

    /// Absolute tolerance applied to aligned mantissas by [`Decimal::equals_to`] callers that have no better bound.
    pub const DEFAULT_EPSILON: f64 = 1e-12;

    /// Builds `mantissa * 10^exponent`, renormalizing the mantissa.
    ///
    /// ```rust
    /// use metrum_core::Decimal;
    /// let d = Decimal::new(0.25, 2);
    /// assert_eq!(d.exponent(), 1);
    /// assert!((d.mantissa() - 2.5).abs() < 1e-15);
    /// ```
    pub fn new(mantissa: f64, exponent: i32) -> Self {
        if mantissa == 0.0 {
            return Self::ZERO;
        }
        if !mantissa.is_finite() {
            return Self {
                mantissa,
                exponent: 0,
            };
        }

        let shift = mantissa.abs().log10().floor() as i32;
        let mut mantissa = scale(mantissa, -shift);
        let mut exponent = exponent.saturating_add(shift);

        let magnitude = mantissa.abs();
        if (magnitude - 10.0).abs() < 10.0 * SNAP {
            mantissa = mantissa.signum();
            exponent = exponent.saturating_add(1);
        } else if (magnitude - 1.0).abs() < SNAP {
            mantissa = mantissa.signum();
        }

        // log10 may land one step off near exact powers of ten.
        while mantissa.abs() >= 10.0 {
            mantissa /= 10.0;
            exponent = exponent.saturating_add(1);
        }
        while mantissa.abs() < 1.0 {
            mantissa *= 10.0;
            exponent = exponent.saturating_sub(1);
        }

        Self { mantissa, exponent }
    }

    /// The normalized mantissa, `1 <= |m| < 10` or exactly `0`.
    #[inline]
    pub const fn mantissa(&self) -> f64 {
        self.mantissa
    }

    /// The power of ten.
    #[inline]
    pub const fn exponent(&self) -> i32 {
        self.exponent
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    /// `true` only for the exact value one.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.mantissa == 1.0 && self.exponent == 0
    }

    /// `-1`, `0` or `1` following the sign of the mantissa.
    pub fn sign(&self) -> i32 {
        if self.mantissa > 0.0 {
            1
        } else if self.mantissa < 0.0 {
            -1
        } else {
            0
        }
    }

    /// The value as a plain `f64` (may overflow to infinity or underflow to zero).
    pub fn as_f64(&self) -> f64 {
        scale(self.mantissa, self.exponent)
    }

    pub fn multiply_by(self, other: Decimal) -> Decimal {
        if self.is_one() {
            return other;
        }
        if other.is_one() {
            return self;
        }
        Decimal::new(
            self.mantissa * other.mantissa,
            self.exponent.saturating_add(other.exponent),
        )
    }

    /// Divides by `other`.
    ///
    /// # Errors
    ///
    /// [`UnitError::DivisionByZero`] when `other` is zero.
    pub fn divide_by(self, other: Decimal) -> UnitResult<Decimal> {
        if other.is_zero() {
            return Err(UnitError::DivisionByZero);
        }
        if other.is_one() {
            return Ok(self);
        }
        Ok(Decimal::new(
            self.mantissa / other.mantissa,
            self.exponent.saturating_sub(other.exponent),
        ))
    }

    /// Returns `1 / self`.
    ///
    /// # Errors
    ///
    /// [`UnitError::DivisionByZero`] when `self` is zero.
    pub fn inverse(self) -> UnitResult<Decimal> {
        if self.is_zero() {
            return Err(UnitError::DivisionByZero);
        }
        if self.is_one() {
            return Ok(self);
        }
        Ok(Decimal::new(1.0 / self.mantissa, self.exponent.saturating_neg()))
    }

    /// Raises to an integer power by repeated (squared) multiplication.
    ///
    /// `pow(0)` is one for every base, zero included.
    ///
    /// # Errors
    ///
    /// [`UnitError::DivisionByZero`] for a zero base and a negative power.
    pub fn pow(self, n: i32) -> UnitResult<Decimal> {
        if n == 0 {
            return Ok(Decimal::ONE);
        }
        if n == 1 || self.is_one() {
            return Ok(self);
        }
        if self.is_zero() {
            return if n < 0 {
                Err(UnitError::DivisionByZero)
            } else {
                Ok(Decimal::ZERO)
            };
        }

        let mut base = self;
        let mut remaining = n.unsigned_abs();
        let mut acc = Decimal::ONE;
        while remaining > 0 {
            if remaining & 1 == 1 {
                acc = acc.multiply_by(base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.multiply_by(base);
            }
        }

        if n < 0 {
            acc.inverse()
        } else {
            Ok(acc)
        }
    }

    /// Compares two values after aligning them on the larger exponent.
    ///
    /// Mantissas closer than `epsilon` compare equal, so the tolerance is relative to the larger operand.
    ///
    /// ```rust
    /// use core::cmp::Ordering;
    /// use metrum_core::Decimal;
    ///
    /// let a = Decimal::from(9.999_999_999_999_9);
    /// let b = Decimal::from(10.0);
    /// assert_eq!(a.compare_to(b, 1e-12), Ordering::Equal);
    /// assert_eq!(a.compare_to(b, 1e-15), Ordering::Less);
    /// ```
    pub fn compare_to(&self, other: Decimal, epsilon: f64) -> Ordering {
        let reference = match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => other.exponent,
            (false, true) => self.exponent,
            (false, false) => self.exponent.max(other.exponent),
        };

        let lhs = scale(self.mantissa, self.exponent.saturating_sub(reference));
        let rhs = scale(other.mantissa, other.exponent.saturating_sub(reference));
        let diff = lhs - rhs;

        if diff.abs() < epsilon {
            Ordering::Equal
        } else if diff > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }

    /// `compare_to(other, epsilon) == Ordering::Equal`.
    #[inline]
    pub fn equals_to(&self, other: Decimal, epsilon: f64) -> bool {
        self.compare_to(other, epsilon) == Ordering::Equal
    }
}

/// `m * 10^by`, split into steps so intermediate powers stay finite.
fn scale(m: f64, by: i32) -> f64 {
    let mut value = m;
    let mut remaining = by;
    while remaining != 0 && value != 0.0 && value.is_finite() {
        let step = remaining.clamp(-MAX_STEP, MAX_STEP);
        if step > 0 {
            value *= 10f64.powi(step);
        } else {
            value /= 10f64.powi(-step);
        }
        remaining -= step;
    }
    value
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::ZERO
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Decimal::new(value, 0)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal::new(f64::from(value), 0)
    }
}

impl From<Decimal> for f64 {
    fn from(value: Decimal) -> Self {
        value.as_f64()
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.mantissa, self.exponent)
    }
}
