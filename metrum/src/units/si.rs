//! SI units.
//!
//! Named derived units are defined through each other where the SI brochure does (`W = J/s`, `J = N m`, ...);
//! the normalizer resolves the chains once. Radian and steradian reduce to nothing, so plane and solid angles are
//! dimensionless.
//!
//! Notes on definitions used here:
//!
//! - **Astronomical unit (au)** is **exactly** `149_597_870_700 m` (IAU 2012).
//! - **Electronvolt (eV)** is **exactly** `1.602_176_634e-19 J` (SI 2019).
//! - **Litre** is accepted as both `l` and `L`.

use core::f64::consts::PI;

use metrum_core::{Decimal, MetricPrefix, TransitionRule, TransitionTarget};

use super::{power, prefixed, unit, UnitDefinition};

/// Metre, second, gram, kelvin, ampere, mole and candela.
pub fn si_base_units() -> Vec<&'static str> {
    vec!["m", "s", "g", "K", "A", "mol", "cd"]
}

/// Named SI derived units and the non-SI units accepted for use with SI.
pub fn si_derived_units() -> Vec<UnitDefinition> {
    vec![
        // Accepted non-SI units
        ("au", TransitionRule::new(149_597_870_700.0, vec![unit("m")])),
        ("deg", TransitionRule::new(PI / 180.0, vec![unit("rad")])),
        ("ha", TransitionRule::new(Decimal::new(1.0, 4), vec![power("m", 2)])),
        ("eV", TransitionRule::new(Decimal::new(1.602_176_634, -19), vec![unit("J")])),
        ("t", TransitionRule::new(Decimal::new(1.0, 6), vec![unit("g")])),
        ("h", TransitionRule::new(60.0, vec![unit("min")])),
        ("min", TransitionRule::new(60.0, vec![unit("s")])),
        ("L", TransitionRule::alias(vec![unit("l")])),
        ("l", TransitionRule::new(Decimal::new(1.0, -3), vec![power("m", 3)])),
        // Mechanics and electromagnetism
        ("N", TransitionRule::alias(vec![prefixed(MetricPrefix::Kilo, "g"), unit("m"), power("s", -2)])),
        ("J", TransitionRule::alias(vec![unit("N"), unit("m")])),
        ("W", TransitionRule::alias(vec![unit("J"), power("s", -1)])),
        ("Pa", TransitionRule::alias(vec![unit("N"), power("m", -2)])),
        ("C", TransitionRule::alias(vec![unit("s"), unit("A")])),
        ("V", TransitionRule::alias(vec![unit("W"), power("A", -1)])),
        ("F", TransitionRule::alias(vec![unit("C"), power("V", -1)])),
        ("Wb", TransitionRule::alias(vec![unit("V"), unit("s")])),
        ("T", TransitionRule::alias(vec![unit("Wb"), power("m", -2)])),
        ("H", TransitionRule::alias(vec![unit("Wb"), power("A", -1)])),
        ("ohm", TransitionRule::alias(vec![unit("V"), power("A", -1)])),
        ("S", TransitionRule::alias(vec![power("ohm", -1)])),
        // Angles, light and radiation
        ("rad", TransitionRule::alias(vec![])),
        ("sr", TransitionRule::alias(vec![power("rad", 2)])),
        ("lm", TransitionRule::alias(vec![unit("cd"), unit("sr")])),
        ("lx", TransitionRule::alias(vec![unit("lm"), power("m", -2)])),
        ("Hz", TransitionRule::alias(vec![power("s", -1)])),
        ("Bq", TransitionRule::alias(vec![power("s", -1)])),
        ("Gy", TransitionRule::alias(vec![unit("J"), per_kilogram()])),
        ("Sv", TransitionRule::alias(vec![unit("J"), per_kilogram()])),
        ("kat", TransitionRule::alias(vec![unit("mol"), power("s", -1)])),
    ]
}

fn per_kilogram() -> TransitionTarget {
    TransitionTarget::new("g", -1, MetricPrefix::Kilo)
}
