//! Integration-level conversion tests for the built-in unit tables.

use metrum::*;

use approx::assert_relative_eq;

/// Built-in tables, SI grammar only.
fn units() -> UnitsOfMeasure {
    UnitsOfMeasure::builder().with_defaults().build().unwrap()
}

/// Asserts `from` converts into `to` with the given factor and direction, for every row.
fn assert_conversions(rows: &[(&str, &str, f64, bool)]) {
    let units = units();
    for &(from, to, factor, inverted) in rows {
        let ratio = units
            .ratio(from, to)
            .unwrap_or_else(|e| panic!("{from} -> {to}: {e}"));
        assert_eq!(ratio.is_inverted(), inverted, "{from} -> {to}");
        assert_relative_eq!(ratio.factor().as_f64(), factor, max_relative = 1e-12);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SI
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn basic_and_time() {
    assert_conversions(&[
        ("m", "m", 1.0, false),
        ("cm", "m", 0.01, false),
        ("m", "cm", 100.0, false),
        ("km.h-1", "m.s-1", 10.0 / 36.0, false),
        ("2 Hz", "s", 2.0, true),
        ("h", "s", 3600.0, false),
        ("h", "min", 60.0, false),
    ]);
}

#[test]
fn angles_area_and_energy() {
    assert_conversions(&[
        ("au", "m", 149_597_870_700.0, false),
        ("deg", "rad", 0.017_453_292_519_943_3, false),
        ("90 deg", "rad", std::f64::consts::FRAC_PI_2, false),
        ("ha", "km2", 0.01, false),
        ("ha", "m2", 10_000.0, false),
        ("eV", "J", 1.602_176_634e-19, false),
    ]);
}

#[test]
fn named_derived_units() {
    assert_conversions(&[
        ("J.s-1", "W", 1.0, false),
        ("N.m-2", "Pa", 1.0, false),
        ("A.s", "C", 1.0, false),
        ("W.A-1", "V", 1.0, false),
        ("C.V-1", "F", 1.0, false),
        ("V.s", "Wb", 1.0, false),
        ("Wb.m-2", "T", 1.0, false),
        ("Wb.A-1", "H", 1.0, false),
        ("V.A-1", "ohm", 1.0, false),
        ("ohm-1", "S", 1.0, false),
        ("N.m", "J", 1.0, false),
        ("kg.m.s-2", "N", 1.0, false),
        ("rad2", "sr", 1.0, false),
        ("cd.sr", "lm", 1.0, false),
        ("lm.m-2", "lx", 1.0, false),
        ("s-1", "Bq", 1.0, false),
        ("s", "Bq", 1.0, true),
        ("J.kg-1", "Gy", 1.0, false),
        ("J.kg-1", "Sv", 1.0, false),
        ("mol.s-1", "kat", 1.0, false),
    ]);
}

#[test]
fn angles_are_dimensionless() {
    // sr reduces to nothing, so cd.sr-1 and cd.sr share a dimension.
    assert_conversions(&[("cd.sr-1", "lm", 1.0, false), ("rad", "", 1.0, false)]);
}

#[test]
fn mass_and_volume() {
    assert_conversions(&[
        ("t", "kg", 1000.0, false),
        ("L", "dm3", 1.0, false),
        ("L", "m3", 0.001, false),
        ("l", "L", 1.0, false),
        ("ml", "cm3", 1.0, false),
    ]);
}

#[test]
fn pressure() {
    assert_conversions(&[
        ("bar", "kPa", 100.0, false),
        ("at", "Pa", 98_066.5, false),
        ("atm", "Pa", 101_325.0, false),
        ("mmHg", "Pa", 133.322_387_415, false),
        ("mbar", "hPa", 1.0, false),
    ]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Imperial
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn imperial_lengths() {
    assert_conversions(&[
        ("th", "m", 2.54e-5, false),
        ("in", "m", 0.0254, false),
        ("ft", "m", 0.3048, false),
        ("yd", "m", 0.9144, false),
        ("ch", "m", 20.1168, false),
        ("fur", "m", 201.168, false),
        ("mi", "m", 1_609.344, false),
        ("lea", "m", 4_828.032, false),
        ("ftm", "m", 1.8288, false),
        ("cable", "m", 182.88, false),
        ("M", "m", 1_828.8, false),
        ("NM", "M", 1.0, false),
        ("nmi", "M", 1.0, false),
        ("link", "m", 0.201_168, false),
        ("rod", "m", 5.0292, false),
    ]);
}

#[test]
fn imperial_areas() {
    assert_conversions(&[
        ("perch", "m2", 25.292_852_64, false),
        ("rood", "m2", 1_011.714_105_6, false),
        ("acre", "m2", 4_046.856_422_4, false),
        ("rod2", "perch", 1.0, false),
        ("fur.rod", "rood", 1.0, false),
        ("2 fur.3 rod", "6 rood", 1.0, false),
        ("ch.fur", "acre", 1.0, false),
    ]);
}

#[test]
fn imperial_units_take_no_prefix() {
    let units = units();
    for text in ["kft", "cin", "Macre"] {
        assert!(
            matches!(units.parse(text), Err(UnitError::Parse { .. })),
            "{text} should not parse"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Failures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn incompatible_units() {
    let units = units();
    for (from, to) in [("kg", ""), ("m2", "m"), ("N", "kg.m.s-3"), ("acre", "ft")] {
        let err = units.ratio(from, to).unwrap_err();
        assert!(matches!(err, UnitError::Conversion { .. }), "{from} -> {to}: {err}");
    }
}

#[test]
fn unknown_units() {
    let units = units();
    assert!(matches!(units.parse("furlong"), Err(UnitError::Parse { .. })));
    assert!(matches!(units.parse("10 10 m"), Err(UnitError::Parse { .. })));
}
