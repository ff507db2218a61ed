//! Serialization of the core value types (requires the `serde` feature).
#![cfg(feature = "serde")]

use metrum::*;

#[test]
fn decimal_is_renormalized_on_read() {
    let json = serde_json::to_string(&Decimal::from(1500.0)).unwrap();
    assert_eq!(json, r#"{"mantissa":1.5,"exponent":3}"#);

    let decimal: Decimal = serde_json::from_str(r#"{"mantissa":150.0,"exponent":1}"#).unwrap();
    assert_eq!(decimal.mantissa(), 1.5);
    assert_eq!(decimal.exponent(), 3);
}

#[test]
fn components_of_a_parsed_unit() {
    let units = UnitsOfMeasure::default_units().unwrap();
    let unit = units.parse("2 km.s-2").unwrap();

    let json = serde_json::to_string(unit.components()).unwrap();
    let back: Vec<UnitComponent> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, unit.components());
    assert_eq!(back[0].prefix, MetricPrefix::Kilo);

    let dimension = serde_json::to_value(unit.dimension().unwrap()).unwrap();
    assert_eq!(
        dimension,
        serde_json::json!([{ "abbrev": "m", "exponent": 1 }, { "abbrev": "s", "exponent": -2 }])
    );
}
