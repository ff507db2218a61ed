//! Minimal end-to-end example: parse units, add and convert quantities.

use metrum::{Runtime, UnitsOfMeasure};

fn main() -> anyhow::Result<()> {
    let units = UnitsOfMeasure::default_units()?;

    let trip = units.quantity(1.0, "h")?.add(&units.quantity(15.0, "min")?)?;
    assert!(trip.equals(&units.quantity(1.25, "h")?)?);

    let speed = units.quantity(120.0, "km/h")?;
    let speed = units.convert(&speed, "m.s-1")?;
    assert!((speed.value() - 33.333_333_333).abs() < 1e-6);

    println!("{trip} at {speed}");
    Ok(())
}
