//! Prints one quantity in several units with grouped number formatting.

use metrum::format::{NumberFormatQuantityFormatter, QuantityFormatter};
use metrum::{Runtime, UnitsOfMeasure};

fn main() -> anyhow::Result<()> {
    let units = UnitsOfMeasure::default_units()?;
    let formatter = NumberFormatQuantityFormatter::default();

    let marathon = units.quantity(42.195, "km")?;
    for target in ["m", "mi", "yd", "ft", "fur", "NM"] {
        let converted = units.convert(&marathon, target)?;
        println!("{:>16}", formatter.format(&converted));
    }

    let pressure = units.quantity(1.0, "atm")?;
    for target in ["Pa", "hPa", "bar", "mmHg", "at"] {
        let converted = units.convert(&pressure, target)?;
        println!("{:>16}", formatter.format(&converted));
    }

    println!("{} units parsed", units.cached_units());
    Ok(())
}
