//! Unit algebra: products and quotients of units simplify to named units.

use metrum::format::{MeasureUnitFormatter, SiUtf8Formatter};
use metrum::{Runtime, UnitsOfMeasure};

fn main() -> anyhow::Result<()> {
    let units = UnitsOfMeasure::default_units()?;
    let si = SiUtf8Formatter;

    let work = units.parse("N")?.multiply_by(&units.parse("m")?)?;
    assert!(work.equals(&units.parse("J")?)?);
    println!("N × m = {} ≡ J", si.format(&work));

    let power = work.divide_by(&units.parse("s")?)?;
    assert!(power.equals(&units.parse("W")?)?);
    println!("J / s = {} ≡ W", si.format(&power));

    let period = units.parse("Hz")?.invert()?;
    let ratio = period.to(&units.parse("ms")?)?;
    println!("1 / Hz → ms: {ratio}");

    let plot = units.parse("fur.rod")?;
    assert!(plot.equals(&units.parse("rood")?)?);
    println!("furlong × rod = {} ≡ rood", si.format(&plot));
    Ok(())
}
