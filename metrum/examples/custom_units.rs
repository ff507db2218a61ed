//! Extends the built-in tables with units defined in TOML.

use metrum::{Runtime, UnitTableConfig, UnitsOfMeasure};

const TABLE: &str = r#"
[derived.Wh]
ratio = 3600
targets = [{ name = "J" }]

[non_prefixed.smoot]
ratio = 1.7018
targets = [{ name = "m" }]
"#;

fn main() -> anyhow::Result<()> {
    let config: UnitTableConfig = TABLE.parse()?;
    let units = UnitsOfMeasure::builder()
        .with_defaults()
        .with_config(&config)?
        .permissive(true)
        .build()?;

    let battery = units.quantity(75.0, "kWh")?;
    let battery = units.convert(&battery, "MJ")?;
    assert!((battery.value() - 270.0).abs() < 1e-9);
    println!("75 kWh = {battery}");

    let bridge = units.convert(&units.quantity(364.4, "smoot")?, "m")?;
    println!("Harvard Bridge: {bridge}");
    Ok(())
}
