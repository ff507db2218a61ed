//! Human-readable rendering of units and quantities.
//!
//! The `Display` impls of the core types are terse and meant for logs and error messages ([`DebugFormatter`]).
//! For output shown to people, use [`SiUtf8Formatter`] for units and [`NumberFormatQuantityFormatter`] for
//! quantities:
//!
//! ```rust
//! use metrum::format::{NumberFormatQuantityFormatter, QuantityFormatter};
//! use metrum::{Runtime, UnitsOfMeasure};
//!
//! let units = UnitsOfMeasure::default_units()?;
//! let acceleration = units.quantity(12_345.678, "km.s-2")?;
//! assert_eq!(NumberFormatQuantityFormatter::default().format(&acceleration), "12,345.68 km⋅s⁻²");
//! # Ok::<(), metrum::UnitError>(())
//! ```

use metrum_core::{MeasureUnit, MetricPrefix, Quantity, UnitComponent};

/// Renders a unit as text.
pub trait MeasureUnitFormatter: Send + Sync {
    fn format(&self, unit: &MeasureUnit) -> String;
}

/// Renders a quantity as text.
pub trait QuantityFormatter: Send + Sync {
    fn format(&self, quantity: &Quantity) -> String;
}

// ─────────────────────────────────────────────────────────────────────────────
// SI style
// ─────────────────────────────────────────────────────────────────────────────

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// SI typography: `kg⋅m⋅s⁻²`, with `μ` for micro.
///
/// Factors other than one are printed before the component (or unit) they scale, separated by a space.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiUtf8Formatter;

impl SiUtf8Formatter {
    fn component(component: &UnitComponent) -> String {
        let mut out = String::new();
        if !component.factor.is_one() {
            out.push_str(&component.factor.as_f64().to_string());
            out.push(' ');
        }
        match component.prefix {
            MetricPrefix::Micro => out.push('μ'),
            prefix => out.push_str(prefix.symbol()),
        }
        out.push_str(&component.abbrev);
        if component.exponent != 1 {
            out.push_str(&superscript(component.exponent));
        }
        out
    }
}

impl MeasureUnitFormatter for SiUtf8Formatter {
    fn format(&self, unit: &MeasureUnit) -> String {
        let components = unit
            .components()
            .iter()
            .map(Self::component)
            .collect::<Vec<_>>()
            .join("⋅");

        if unit.factor().is_one() {
            components
        } else if components.is_empty() {
            unit.factor().as_f64().to_string()
        } else {
            format!("{} {components}", unit.factor().as_f64())
        }
    }
}

fn superscript(exponent: i32) -> String {
    let mut out = String::new();
    if exponent < 0 {
        out.push('⁻');
    }
    for digit in exponent.unsigned_abs().to_string().bytes() {
        out.push(SUPERSCRIPT_DIGITS[usize::from(digit - b'0')]);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Grouped numbers
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed decimals with a thousands separator, followed by the unit: `23,000.24 m`.
#[derive(Debug, Clone)]
pub struct NumberFormatQuantityFormatter<F = SiUtf8Formatter> {
    unit_formatter: F,
    decimals: usize,
    decimal_point: String,
    thousands_separator: String,
}

impl Default for NumberFormatQuantityFormatter {
    /// Two decimals, `.` and `,`, SI unit style.
    fn default() -> Self {
        Self::new(SiUtf8Formatter)
    }
}

impl<F: MeasureUnitFormatter> NumberFormatQuantityFormatter<F> {
    pub fn new(unit_formatter: F) -> Self {
        Self::with_separators(unit_formatter, 2, ".", ",")
    }

    pub fn with_separators(
        unit_formatter: F,
        decimals: usize,
        decimal_point: impl Into<String>,
        thousands_separator: impl Into<String>,
    ) -> Self {
        Self {
            unit_formatter,
            decimals,
            decimal_point: decimal_point.into(),
            thousands_separator: thousands_separator.into(),
        }
    }

    fn number(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let fixed = format!("{:.*}", self.decimals, value.abs());
        let (integer, fraction) = match fixed.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
        if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            out.push('-');
        }
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                out.push_str(&self.thousands_separator);
            }
            out.push(digit);
        }
        if let Some(fraction) = fraction {
            out.push_str(&self.decimal_point);
            out.push_str(fraction);
        }
        out
    }
}

impl<F: MeasureUnitFormatter> QuantityFormatter for NumberFormatQuantityFormatter<F> {
    fn format(&self, quantity: &Quantity) -> String {
        format!(
            "{} {}",
            self.number(quantity.value()),
            self.unit_formatter.format(quantity.measure_unit())
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Debug
// ─────────────────────────────────────────────────────────────────────────────

/// The core `Display` rendering (`2 km.s-1`, `3.5 [m]`). For logs, not for end users.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugFormatter;

impl MeasureUnitFormatter for DebugFormatter {
    fn format(&self, unit: &MeasureUnit) -> String {
        unit.to_string()
    }
}

impl QuantityFormatter for DebugFormatter {
    fn format(&self, quantity: &Quantity) -> String {
        quantity.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrum_core::Decimal;

    /// Prints a fixed string, whatever the unit.
    struct Fixed;

    impl MeasureUnitFormatter for Fixed {
        fn format(&self, _: &MeasureUnit) -> String {
            "unit".to_string()
        }
    }

    fn quantity(value: f64) -> Quantity {
        Quantity::new(value, MeasureUnit::dimensionless())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // SI style
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn empty_unit() {
        assert_eq!(SiUtf8Formatter.format(&MeasureUnit::dimensionless()), "");
    }

    #[test]
    fn factor_only() {
        let unit = MeasureUnit::raw(Decimal::from(2.0), vec![]);
        assert_eq!(SiUtf8Formatter.format(&unit), "2");
    }

    #[test]
    fn complex_unit() {
        let unit = MeasureUnit::raw(
            Decimal::from(2.0),
            vec![
                UnitComponent::simple("first", 1_234_567_890),
                UnitComponent::new(Decimal::from(3.0), MetricPrefix::Micro, "second", -23),
                UnitComponent::new(Decimal::ONE, MetricPrefix::Kilo, "third", 1),
            ],
        );
        assert_eq!(
            SiUtf8Formatter.format(&unit),
            "2 first¹²³⁴⁵⁶⁷⁸⁹⁰⋅3 μsecond⁻²³⋅kthird"
        );
    }

    #[test]
    fn superscripts() {
        assert_eq!(superscript(2), "²");
        assert_eq!(superscript(-1), "⁻¹");
        assert_eq!(superscript(10), "¹⁰");
        assert_eq!(superscript(i32::MIN), "⁻²¹⁴⁷⁴⁸³⁶⁴⁸");
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Grouped numbers
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn default_grouping() {
        let formatter = NumberFormatQuantityFormatter::new(Fixed);
        assert_eq!(formatter.format(&quantity(23_000.237)), "23,000.24 unit");
        assert_eq!(formatter.format(&quantity(999.0)), "999.00 unit");
        assert_eq!(formatter.format(&quantity(1_234_567.0)), "1,234,567.00 unit");
    }

    #[test]
    fn custom_separators() {
        let formatter = NumberFormatQuantityFormatter::with_separators(Fixed, 3, ",", ".");
        assert_eq!(formatter.format(&quantity(23_000.2378)), "23.000,238 unit");
    }

    #[test]
    fn no_decimals_and_negatives() {
        let formatter = NumberFormatQuantityFormatter::with_separators(Fixed, 0, ".", " ");
        assert_eq!(formatter.format(&quantity(-1_500_000.4)), "-1 500 000 unit");
        assert_eq!(formatter.format(&quantity(-0.2)), "0 unit");
    }

    #[test]
    fn debug_uses_display() {
        let q = Quantity::new(3.5, MeasureUnit::raw(Decimal::ONE, vec![UnitComponent::simple("m", 1)]));
        assert_eq!(QuantityFormatter::format(&DebugFormatter, &q), "3.5 [m]");
        assert_eq!(MeasureUnitFormatter::format(&DebugFormatter, q.measure_unit()), "m");
    }
}
