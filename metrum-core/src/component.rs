//! Raw unit components, one per token of a parsed unit expression.

use core::fmt;

use crate::decimal::Decimal;
use crate::prefix::MetricPrefix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One parsed token: `factor prefix abbrev^exponent`.
///
/// `3 km2` is factor 3, prefix kilo, abbreviation `m`, exponent 2.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitComponent {
    pub factor: Decimal,
    pub prefix: MetricPrefix,
    pub abbrev: String,
    pub exponent: i32,
}

impl UnitComponent {
    pub fn new(factor: Decimal, prefix: MetricPrefix, abbrev: impl Into<String>, exponent: i32) -> Self {
        Self {
            factor,
            prefix,
            abbrev: abbrev.into(),
            exponent,
        }
    }

    /// An unprefixed, factor-one component.
    pub fn simple(abbrev: impl Into<String>, exponent: i32) -> Self {
        Self::new(Decimal::ONE, MetricPrefix::None, abbrev, exponent)
    }

    /// Same component with the exponent negated, or `None` for an exponent of `i32::MIN`.
    pub fn inverted(&self) -> Option<Self> {
        Some(Self {
            exponent: self.exponent.checked_neg()?,
            ..self.clone()
        })
    }

    /// `true` when both components differ at most by exponent, i.e. they can be merged by summing exponents.
    pub fn same_base(&self, other: &UnitComponent) -> bool {
        self.abbrev == other.abbrev && self.prefix == other.prefix && self.factor == other.factor
    }
}

impl fmt::Display for UnitComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.factor.is_one() {
            write!(f, "{} ", self.factor.as_f64())?;
        }
        write!(f, "{}{}", self.prefix.symbol(), self.abbrev)?;
        if self.exponent != 1 {
            write!(f, "{}", self.exponent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_grammar() {
        let c = UnitComponent::new(Decimal::from(10.0), MetricPrefix::Kilo, "m", 2);
        assert_eq!(c.to_string(), "10 km2");
        assert_eq!(UnitComponent::simple("s", -1).to_string(), "s-1");
        assert_eq!(UnitComponent::simple("mol", 1).to_string(), "mol");
    }

    #[test]
    fn merge_key_ignores_exponent() {
        let a = UnitComponent::new(Decimal::ONE, MetricPrefix::Kilo, "m", 1);
        let b = a.inverted().unwrap();
        assert!(a.same_base(&b));
        assert_eq!(b.exponent, -1);
        assert!(!a.same_base(&UnitComponent::simple("m", 1)));
    }

    #[test]
    fn most_negative_exponent_has_no_inverse() {
        assert_eq!(UnitComponent::simple("m", i32::MIN).inverted(), None);
        assert_eq!(UnitComponent::simple("m", i32::MAX).inverted().unwrap().exponent, -i32::MAX);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn serialize_component() {
            let c = UnitComponent::new(Decimal::from(15.0), MetricPrefix::Kilo, "m", -2);
            let json = serde_json::to_value(&c).unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "factor": { "mantissa": 1.5, "exponent": 1 },
                    "prefix": "Kilo",
                    "abbrev": "m",
                    "exponent": -2
                })
            );
        }

        #[test]
        fn serde_roundtrip() {
            let original = UnitComponent::new(Decimal::new(2.5, -1), MetricPrefix::Micro, "s", 3);
            let json = serde_json::to_string(&original).unwrap();
            let restored: UnitComponent = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, original);
        }
    }
}
