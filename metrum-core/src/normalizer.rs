//! Reduction of raw components to base-unit dimension vectors.
//!
//! A [`TransitionNormalizer`] is configured with a set of base units and one [`TransitionRule`] per derived unit:
//! "one `N` is `1` times `kg m s-2`". Rules may refer to other derived units; the full transitive closure is
//! resolved once when the normalizer is built, so normalizing is a single pass over the input components.
//!
//! # Examples
//!
//! ```rust
//! use metrum_core::{
//!     Decimal, MetricPrefix, Normalizer, TransitionNormalizer, TransitionRule, TransitionTarget, UnitComponent,
//! };
//!
//! let normalizer = TransitionNormalizer::new(
//!     vec![
//!         (
//!             "N",
//!             TransitionRule::new(
//!                 Decimal::ONE,
//!                 vec![
//!                     TransitionTarget::new("g", 1, MetricPrefix::Kilo),
//!                     TransitionTarget::unit("m"),
//!                     TransitionTarget::new("s", -2, MetricPrefix::None),
//!                 ],
//!             ),
//!         ),
//!         ("J", TransitionRule::alias(vec![TransitionTarget::unit("N"), TransitionTarget::unit("m")])),
//!     ],
//!     ["m", "g", "s"],
//! )
//! .unwrap();
//!
//! let form = normalizer.normalize(&[UnitComponent::simple("J", 1)]).unwrap();
//! assert_eq!(form.factor.exponent(), 3);
//! assert_eq!(form.components.len(), 3);
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use log::debug;

use crate::component::UnitComponent;
use crate::decimal::Decimal;
use crate::dimension::{ExponentSum, NormalizedComponent, NormalizedForm};
use crate::error::{UnitError, UnitResult};
use crate::prefix::MetricPrefix;

// ─────────────────────────────────────────────────────────────────────────────
// Transition rules
// ─────────────────────────────────────────────────────────────────────────────

/// One factor of a transition rule: `prefix name ^ exponent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTarget {
    pub name: String,
    pub exponent: i32,
    pub prefix: MetricPrefix,
}

impl TransitionTarget {
    pub fn new(name: impl Into<String>, exponent: i32, prefix: MetricPrefix) -> Self {
        Self {
            name: name.into(),
            exponent,
            prefix,
        }
    }

    /// `name^1`, no prefix.
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, 1, MetricPrefix::None)
    }
}

impl fmt::Display for TransitionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix.symbol(), self.name)?;
        if self.exponent != 1 {
            write!(f, "{}", self.exponent)?;
        }
        Ok(())
    }
}

/// "One of this unit equals `ratio` times the product of `targets`."
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRule {
    pub ratio: Decimal,
    pub targets: Vec<TransitionTarget>,
}

impl TransitionRule {
    pub fn new(ratio: impl Into<Decimal>, targets: Vec<TransitionTarget>) -> Self {
        Self {
            ratio: ratio.into(),
            targets,
        }
    }

    /// A rule with ratio one.
    pub fn alias(targets: Vec<TransitionTarget>) -> Self {
        Self::new(Decimal::ONE, targets)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Normalizer
// ─────────────────────────────────────────────────────────────────────────────

/// Reduces raw components to a factor and a canonical base-unit vector.
pub trait Normalizer: Send + Sync {
    /// # Errors
    ///
    /// [`UnitError::Normalize`] for an abbreviation that is neither a base unit nor a known derived unit.
    fn normalize(&self, components: &[UnitComponent]) -> UnitResult<NormalizedForm>;
}

/// A derived unit expressed directly in base units.
#[derive(Clone, Debug, PartialEq)]
struct ResolvedRule {
    ratio: Decimal,
    components: Vec<NormalizedComponent>,
}

/// Normalizer backed by a fully resolved transition table.
#[derive(Clone, Debug)]
pub struct TransitionNormalizer {
    base_units: BTreeSet<String>,
    resolved: HashMap<String, ResolvedRule>,
}

impl TransitionNormalizer {
    /// Resolves every rule down to base units.
    ///
    /// # Errors
    ///
    /// [`UnitError::Construction`] when:
    /// - the base-unit set is empty,
    /// - a derived unit is defined twice, is also a base unit, or has a zero ratio,
    /// - a rule refers to a name that is neither a base unit nor a derived unit,
    /// - rules refer to each other in a cycle.
    pub fn new<R, N, B, S>(rules: R, base_units: B) -> UnitResult<Self>
    where
        R: IntoIterator<Item = (N, TransitionRule)>,
        N: Into<String>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base_units: BTreeSet<String> = base_units.into_iter().map(Into::into).collect();
        if base_units.is_empty() {
            return Err(UnitError::Construction(
                "at least one base unit must be defined".to_string(),
            ));
        }

        let mut pending: BTreeMap<String, TransitionRule> = BTreeMap::new();
        for (name, rule) in rules {
            let name = name.into();
            if base_units.contains(&name) {
                return Err(UnitError::Construction(format!(
                    "{name:?} is both a base unit and a derived unit"
                )));
            }
            if rule.ratio.is_zero() {
                return Err(UnitError::Construction(format!(
                    "transition ratio of {name:?} is zero"
                )));
            }
            if pending.insert(name.clone(), rule).is_some() {
                return Err(UnitError::Construction(format!(
                    "derived unit {name:?} is defined more than once"
                )));
            }
        }

        let mut resolver = Resolver {
            base_units: &base_units,
            rules: &pending,
            resolved: HashMap::with_capacity(pending.len()),
            in_progress: HashSet::new(),
        };
        for name in pending.keys() {
            resolver.resolve(name)?;
        }
        let resolved = resolver.resolved;

        debug!(
            "resolved {} unit transitions over {} base units",
            resolved.len(),
            base_units.len()
        );

        Ok(Self {
            base_units,
            resolved,
        })
    }

    pub fn base_units(&self) -> impl Iterator<Item = &str> {
        self.base_units.iter().map(String::as_str)
    }

    /// Names of every derived unit, in no particular order.
    pub fn derived_units(&self) -> impl Iterator<Item = &str> {
        self.resolved.keys().map(String::as_str)
    }

    /// `true` when `abbrev` is a base unit or a derived unit.
    pub fn is_known(&self, abbrev: &str) -> bool {
        self.base_units.contains(abbrev) || self.resolved.contains_key(abbrev)
    }
}

impl Normalizer for TransitionNormalizer {
    fn normalize(&self, components: &[UnitComponent]) -> UnitResult<NormalizedForm> {
        let mut factor = Decimal::ONE;
        let mut exponents = ExponentSum::new();

        for component in components {
            factor = factor
                .multiply_by(component.factor.pow(component.exponent.signum())?)
                .multiply_by(component.prefix.factor().pow(component.exponent)?);

            let overflow = || UnitError::normalize(&component.abbrev);

            if self.base_units.contains(&component.abbrev) {
                exponents.add(&component.abbrev, component.exponent).ok_or_else(overflow)?;
                continue;
            }

            let rule = self
                .resolved
                .get(&component.abbrev)
                .ok_or_else(|| UnitError::normalize(&component.abbrev))?;

            factor = factor.multiply_by(rule.ratio.pow(component.exponent)?);
            exponents.add_scaled(&rule.components, component.exponent).ok_or_else(overflow)?;
        }

        Ok(NormalizedForm::new(factor, exponents.into_components()))
    }
}

/// Depth-first closure over the rule graph.
struct Resolver<'a> {
    base_units: &'a BTreeSet<String>,
    rules: &'a BTreeMap<String, TransitionRule>,
    resolved: HashMap<String, ResolvedRule>,
    in_progress: HashSet<String>,
}

impl Resolver<'_> {
    fn resolve(&mut self, name: &str) -> UnitResult<()> {
        if self.resolved.contains_key(name) {
            return Ok(());
        }
        if !self.in_progress.insert(name.to_string()) {
            return Err(UnitError::Construction(format!(
                "unit transitions form a cycle through {name:?}"
            )));
        }

        let rules = self.rules;
        let rule = rules.get(name).ok_or_else(|| {
            UnitError::Construction(format!("no transition known for {name:?}"))
        })?;

        let mut ratio = rule.ratio;
        let mut exponents = ExponentSum::new();

        for target in &rule.targets {
            ratio = ratio.multiply_by(target.prefix.factor().pow(target.exponent)?);

            let overflow = || {
                UnitError::Construction(format!("exponent overflow in the transition of {name:?}"))
            };

            if self.base_units.contains(&target.name) {
                exponents.add(&target.name, target.exponent).ok_or_else(overflow)?;
                continue;
            }
            if !rules.contains_key(&target.name) {
                return Err(UnitError::Construction(format!(
                    "transition of {name:?} refers to unknown unit {:?}",
                    target.name
                )));
            }

            self.resolve(&target.name)?;
            let inner = self.resolved.get(&target.name).ok_or_else(|| {
                UnitError::Construction(format!("{:?} was not resolved", target.name))
            })?;

            ratio = ratio.multiply_by(inner.ratio.pow(target.exponent)?);
            exponents.add_scaled(&inner.components, target.exponent).ok_or_else(overflow)?;
        }

        self.in_progress.remove(name);
        self.resolved.insert(
            name.to_string(),
            ResolvedRule {
                ratio,
                components: exponents.into_components(),
            },
        );
        Ok(())
    }
}
