//! The ready-to-use runtime and its builder.

use std::sync::Arc;

use log::debug;

use metrum_core::{
    ChainedParser, HumanFormParser, MeasureUnit, NativeRuntime, Parser, Runtime, SiFormParser,
    TransitionNormalizer, TransitionRule, UnitResult,
};

use crate::cached::CachedRuntime;
use crate::config::{ConfigError, UnitTableConfig};
use crate::units;

/// A [`Runtime`] over a fixed unit table, with a parse cache.
///
/// Build one with [`UnitsOfMeasure::builder`], or take [`UnitsOfMeasure::default_units`] for SI, the other metric
/// units and the imperial units, parsed with both grammars.
///
/// ```rust
/// use metrum::{Runtime, UnitsOfMeasure};
///
/// let units = UnitsOfMeasure::default_units()?;
/// let force = units.quantity(2.0, "N")?.multiply_by(&units.quantity(3.0, "m")?)?;
/// assert!(force.equals(&units.quantity(6.0, "J")?)?);
/// # Ok::<(), metrum::UnitError>(())
/// ```
#[derive(Debug)]
pub struct UnitsOfMeasure {
    runtime: CachedRuntime<NativeRuntime>,
}

impl UnitsOfMeasure {
    pub fn builder() -> UnitsOfMeasureBuilder {
        UnitsOfMeasureBuilder::default()
    }

    /// Every built-in table, SI grammar first with the human-form grammar as fallback.
    pub fn default_units() -> UnitResult<Self> {
        Self::builder().with_defaults().permissive(true).build()
    }

    /// Forget every parsed unit.
    pub fn clear_cache(&self) {
        self.runtime.clear();
    }

    /// Number of distinct unit strings parsed so far.
    pub fn cached_units(&self) -> usize {
        self.runtime.len()
    }
}

impl Runtime for UnitsOfMeasure {
    fn parse(&self, text: &str) -> UnitResult<MeasureUnit> {
        self.runtime.parse(text)
    }

    fn normalize(&self, unit: &MeasureUnit) -> UnitResult<MeasureUnit> {
        self.runtime.normalize(unit)
    }
}

/// Collects unit definitions for a [`UnitsOfMeasure`].
///
/// Base units and derived units accept metric prefixes; non-prefixed units do not. Nothing is validated until
/// [`build`](UnitsOfMeasureBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct UnitsOfMeasureBuilder {
    base_units: Vec<String>,
    derived: Vec<(String, TransitionRule)>,
    non_prefixed: Vec<(String, TransitionRule)>,
    permissive: bool,
}

impl UnitsOfMeasureBuilder {
    /// Adds every table of [`units`](crate::units).
    pub fn with_defaults(mut self) -> Self {
        self.base_units
            .extend(units::si_base_units().into_iter().map(String::from));
        self.derived.extend(
            units::si_derived_units()
                .into_iter()
                .chain(units::other_metric_units())
                .map(|(name, rule)| (name.to_string(), rule)),
        );
        self.non_prefixed.extend(
            units::imperial_units()
                .into_iter()
                .map(|(name, rule)| (name.to_string(), rule)),
        );
        self
    }

    pub fn base_unit(mut self, name: impl Into<String>) -> Self {
        self.base_units.push(name.into());
        self
    }

    /// A unit that accepts metric prefixes.
    pub fn derived_unit(mut self, name: impl Into<String>, rule: TransitionRule) -> Self {
        self.derived.push((name.into(), rule));
        self
    }

    /// A unit that never takes a prefix.
    pub fn non_prefixed_unit(mut self, name: impl Into<String>, rule: TransitionRule) -> Self {
        self.non_prefixed.push((name.into(), rule));
        self
    }

    /// Adds the definitions of a loaded unit table.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownPrefix`] and [`ConfigError::InvalidRatio`] for bad definitions.
    pub fn with_config(mut self, config: &UnitTableConfig) -> Result<Self, ConfigError> {
        self.base_units.extend(config.base_units.iter().cloned());
        self.derived.extend(config.derived_rules()?);
        self.non_prefixed.extend(config.non_prefixed_rules()?);
        Ok(self)
    }

    /// Falls back to [`HumanFormParser`] (`km/h`, `kg m / s2`) when the SI grammar rejects the input.
    pub fn permissive(mut self, permissive: bool) -> Self {
        self.permissive = permissive;
        self
    }

    /// # Errors
    ///
    /// [`UnitError::Construction`](metrum_core::UnitError::Construction) when the definitions are inconsistent:
    /// no base unit, a unit defined twice, a definition referring to an unknown unit, or a cycle.
    pub fn build(self) -> UnitResult<UnitsOfMeasure> {
        let prefixable: Vec<&str> = self
            .base_units
            .iter()
            .chain(self.derived.iter().map(|(name, _)| name))
            .map(String::as_str)
            .collect();
        let standalone: Vec<&str> = self.non_prefixed.iter().map(|(name, _)| name.as_str()).collect();

        let normalizer = TransitionNormalizer::new(
            self.derived.iter().chain(self.non_prefixed.iter()).cloned(),
            self.base_units.iter().cloned(),
        )?;

        let si: Arc<dyn Parser> = Arc::new(SiFormParser::new(&prefixable, &standalone)?);
        let parser: Arc<dyn Parser> = if self.permissive {
            let human: Arc<dyn Parser> = Arc::new(HumanFormParser::new(&prefixable, &standalone)?);
            Arc::new(ChainedParser::new(vec![si, human])?)
        } else {
            si
        };

        debug!(
            "built units of measure: {} prefixable, {} non-prefixed, permissive = {}",
            prefixable.len(),
            standalone.len(),
            self.permissive
        );

        Ok(UnitsOfMeasure {
            runtime: CachedRuntime::new(NativeRuntime::new(parser, Arc::new(normalizer))),
        })
    }
}
