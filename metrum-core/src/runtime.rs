//! Entry points that wire a parser and a normalizer together.
//!
//! A [`Runtime`] turns unit text into [`MeasureUnit`]s and binds values to them. Operations on units and
//! quantities only take [`MeasureUnit`]s; the runtime helpers accept either a unit or its text through
//! [`UnitArg`] and resolve text with [`Runtime::parse`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::decimal::Decimal;
use crate::error::UnitResult;
use crate::normalizer::Normalizer;
use crate::parser::Parser;
use crate::quantity::Quantity;
use crate::ratio::Ratio;
use crate::unit::MeasureUnit;

/// A unit, or text to parse into one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UnitArg<'a> {
    Unit(&'a MeasureUnit),
    Text(&'a str),
}

impl<'a> From<&'a MeasureUnit> for UnitArg<'a> {
    fn from(unit: &'a MeasureUnit) -> Self {
        UnitArg::Unit(unit)
    }
}

impl<'a> From<&'a str> for UnitArg<'a> {
    fn from(text: &'a str) -> Self {
        UnitArg::Text(text)
    }
}

impl<'a> From<&'a String> for UnitArg<'a> {
    fn from(text: &'a String) -> Self {
        UnitArg::Text(text.as_str())
    }
}

/// Parses units and builds quantities.
///
/// There is deliberately no way to register or remove units through a runtime: the unit table is fixed when the
/// runtime is built.
pub trait Runtime: Send + Sync {
    /// Parses and normalizes `text`.
    ///
    /// The empty string is the dimensionless unit, and a plain number is a dimensionless unit scaled by it.
    fn parse(&self, text: &str) -> UnitResult<MeasureUnit>;

    /// Adds the normalized form to a [`raw`](MeasureUnit::raw) unit; normalized units are returned as they are.
    fn normalize(&self, unit: &MeasureUnit) -> UnitResult<MeasureUnit>;

    /// Same as [`Runtime::parse`].
    fn lookup(&self, name: &str) -> UnitResult<MeasureUnit> {
        self.parse(name)
    }

    /// Borrows a given unit, or parses given text.
    fn resolve<'a>(&self, unit: UnitArg<'a>) -> UnitResult<Cow<'a, MeasureUnit>> {
        match unit {
            UnitArg::Unit(unit) => Ok(Cow::Borrowed(unit)),
            UnitArg::Text(text) => self.parse(text).map(Cow::Owned),
        }
    }

    /// Binds `value` to a unit.
    fn quantity<'a, U>(&self, value: f64, unit: U) -> UnitResult<Quantity>
    where
        U: Into<UnitArg<'a>>,
        Self: Sized,
    {
        let unit = self.resolve(unit.into())?;
        Ok(Quantity::new(value, unit.into_owned()))
    }

    /// Ratio converting values in `from` into values in `to`.
    fn ratio<'a, 'b, F, T>(&self, from: F, to: T) -> UnitResult<Ratio>
    where
        F: Into<UnitArg<'a>>,
        T: Into<UnitArg<'b>>,
        Self: Sized,
    {
        let from = self.resolve(from.into())?;
        let to = self.resolve(to.into())?;
        from.to(&to)
    }

    /// `quantity` expressed in `unit`.
    fn convert<'a, U>(&self, quantity: &Quantity, unit: U) -> UnitResult<Quantity>
    where
        U: Into<UnitArg<'a>>,
        Self: Sized,
    {
        let unit = self.resolve(unit.into())?;
        quantity.to(&unit)
    }
}

/// Runtime with one parser and one normalizer and no caching.
#[derive(Clone)]
pub struct NativeRuntime {
    parser: Arc<dyn Parser>,
    normalizer: Arc<dyn Normalizer>,
}

impl NativeRuntime {
    pub fn new(parser: Arc<dyn Parser>, normalizer: Arc<dyn Normalizer>) -> Self {
        Self { parser, normalizer }
    }
}

impl Runtime for NativeRuntime {
    fn parse(&self, text: &str) -> UnitResult<MeasureUnit> {
        if text.is_empty() {
            return Ok(MeasureUnit::dimensionless());
        }
        if let Some(number) = text.parse::<f64>().ok().filter(|n| n.is_finite()) {
            return Ok(MeasureUnit::scalar(Decimal::from(number)));
        }

        let components = self.parser.parse(text)?;
        let form = self.normalizer.normalize(&components)?;
        trace!("parsed {text:?} into {} components", components.len());

        MeasureUnit::new(Decimal::ONE, components, form)
    }

    fn normalize(&self, unit: &MeasureUnit) -> UnitResult<MeasureUnit> {
        if unit.is_normalized() {
            return Ok(unit.clone());
        }

        let mut form = self.normalizer.normalize(unit.components())?;
        form.factor = form.factor.multiply_by(unit.factor());
        MeasureUnit::new(unit.factor(), unit.components().to_vec(), form)
    }
}

impl fmt::Debug for NativeRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeRuntime").finish_non_exhaustive()
    }
}
