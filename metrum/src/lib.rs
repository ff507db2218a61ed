//! Physical units at runtime: parse unit expressions, convert and combine quantities.
//!
//! `metrum` is the user-facing crate in this workspace. It re-exports the full API from `metrum-core` and adds what
//! an application needs around it:
//!
//! - [`units`]: built-in tables for SI, other metric and imperial units.
//! - [`UnitsOfMeasure`]: a ready-to-use [`Runtime`] over those tables, with a parse cache ([`CachedRuntime`]).
//! - [`config`]: extra unit tables loaded from TOML files.
//! - [`format`]: SI-style rendering of units and grouped rendering of numbers.
//!
//! The core idea is: units are values, not types. A unit such as `kg.m.s-2` is parsed at runtime, reduced to a
//! factor and a vector of base-unit exponents, and that vector decides which units can be added, converted or
//! simplified into each other.
//!
//! # What this crate solves
//!
//! - Units that are only known at runtime (user input, files, configuration).
//! - Conversion between any two units of the same dimension, including reciprocal ones (`Hz` → `s`).
//! - Unit algebra: `N` × `m` is `J`, `J` / `m` is `N`.
//!
//! # What this crate does not try to solve
//!
//! - Compile-time dimension checking; incompatible units are reported as [`UnitError::Conversion`].
//! - Affine units such as degrees Celsius: every conversion is a pure scale factor.
//! - Exact arithmetic: values are `f64`, scale factors are base-10 [`Decimal`]s backed by `f64`.
//!
//! # Quick start
//!
//! ```rust
//! use metrum::{Runtime, UnitsOfMeasure};
//!
//! let units = UnitsOfMeasure::default_units()?;
//!
//! let trip = units.quantity(1.0, "h")?.add(&units.quantity(15.0, "min")?)?;
//! assert!(trip.equals(&units.quantity(1.25, "h")?)?);
//!
//! let speed = units.quantity(90.0, "km/h")?;
//! let speed = units.convert(&speed, "m.s-1")?;
//! assert!((speed.value() - 25.0).abs() < 1e-9);
//!
//! let ratio = units.ratio("2 Hz", "s")?;
//! assert!(ratio.is_inverted());
//! # Ok::<(), metrum::UnitError>(())
//! ```
//!
//! # Errors
//!
//! Operations return [`UnitResult`]. Loading a unit table returns [`ConfigError`], which wraps [`UnitError`] for
//! table inconsistencies.
//!
//! # Feature flags
//!
//! - `serde`: enables `serde` support for the core value types (see `metrum-core`).
//!
//! # SemVer and stability
//!
//! This workspace is currently `0.x`. Expect breaking changes between minor versions until `1.0`.

#![forbid(unsafe_code)]

pub use metrum_core::*;

mod cached;
mod units_of_measure;

pub mod config;
pub mod format;
pub mod units;

pub use cached::CachedRuntime;
pub use config::{ConfigError, UnitTableConfig};
pub use format::{
    DebugFormatter, MeasureUnitFormatter, NumberFormatQuantityFormatter, QuantityFormatter, SiUtf8Formatter,
};
pub use units_of_measure::{UnitsOfMeasure, UnitsOfMeasureBuilder};
