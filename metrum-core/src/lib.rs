//! Core unit algebra for runtime dimensional analysis.
//!
//! `metrum-core` parses textual unit expressions (`kg.m.s-2`, `km / h`), reduces every unit to a canonical vector
//! of base-unit exponents, and uses that vector to check compatibility, compute conversion ratios and compose units:
//!
//! - A [`Parser`] turns text into raw [`UnitComponent`]s (factor, [`MetricPrefix`], abbreviation, exponent).
//! - A [`Normalizer`] reduces raw components to a factor and sorted [`NormalizedComponent`]s. The
//!   [`TransitionNormalizer`] resolves a table of derived units ([`TransitionRule`]) once, when it is built.
//! - A [`MeasureUnit`] holds both views and implements multiplication, division, inversion and conversion.
//! - A [`Quantity`] binds an `f64` to a unit; a [`Ratio`] converts values between units.
//! - A [`Runtime`] wires everything together; [`NativeRuntime`] is the plain implementation.
//!
//! All scaling factors are [`Decimal`]s (normalized scientific notation) so that long chains of prefixes and
//! derived-unit ratios do not drift.
//!
//! Most users should depend on `metrum` (the facade crate), which ships the SI, metric and imperial unit tables,
//! a caching runtime and formatters.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use metrum_core::{
//!     MetricPrefix, NativeRuntime, Runtime, SiFormParser, TransitionNormalizer, TransitionRule, TransitionTarget,
//! };
//!
//! let normalizer = TransitionNormalizer::new(
//!     vec![
//!         ("min", TransitionRule::new(60.0, vec![TransitionTarget::unit("s")])),
//!         ("h", TransitionRule::new(60.0, vec![TransitionTarget::unit("min")])),
//!     ],
//!     ["m", "s"],
//! )?;
//! let parser = SiFormParser::new(&["m", "s", "min", "h"], &[])?;
//! let runtime = NativeRuntime::new(Arc::new(parser), Arc::new(normalizer));
//!
//! let speed = runtime.quantity(36.0, "km.h-1")?;
//! let speed = runtime.convert(&speed, "m.s-1")?;
//! assert!((speed.value() - 10.0).abs() < 1e-9);
//! # Ok::<(), metrum_core::UnitError>(())
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Decimal`], [`MetricPrefix`], [`UnitComponent`] and
//!   [`NormalizedComponent`].
//!
//! # Errors
//!
//! Every fallible operation returns [`UnitResult`]; see [`UnitError`] for the failure kinds. Nothing panics on
//! malformed input.

#![forbid(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

mod component;
mod decimal;
mod dimension;
mod error;
mod normalizer;
mod prefix;
mod quantity;
mod ratio;
mod runtime;
mod unit;

pub mod parser;

// ─────────────────────────────────────────────────────────────────────────────
// Public re-exports of core types
// ─────────────────────────────────────────────────────────────────────────────

pub use component::UnitComponent;
pub use decimal::Decimal;
pub use dimension::{NormalizedComponent, NormalizedForm};
pub use error::{UnitError, UnitResult};
pub use normalizer::{Normalizer, TransitionNormalizer, TransitionRule, TransitionTarget};
pub use parser::{ChainedParser, HumanFormParser, Parser, SiFormParser};
pub use prefix::MetricPrefix;
pub use quantity::Quantity;
pub use ratio::Ratio;
pub use runtime::{NativeRuntime, Runtime, UnitArg};
pub use unit::MeasureUnit;
