//! Unit tables from TOML files.
//!
//! A table adds base units, derived units (which accept metric prefixes) and non-prefixed units on top of, or
//! instead of, the built-in [`units`](crate::units):
//!
//! ```toml
//! base_units = ["kn"]
//!
//! [derived.euro]
//! ratio = 7.13
//! targets = [{ name = "kn" }]
//!
//! [derived.N]
//! targets = [{ name = "g", prefix = "k" }, { name = "m" }, { name = "s", exponent = -2 }]
//!
//! [non_prefixed.ft]
//! ratio = 304.8
//! targets = [{ name = "m", prefix = "m" }]
//! ```
//!
//! `ratio` defaults to 1, `exponent` to 1 and `prefix` to none.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use metrum_core::{MetricPrefix, TransitionRule, TransitionTarget, UnitError};

/// Errors raised while loading a unit table or building units from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read unit table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse unit table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown metric prefix {prefix:?} in the definition of {unit:?}")]
    UnknownPrefix { unit: String, prefix: String },

    #[error("Ratio of {unit:?} must be finite and non-zero, got {ratio}")]
    InvalidRatio { unit: String, ratio: f64 },

    #[error(transparent)]
    Unit(#[from] UnitError),
}

/// A unit table, as written in TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitTableConfig {
    #[serde(default)]
    pub base_units: Vec<String>,
    /// Units that accept metric prefixes.
    #[serde(default)]
    pub derived: BTreeMap<String, UnitDefinitionConfig>,
    /// Units that never take a prefix (imperial units, mostly).
    #[serde(default)]
    pub non_prefixed: BTreeMap<String, UnitDefinitionConfig>,
}

/// `1 unit = ratio * targets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinitionConfig {
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default = "default_exponent")]
    pub exponent: i32,
}

fn default_ratio() -> f64 {
    1.0
}

fn default_exponent() -> i32 {
    1
}

impl UnitTableConfig {
    /// Load a unit table from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: UnitTableConfig = content.parse()?;
        info!(
            "loaded unit table from {}: {} base, {} derived, {} non-prefixed units",
            path.display(),
            config.base_units.len(),
            config.derived.len(),
            config.non_prefixed.len()
        );
        Ok(config)
    }

    /// Rules for the prefixable units, checked.
    pub fn derived_rules(&self) -> Result<Vec<(String, TransitionRule)>, ConfigError> {
        Self::rules(&self.derived)
    }

    /// Rules for the non-prefixed units, checked.
    pub fn non_prefixed_rules(&self) -> Result<Vec<(String, TransitionRule)>, ConfigError> {
        Self::rules(&self.non_prefixed)
    }

    fn rules(
        table: &BTreeMap<String, UnitDefinitionConfig>,
    ) -> Result<Vec<(String, TransitionRule)>, ConfigError> {
        table
            .iter()
            .map(|(name, definition)| Ok((name.clone(), definition.to_rule(name)?)))
            .collect()
    }
}

impl FromStr for UnitTableConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl UnitDefinitionConfig {
    fn to_rule(&self, unit: &str) -> Result<TransitionRule, ConfigError> {
        if !self.ratio.is_finite() || self.ratio == 0.0 {
            return Err(ConfigError::InvalidRatio {
                unit: unit.to_string(),
                ratio: self.ratio,
            });
        }

        let targets = self
            .targets
            .iter()
            .map(|target| target.to_target(unit))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TransitionRule::new(self.ratio, targets))
    }
}

impl TargetConfig {
    fn to_target(&self, unit: &str) -> Result<TransitionTarget, ConfigError> {
        let prefix = match self.prefix.as_deref() {
            None | Some("") => MetricPrefix::None,
            Some(symbol) => MetricPrefix::from_symbol(symbol).ok_or_else(|| ConfigError::UnknownPrefix {
                unit: unit.to_string(),
                prefix: symbol.to_string(),
            })?,
        };
        Ok(TransitionTarget::new(self.name.clone(), self.exponent, prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = r#"
base_units = ["kn"]

[derived.euro]
ratio = 7.13
targets = [{ name = "kn" }]

[derived.N]
targets = [{ name = "g", prefix = "k" }, { name = "m" }, { name = "s", exponent = -2 }]

[non_prefixed.ft]
ratio = 304.8
targets = [{ name = "m", prefix = "m" }]
"#;

    #[test]
    fn parse_full_table() {
        let config: UnitTableConfig = TABLE.parse().unwrap();
        assert_eq!(config.base_units, vec!["kn".to_string()]);
        assert_eq!(config.derived.len(), 2);

        let newton = &config.derived["N"];
        assert_eq!(newton.ratio, 1.0);
        assert_eq!(newton.targets[0].prefix.as_deref(), Some("k"));
        assert_eq!(newton.targets[1].exponent, 1);
        assert_eq!(newton.targets[2].exponent, -2);
    }

    #[test]
    fn rules_carry_prefixes_and_ratios() {
        let config: UnitTableConfig = TABLE.parse().unwrap();

        let derived = config.derived_rules().unwrap();
        let (name, rule) = &derived[0];
        assert_eq!(name, "N");
        assert!(rule.ratio.is_one());
        assert_eq!(rule.targets[0], TransitionTarget::new("g", 1, MetricPrefix::Kilo));

        let non_prefixed = config.non_prefixed_rules().unwrap();
        assert_eq!(non_prefixed[0].0, "ft");
        assert_eq!(non_prefixed[0].1.targets, vec![TransitionTarget::new("m", 1, MetricPrefix::Milli)]);
    }

    #[test]
    fn empty_document_is_an_empty_table() {
        let config: UnitTableConfig = "".parse().unwrap();
        assert_eq!(config, UnitTableConfig::default());
    }

    #[test]
    fn unknown_prefix() {
        let config: UnitTableConfig = r#"
[derived.x]
targets = [{ name = "m", prefix = "Q" }]
"#
        .parse()
        .unwrap();
        assert!(matches!(
            config.derived_rules(),
            Err(ConfigError::UnknownPrefix { ref unit, ref prefix }) if unit == "x" && prefix == "Q"
        ));
    }

    #[test]
    fn zero_ratio() {
        let config: UnitTableConfig = "[derived.x]\nratio = 0.0\n".parse().unwrap();
        assert!(matches!(config.derived_rules(), Err(ConfigError::InvalidRatio { .. })));
    }

    #[test]
    fn malformed_toml() {
        let err = "base_units = [".parse::<UnitTableConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse unit table"));
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let config = UnitTableConfig::from_file(file.path()).unwrap();
        assert_eq!(config.non_prefixed.len(), 1);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = UnitTableConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
