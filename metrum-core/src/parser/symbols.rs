//! Symbol recognition shared by both grammars.

use regex::Regex;

use crate::decimal::Decimal;
use crate::error::{UnitError, UnitResult};
use crate::prefix::MetricPrefix;

/// A unit token without its factor, recognized as `(unit_alone | prefix? unit) exponent?`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Symbol {
    pub prefix: MetricPrefix,
    pub abbrev: String,
    pub exponent: i32,
}

/// Matches unit tokens against the known prefixable and non-prefixable units.
///
/// Every alternation is ordered longest symbol first, so `min` wins over `m` and a registered `kWh` wins over
/// `k` + `Wh`. The prefix group is lazy: an unprefixed reading is preferred whenever one exists.
#[derive(Debug, Clone)]
pub(crate) struct SymbolMatcher {
    regex: Regex,
}

impl SymbolMatcher {
    pub(crate) fn new<S: AsRef<str>>(prefixable: &[S], standalone: &[S]) -> UnitResult<Self> {
        let prefixable = alternation(prefixable.iter().map(|s| s.as_ref()));
        let standalone = alternation(standalone.iter().map(|s| s.as_ref()));
        let prefixes = alternation(MetricPrefix::longest_first().iter().map(|(s, _)| *s));

        let mut branches = Vec::new();
        if !standalone.is_empty() {
            branches.push(format!("(?P<unit_alone>{standalone})"));
        }
        if !prefixable.is_empty() {
            branches.push(format!("(?P<prefix>{prefixes})??(?P<unit>{prefixable})"));
        }
        if branches.is_empty() {
            return Err(UnitError::Construction(
                "at least one unit symbol must be known".to_string(),
            ));
        }

        let pattern = format!("^(?:{})(?P<exponent>-?[0-9]+)?$", branches.join("|"));
        let regex = Regex::new(&pattern)
            .map_err(|e| UnitError::Construction(format!("invalid unit symbol table: {e}")))?;

        Ok(Self { regex })
    }

    /// Recognizes `token`, or `None` when it is not a known (prefixed) unit with an optional exponent.
    pub(crate) fn recognize(&self, token: &str) -> Option<Symbol> {
        let captures = self.regex.captures(token)?;

        let exponent = match captures.name("exponent") {
            Some(m) => m.as_str().parse::<i32>().ok()?,
            None => 1,
        };

        if let Some(unit) = captures.name("unit_alone") {
            return Some(Symbol {
                prefix: MetricPrefix::None,
                abbrev: unit.as_str().to_string(),
                exponent,
            });
        }

        let unit = captures.name("unit")?;
        let prefix = match captures.name("prefix") {
            Some(p) => MetricPrefix::from_symbol(p.as_str())?,
            None => MetricPrefix::None,
        };

        Some(Symbol {
            prefix,
            abbrev: unit.as_str().to_string(),
            exponent,
        })
    }
}

/// Parses a `digits(.digits)?` factor.
pub(crate) fn parse_factor(text: &str) -> Option<Decimal> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
        return None;
    }
    text.parse::<f64>().ok().map(Decimal::from)
}

fn alternation<'a>(symbols: impl Iterator<Item = &'a str>) -> String {
    let mut symbols: Vec<&str> = symbols.filter(|s| !s.is_empty()).collect();
    symbols.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    symbols.dedup();
    symbols
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}
