//! Strict dot-separated grammar: `10 km.dm.m-3`, `kg.m.s-2`, `2.5 h-1`.

use log::trace;

use super::symbols::{parse_factor, SymbolMatcher};
use super::Parser;
use crate::component::UnitComponent;
use crate::decimal::Decimal;
use crate::error::{UnitError, UnitResult};

/// Parses `segment(.segment)*`, each segment being `(factor ' ')? (unit_alone | prefix? unit) exponent?`.
///
/// `prefixable` units accept a metric prefix; `standalone` ones (imperial units, mostly) do not.
#[derive(Debug, Clone)]
pub struct SiFormParser {
    symbols: SymbolMatcher,
}

impl SiFormParser {
    /// Builds the parser.
    ///
    /// # Errors
    ///
    /// [`UnitError::Construction`] when no prefixable unit is given.
    pub fn new<S: AsRef<str>>(prefixable: &[S], standalone: &[S]) -> UnitResult<Self> {
        if prefixable.iter().all(|s| s.as_ref().is_empty()) {
            return Err(UnitError::Construction(
                "at least one SI unit must be defined".to_string(),
            ));
        }

        Ok(Self {
            symbols: SymbolMatcher::new(prefixable, standalone)?,
        })
    }

    fn parse_segment(&self, text: &str, segment: &str) -> UnitResult<UnitComponent> {
        let parts: Vec<&str> = segment.split(' ').collect();

        let (factor, token) = match parts.as_slice() {
            [token] => (Decimal::ONE, *token),
            [factor, token] => {
                let factor = parse_factor(factor).ok_or_else(|| UnitError::parse(text))?;
                (factor, *token)
            }
            _ => return Err(UnitError::parse(text)),
        };

        let symbol = self
            .symbols
            .recognize(token)
            .ok_or_else(|| UnitError::parse(text))?;

        Ok(UnitComponent::new(
            factor,
            symbol.prefix,
            symbol.abbrev,
            symbol.exponent,
        ))
    }
}

impl Parser for SiFormParser {
    fn parse(&self, text: &str) -> UnitResult<Vec<UnitComponent>> {
        trace!("SI form parse of {text:?}");
        split_segments(text)
            .into_iter()
            .map(|segment| self.parse_segment(text, segment))
            .collect()
    }
}

/// Splits on the dots that start a new `(digits ('.' digits)? ' ')? letter` token.
///
/// A dot directly after a bare number is a decimal point, so `2.5 m` stays in one piece.
fn split_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if ch != '.' {
            continue;
        }
        let current = &text[start..i];
        let rest = &text[i + 1..];
        let is_number = !current.is_empty() && current.bytes().all(|b| b.is_ascii_digit());
        if !is_number && starts_token(rest) {
            segments.push(current);
            start = i + 1;
        }
    }

    segments.push(&text[start..]);
    segments
}

fn starts_token(rest: &str) -> bool {
    let after = match strip_number(rest) {
        Some(number_end) => match number_end.strip_prefix(' ') {
            Some(a) => a,
            None => return false,
        },
        None => rest,
    };
    after.chars().next().is_some_and(char::is_alphabetic)
}

/// Strips a leading `digits ('.' digits)?`, or `None` when `text` does not start with a digit.
fn strip_number(text: &str) -> Option<&str> {
    fn strip_digits(s: &str) -> Option<&str> {
        let digits = s.bytes().take_while(u8::is_ascii_digit).count();
        (digits > 0).then(|| &s[digits..])
    }

    let after = strip_digits(text)?;
    Some(
        after
            .strip_prefix('.')
            .and_then(strip_digits)
            .unwrap_or(after),
    )
}
