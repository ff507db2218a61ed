//! Permissive grammar for hand-typed units: `kg m / s2`, `m / (s s)`, `1/min`, `km/h/s`.
//!
//! Tokens are identifiers (optionally preceded by a numeric factor), parentheses, `/` and a literal `1`; whitespace
//! separates identifiers. Parsing is recursive descent over:
//!
//! ```text
//! root   := ( "1" &"/" | group parens? ) ( "/" ( parens | IDEN ) )? group root?
//! parens := "(" group ")"
//! group  := IDEN*
//! ```
//!
//! Components after a `/` have their exponents negated.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use super::symbols::{parse_factor, SymbolMatcher};
use super::Parser;
use crate::component::UnitComponent;
use crate::decimal::Decimal;
use crate::error::{UnitError, UnitResult};

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<iden>(?:[0-9]+(?:\.[0-9]+)?\s+)?[a-zA-Z]+(?:-?[0-9]+)?)|(?P<lparen>\()|(?P<rparen>\))|(?P<space>\s+)|(?P<one>1)|(?P<div>/))",
    )
    .expect("token pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Iden(&'a str),
    LParen,
    RParen,
    One,
    Div,
}

struct TokenStream<'a> {
    text: &'a str,
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> TokenStream<'a> {
    fn tokenize(text: &'a str) -> UnitResult<Self> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < text.len() {
            let rest = &text[offset..];
            let captures = TOKEN.captures(rest).ok_or_else(|| UnitError::parse(text))?;
            let whole = captures.get(0).map_or(0, |m| m.end());

            if let Some(iden) = captures.name("iden") {
                tokens.push(Token::Iden(iden.as_str()));
            } else if captures.name("lparen").is_some() {
                tokens.push(Token::LParen);
            } else if captures.name("rparen").is_some() {
                tokens.push(Token::RParen);
            } else if captures.name("one").is_some() {
                tokens.push(Token::One);
            } else if captures.name("div").is_some() {
                tokens.push(Token::Div);
            }

            if whole == 0 {
                return Err(UnitError::parse(text));
            }
            offset += whole;
        }

        Ok(Self {
            text,
            tokens,
            position: 0,
        })
    }

    fn is_empty(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    fn next_is(&self, token: Token<'_>) -> bool {
        self.peek() == Some(token)
    }

    fn next_is_iden(&self) -> bool {
        matches!(self.peek(), Some(Token::Iden(_)))
    }

    fn pop(&mut self) -> UnitResult<Token<'a>> {
        let token = self.peek().ok_or_else(|| UnitError::parse(self.text))?;
        self.position += 1;
        Ok(token)
    }
}

/// Parser for the permissive grammar described in the module docs.
#[derive(Debug, Clone)]
pub struct HumanFormParser {
    symbols: SymbolMatcher,
}

impl HumanFormParser {
    /// Builds the parser.
    ///
    /// # Errors
    ///
    /// [`UnitError::Construction`] when both symbol lists are empty.
    pub fn new<S: AsRef<str>>(prefixable: &[S], standalone: &[S]) -> UnitResult<Self> {
        Ok(Self {
            symbols: SymbolMatcher::new(prefixable, standalone)?,
        })
    }

    fn parse_root(&self, tokens: &mut TokenStream<'_>) -> UnitResult<Vec<UnitComponent>> {
        let mut components = Vec::new();

        loop {
            let start = tokens.position;

            if tokens.next_is(Token::One) {
                tokens.pop()?;
                if !tokens.next_is(Token::Div) {
                    return Err(UnitError::parse(tokens.text));
                }
            } else {
                components.extend(self.parse_group(tokens)?);
                if tokens.next_is(Token::LParen) {
                    components.extend(self.parse_parens(tokens)?);
                }
            }

            if tokens.next_is(Token::Div) {
                tokens.pop()?;
                let bottom = if tokens.next_is(Token::LParen) {
                    self.parse_parens(tokens)?
                } else if tokens.next_is_iden() {
                    vec![self.parse_component(tokens)?]
                } else {
                    return Err(UnitError::parse(tokens.text));
                };
                for component in &bottom {
                    let inverted = component.inverted().ok_or_else(|| UnitError::parse(tokens.text))?;
                    components.push(inverted);
                }
            }

            components.extend(self.parse_group(tokens)?);

            if tokens.is_empty() {
                return Ok(components);
            }
            // A stray `)` (or similar) would otherwise be retried forever.
            if tokens.position == start {
                return Err(UnitError::parse(tokens.text));
            }
        }
    }

    fn parse_group(&self, tokens: &mut TokenStream<'_>) -> UnitResult<Vec<UnitComponent>> {
        let mut components = Vec::new();
        while tokens.next_is_iden() {
            components.push(self.parse_component(tokens)?);
        }
        Ok(components)
    }

    fn parse_parens(&self, tokens: &mut TokenStream<'_>) -> UnitResult<Vec<UnitComponent>> {
        tokens.pop()?;
        let components = self.parse_group(tokens)?;
        if !tokens.next_is(Token::RParen) {
            return Err(UnitError::parse(tokens.text));
        }
        tokens.pop()?;
        Ok(components)
    }

    fn parse_component(&self, tokens: &mut TokenStream<'_>) -> UnitResult<UnitComponent> {
        let text = tokens.text;
        let iden = match tokens.pop()? {
            Token::Iden(iden) => iden,
            _ => return Err(UnitError::parse(text)),
        };

        let mut parts = iden.split_whitespace();
        let (factor, token) = match (parts.next(), parts.next()) {
            (Some(token), None) => (Decimal::ONE, token),
            (Some(factor), Some(token)) => {
                (parse_factor(factor).ok_or_else(|| UnitError::parse(text))?, token)
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

impl Parser for HumanFormParser {
    fn parse(&self, text: &str) -> UnitResult<Vec<UnitComponent>> {
        trace!("human form parse of {text:?}");
        let mut tokens = TokenStream::tokenize(text)?;
        self.parse_root(&mut tokens)
    }
}
