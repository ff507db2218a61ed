//! Error type shared by every fallible unit operation.

/// Result type for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;

/// Error type for parsing, normalizing, converting and combining units.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    /// The unit text is malformed or uses a symbol no grammar recognizes.
    #[error("Cannot parse unit expression: {input:?}")]
    Parse { input: String },

    /// A parsed abbreviation has neither a base-unit nor a transition mapping.
    #[error("No normalization known for unit: {unit:?}")]
    Normalize { unit: String },

    /// The two units do not share the same dimension (nor its reciprocal).
    #[error("Cannot convert [{from}] into [{to}]")]
    Conversion { from: String, to: String },

    #[error("Division by zero")]
    DivisionByZero,

    /// Invalid unit table or unit definition, detected when it is built.
    #[error("Construction error: {0}")]
    Construction(String),

    /// An operation received an argument of the wrong kind.
    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl UnitError {
    pub(crate) fn parse(input: impl Into<String>) -> Self {
        UnitError::Parse {
            input: input.into(),
        }
    }

    pub(crate) fn normalize(unit: impl Into<String>) -> Self {
        UnitError::Normalize { unit: unit.into() }
    }
}
