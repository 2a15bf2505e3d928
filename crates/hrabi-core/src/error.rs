//! Error types for hrabi
//!
//! All fallible operations return `Result<T, Error>`.
//! Every variant carries the offending argument so callers can report it.

use thiserror::Error;

/// hrabi error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed character sequence or unterminated nesting in a type expression
    #[error("{reason} at position {position} (param {input:?})")]
    Grammar {
        reason: &'static str,
        position: usize,
        input: String,
    },

    /// A closing paren without a matching open paren in a parameter list
    #[error("unbalanced parenthesis (value {value:?})")]
    UnbalancedParentheses { value: String },

    /// A location/payability keyword used on a type that does not accept it
    #[error("invalid modifier {modifier:?} for type {type_name:?}")]
    InvalidModifier { modifier: String, type_name: String },

    /// A name that is not a legal identifier where one is required
    #[error("invalid identifier {value:?}")]
    InvalidIdentifier { value: String },

    /// Contradictory `constant`/`payable`/`stateMutability` inputs
    #[error("{reason} (value {value})")]
    InconsistentMutability { reason: String, value: String },

    /// No input allows a state mutability to be determined
    #[error("unable to determine stateMutability (value {value})")]
    AmbiguousMutability { value: String },

    /// The requested output convention does not exist for this entity
    #[error("cannot format {entity} as {mode}")]
    UnsupportedFormat { entity: String, mode: String },

    /// Generic malformed argument
    #[error("{message} ({argument} {value:?})")]
    Argument {
        message: String,
        argument: &'static str,
        value: String,
    },

    /// JSON conversion failure
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn argument(
        message: impl Into<String>,
        argument: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Error::Argument {
            message: message.into(),
            argument,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type alias for hrabi operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_error_display_carries_position() {
        let err = Error::Grammar {
            reason: "unexpected character",
            position: 4,
            input: "uint)".into(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected character at position 4 (param \"uint)\")"
        );
    }

    #[test]
    fn test_argument_helper() {
        let err = Error::argument("invalid format type", "format", "fancy");
        assert_eq!(err.to_string(), "invalid format type (format \"fancy\")");
    }

    #[test]
    fn test_serde_error_conversion() {
        let err: Error = serde_json::from_str::<serde_json::Value>("[")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
