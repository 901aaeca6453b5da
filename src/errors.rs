use std::fmt;

use thiserror::Error;

/// Error returned when a string is not one of an enum's wire values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumParseError {
    pub type_name: &'static str,
    pub value: String,
}

impl EnumParseError {
    pub fn new(type_name: &'static str, value: impl Into<String>) -> Self {
        Self {
            type_name,
            value: value.into(),
        }
    }
}

impl fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value: {:?}", self.type_name, self.value)
    }
}

impl std::error::Error for EnumParseError {}

/// Convenience alias for fallible parse/serialize results.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type surfaced by the model layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidEnumValue(#[from] EnumParseError),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("number {value} is out of range for {target}")]
    NumberOutOfRange { value: String, target: &'static str },

    #[error("invalid base64 content: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("invalid date-time: {0}")]
    InvalidDateTime(#[from] chrono::ParseError),

    #[error("invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: &'static str },

    #[error("writer error: {0}")]
    Writer(String),

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { expected, found }
    }

    pub(crate) fn invalid_duration(value: &str, reason: &'static str) -> Self {
        Error::InvalidDuration {
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_parse_error_names_type_and_value() {
        let err = EnumParseError::new("ChatType", "oneToOne");
        assert_eq!(err.to_string(), "unknown ChatType value: \"oneToOne\"");
    }

    #[test]
    fn enum_parse_error_converts_into_error() {
        let err: Error = EnumParseError::new("BodyType", "markdown").into();
        assert!(matches!(err, Error::InvalidEnumValue(ref inner) if inner.value == "markdown"));
        assert_eq!(err.to_string(), "unknown BodyType value: \"markdown\"");
    }

    #[test]
    fn type_mismatch_formats_both_sides() {
        let err = Error::type_mismatch("string", "number");
        assert_eq!(err.to_string(), "type mismatch: expected string, found number");
    }
}
