//! Parse errors.
//!
//! Parsing stops at the first problem; the error names the offending token
//! by its 1-based position and text.

use thiserror::Error;

/// A failed parse, pinned to the token that caused it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("token #{token} ({text:?}): {kind}")]
pub struct ParseError {
    /// 1-based token index
    pub token: usize,
    pub text: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(token: usize, text: impl Into<String>, kind: ParseErrorKind) -> Self {
        ParseError {
            token,
            text: text.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unrecognized token")]
    UnrecognizedToken,

    #[error("bad drum: {0:?}")]
    BadInstrument(String),

    #[error("bad velocity: {0:?}")]
    BadVelocity(String),

    #[error("bad duration: {0:?}")]
    BadDuration(String),

    #[error("grace notes require parentheses on both sides")]
    UnbalancedGrace,

    #[error("grace note is too long: {grace} ticks, should be less than {host}")]
    GraceTooLong { grace: u32, host: u32 },

    #[error("hit is too long: {ticks} ticks, at most 268435455")]
    DurationTooLong { ticks: u64 },

    #[error("duration with no preceding hit")]
    WaitWithoutHit,

    #[error("unknown directive: {0:?}")]
    UnknownDirective(String),

    #[error(transparent)]
    Directive(#[from] DirectiveError),
}

/// A directive handler rejected its value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("bad input to bpm: {value:?} is not a number")]
    NotANumber { value: String },

    #[error("bad bpm: {0}, must be between 1 and 500")]
    BpmOutOfRange(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::new(3, "36+++", ParseErrorKind::BadVelocity("+++".into()));
        assert_eq!(err.to_string(), r#"token #3 ("36+++"): bad velocity: "+++""#);

        let err = ParseError::new(
            1,
            "bpm:0",
            ParseErrorKind::Directive(DirectiveError::BpmOutOfRange(0)),
        );
        assert_eq!(
            err.to_string(),
            r#"token #1 ("bpm:0"): bad bpm: 0, must be between 1 and 500"#
        );

        let err = ParseError::new(
            9,
            "~~",
            ParseErrorKind::DurationTooLong { ticks: 268_435_584 },
        );
        assert_eq!(
            err.to_string(),
            r#"token #9 ("~~"): hit is too long: 268435584 ticks, at most 268435455"#
        );
    }
}
