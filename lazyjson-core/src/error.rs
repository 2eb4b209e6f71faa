//! Error type shared by the lexer, the codec and the stream layer.
//!
//! Every failure is a structured decoding (or encoding) error. Framing
//! problems, dangling data and premature end of input are separate variants
//! so callers can tell them apart without matching on messages.

use std::fmt::Display;
use std::io;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while reading or writing a JSON value stream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Array-wrapped framing was requested but the stream does not open with `[`.
    #[error("expected array start at offset {offset}")]
    FramingMismatch { offset: u64 },

    /// An iterator was built from `FramingMode::AutoDetect` instead of a resolved mode.
    #[error("framing must be resolved before iterating; auto-detect is not a running mode")]
    UnsupportedAutoDetectState,

    /// Input remains after the closing bracket of an array-wrapped stream.
    #[error("dangling data after last bracket at offset {offset}{}", second_array_hint(.another_array))]
    DanglingData { offset: u64, another_array: bool },

    /// The stream ended where more input was required.
    #[error("unexpected end of input at offset {offset}: expected {expected}")]
    PrematureEndOfInput { offset: u64, expected: &'static str },

    /// A value was requested where none is left.
    #[error("unexpected EOF at offset {offset}: no further value to decode")]
    UnexpectedEndOfInputOnDecode { offset: u64 },

    /// Bytes follow the single value of a single-value stream.
    #[error("expected EOF after parsing, but had {found} at offset {offset} instead")]
    TrailingBytesAfterSingleValue { offset: u64, found: &'static str },

    /// A structural token did not match what the grammar requires.
    #[error("unexpected {found} at offset {offset}: expected {expected}")]
    UnexpectedToken {
        offset: u64,
        expected: &'static str,
        found: &'static str,
    },

    /// A bare literal that is neither a keyword nor a JSON number.
    #[error("invalid literal `{literal}` at offset {offset}")]
    InvalidLiteral { offset: u64, literal: String },

    /// A malformed string (bad escape, control character, surrogate, UTF-8).
    #[error("invalid string at offset {offset}: {reason}")]
    InvalidString { offset: u64, reason: &'static str },

    /// Nesting exceeded the configured maximum depth.
    #[error("recursion limit exceeded at offset {offset}")]
    RecursionLimitExceeded { offset: u64 },

    /// Error raised by a `Deserialize` implementation (missing field,
    /// invalid type, unknown variant, ...).
    #[error("{0}")]
    Custom(String),

    /// A value could not be encoded, e.g. a map with non-string keys or a
    /// failing `Serialize` implementation.
    #[error("cannot encode value: {0}")]
    Encode(serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn second_array_hint(another_array: &bool) -> &'static str {
    if *another_array {
        "; another top-level array follows, decode with whitespace-separated framing instead"
    } else {
        ""
    }
}

impl Error {
    /// Byte offset at which the error was detected, when known.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::FramingMismatch { offset }
            | Self::DanglingData { offset, .. }
            | Self::PrematureEndOfInput { offset, .. }
            | Self::UnexpectedEndOfInputOnDecode { offset }
            | Self::TrailingBytesAfterSingleValue { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::InvalidLiteral { offset, .. }
            | Self::InvalidString { offset, .. }
            | Self::RecursionLimitExceeded { offset } => Some(*offset),
            Self::UnsupportedAutoDetectState
            | Self::Custom(_)
            | Self::Encode(_)
            | Self::Io(_) => None,
        }
    }

    /// Whether the error was caused by the stream ending too early.
    pub fn is_eof(&self) -> bool {
        matches!(
            self,
            Self::PrematureEndOfInput { .. } | Self::UnexpectedEndOfInputOnDecode { .. }
        )
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

// Writer failures keep their `io::Error` so callers see one I/O variant.
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            Error::Io(error.into())
        } else {
            Error::Encode(error)
        }
    }
}
