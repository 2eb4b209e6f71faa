//! Framing disciplines and their detection.
//!
//! A stream of values is framed one of two ways:
//!
//! ```text
//! WhitespaceSeparated   {"a":1} {"a":2}\n{"a":3}
//! ArrayWrapped          [{"a":1},{"a":2},{"a":3}]
//! ```
//!
//! `AutoDetect` picks one by looking at the first token. A stream whose
//! first value happens to be an array is only treated as wrapped when
//! wrapping was asked for or auto-detected, never when whitespace
//! separation was requested explicitly.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::lexer::ReaderLexer;
use crate::token::TokenClass;

/// How values are laid out in a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FramingMode {
    /// Values back to back, optionally separated by whitespace.
    WhitespaceSeparated,
    /// Values inside one top-level array, separated by commas.
    ArrayWrapped,
    /// Decide from the first token. Only valid as a request.
    #[default]
    AutoDetect,
}

impl fmt::Display for FramingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WhitespaceSeparated => "whitespace",
            Self::ArrayWrapped => "array",
            Self::AutoDetect => "auto",
        })
    }
}

/// Error returned when parsing an unknown framing name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown framing mode `{0}` (expected whitespace, array or auto)")]
pub struct UnknownFramingMode(pub String);

impl FromStr for FramingMode {
    type Err = UnknownFramingMode;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "whitespace" | "ws" => Ok(Self::WhitespaceSeparated),
            "array" => Ok(Self::ArrayWrapped),
            "auto" => Ok(Self::AutoDetect),
            _ => Err(UnknownFramingMode(s.to_owned())),
        }
    }
}

/// Resolve the requested mode against the start of the stream.
///
/// Returns `WhitespaceSeparated` or `ArrayWrapped`, never `AutoDetect`. When
/// the result is `ArrayWrapped` the opening bracket has been consumed.
pub fn resolve<R: Read>(requested: FramingMode, lexer: &mut ReaderLexer<R>) -> Result<FramingMode> {
    let resolved = match requested {
        // No peeking: a stream of arrays must stay a stream of arrays
        FramingMode::WhitespaceSeparated => FramingMode::WhitespaceSeparated,
        FramingMode::ArrayWrapped => {
            if !try_consume_begin_list(lexer)? {
                return Err(Error::FramingMismatch {
                    offset: lexer.offset(),
                });
            }
            FramingMode::ArrayWrapped
        }
        FramingMode::AutoDetect => {
            if try_consume_begin_list(lexer)? {
                FramingMode::ArrayWrapped
            } else {
                FramingMode::WhitespaceSeparated
            }
        }
    };
    tracing::debug!(%requested, %resolved, "resolved stream framing");
    Ok(resolved)
}

fn try_consume_begin_list<R: Read>(lexer: &mut ReaderLexer<R>) -> Result<bool> {
    if lexer.peek_next_token()? == TokenClass::BeginList {
        lexer.consume_next_token(TokenClass::BeginList)?;
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_str(requested: FramingMode, input: &str) -> Result<(FramingMode, u64)> {
        let mut lexer = ReaderLexer::new(input.as_bytes());
        let mode = resolve(requested, &mut lexer)?;
        Ok((mode, lexer.offset()))
    }

    #[test]
    fn test_whitespace_never_peeks() {
        assert_eq!(
            resolve_str(FramingMode::WhitespaceSeparated, "[1][2]").unwrap(),
            (FramingMode::WhitespaceSeparated, 0)
        );
    }

    #[test]
    fn test_array_consumes_bracket() {
        assert_eq!(
            resolve_str(FramingMode::ArrayWrapped, "  [1,2]").unwrap(),
            (FramingMode::ArrayWrapped, 3)
        );
    }

    #[test]
    fn test_array_mismatch() {
        let err = resolve_str(FramingMode::ArrayWrapped, r#" {"a":1}"#).unwrap_err();
        assert!(matches!(err, Error::FramingMismatch { offset: 1 }));
        assert_eq!(err.to_string(), "expected array start at offset 1");

        let err = resolve_str(FramingMode::ArrayWrapped, "").unwrap_err();
        assert!(matches!(err, Error::FramingMismatch { offset: 0 }));
    }

    #[test]
    fn test_auto_detect() {
        assert_eq!(
            resolve_str(FramingMode::AutoDetect, "\n[").unwrap(),
            (FramingMode::ArrayWrapped, 2)
        );
        assert_eq!(
            resolve_str(FramingMode::AutoDetect, r#"  {"a":[1]}"#).unwrap(),
            (FramingMode::WhitespaceSeparated, 2)
        );
        assert_eq!(
            resolve_str(FramingMode::AutoDetect, "").unwrap(),
            (FramingMode::WhitespaceSeparated, 0)
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("ws".parse(), Ok(FramingMode::WhitespaceSeparated));
        assert_eq!("Array".parse(), Ok(FramingMode::ArrayWrapped));
        assert_eq!("auto".parse(), Ok(FramingMode::AutoDetect));
        assert_eq!(
            "lines".parse::<FramingMode>(),
            Err(UnknownFramingMode("lines".into()))
        );
        assert_eq!(FramingMode::default().to_string(), "auto");
    }
}
