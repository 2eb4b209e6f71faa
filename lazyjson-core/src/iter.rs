//! Pull cursor over a stream of JSON values.
//!
//! [`StreamIter`] owns its lexer, so exactly one cursor can advance a
//! stream. The framing is resolved before the first value and carried as a
//! small state machine:
//!
//! ```text
//!                    has_next                    next
//! Whitespace ──── lexer.is_not_eof() ────── decode value
//!
//! ArrayWrapped
//!   open     ─┬─ peek ']' → consume, closed ─── dangling input? → error
//!             ├─ EOF      → missing bracket error
//!             └─ else     → true ────────────── [',' unless first] decode value
//!   closed   ──── false
//! ```

use std::io::Read;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, DeserializeSeed};

use crate::de::Decoder;
use crate::error::{Error, Result};
use crate::framing::{self, FramingMode};
use crate::lexer::ReaderLexer;
use crate::seq::Values;
use crate::token::TokenClass;

/// Per-framing iteration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    WhitespaceSeparated,
    ArrayWrapped {
        /// No value decoded yet, so no comma to consume.
        first: bool,
        /// Closing bracket consumed.
        closed: bool,
    },
}

/// Cursor over the values of one stream.
///
/// Check [`has_next`](Self::has_next), then call [`next`](Self::next) with
/// the type to decode. Calling `next` alone is fine; it repeats the check.
/// After an error the stream position is unspecified and the iterator
/// should be dropped.
#[derive(Debug)]
pub struct StreamIter<R> {
    lexer: ReaderLexer<R>,
    cursor: Cursor,
    max_depth: usize,
}

impl<R: Read> StreamIter<R> {
    /// Resolve `requested` against the stream start and build the cursor.
    pub fn open(mut lexer: ReaderLexer<R>, requested: FramingMode, max_depth: usize) -> Result<Self> {
        let resolved = framing::resolve(requested, &mut lexer)?;
        Self::with_resolved(lexer, resolved, max_depth)
    }

    /// Build the cursor for an already resolved mode.
    ///
    /// Fails with [`Error::UnsupportedAutoDetectState`] for
    /// [`FramingMode::AutoDetect`]; run [`framing::resolve`] first.
    pub fn with_resolved(lexer: ReaderLexer<R>, mode: FramingMode, max_depth: usize) -> Result<Self> {
        let cursor = match mode {
            FramingMode::WhitespaceSeparated => return Ok(Self::whitespace_separated(lexer, max_depth)),
            FramingMode::ArrayWrapped => Cursor::ArrayWrapped {
                first: true,
                closed: false,
            },
            FramingMode::AutoDetect => return Err(Error::UnsupportedAutoDetectState),
        };
        Ok(Self {
            lexer,
            cursor,
            max_depth,
        })
    }

    pub(crate) fn whitespace_separated(lexer: ReaderLexer<R>, max_depth: usize) -> Self {
        Self {
            lexer,
            cursor: Cursor::WhitespaceSeparated,
            max_depth,
        }
    }

    /// The resolved framing of this stream.
    pub fn framing(&self) -> FramingMode {
        match self.cursor {
            Cursor::WhitespaceSeparated => FramingMode::WhitespaceSeparated,
            Cursor::ArrayWrapped { .. } => FramingMode::ArrayWrapped,
        }
    }

    /// Byte offset of the cursor in the stream.
    pub fn offset(&self) -> u64 {
        self.lexer.offset()
    }

    /// Whether another value can be decoded.
    ///
    /// Never consumes part of a value. In array-wrapped mode the closing
    /// bracket is consumed once it is reached; later calls keep returning
    /// `false`.
    pub fn has_next(&mut self) -> Result<bool> {
        let first = match self.cursor {
            Cursor::WhitespaceSeparated => return self.lexer.is_not_eof(),
            Cursor::ArrayWrapped { closed: true, .. } => return Ok(false),
            Cursor::ArrayWrapped { first, closed: false } => first,
        };

        if self.lexer.peek_next_token()? == TokenClass::EndList {
            self.lexer.consume_next_token(TokenClass::EndList)?;
            self.cursor = Cursor::ArrayWrapped { first, closed: true };
            tracing::trace!(offset = self.lexer.offset(), "closing bracket consumed");

            if self.lexer.is_not_eof()? {
                let offset = self.lexer.offset();
                let another_array = self.lexer.peek_next_token()? == TokenClass::BeginList;
                tracing::debug!(offset, another_array, "dangling data after array-wrapped stream");
                return Err(Error::DanglingData { offset, another_array });
            }
            return Ok(false);
        }

        if !self.lexer.is_not_eof()? {
            return Err(Error::PrematureEndOfInput {
                offset: self.lexer.offset(),
                expected: "closing bracket",
            });
        }
        Ok(true)
    }

    /// Decode the next value as `T`.
    pub fn next<T: DeserializeOwned>(&mut self) -> Result<T> {
        self.next_seed(PhantomData::<T>)
    }

    /// Decode the next value through a stateful seed.
    pub fn next_seed<'de, S: DeserializeSeed<'de>>(&mut self, seed: S) -> Result<S::Value> {
        if !self.has_next()? {
            return Err(Error::UnexpectedEndOfInputOnDecode {
                offset: self.lexer.offset(),
            });
        }
        if let Cursor::ArrayWrapped { first, .. } = &mut self.cursor {
            if *first {
                *first = false;
            } else {
                self.lexer.consume_next_token(TokenClass::Comma)?;
            }
        }
        Decoder::new(&mut self.lexer, self.max_depth).decode_seed(seed)
    }

    /// Turn the cursor into an iterator of `T` values.
    pub fn into_values<T: DeserializeOwned>(self) -> Values<R, T> {
        Values::new(self)
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.lexer.into_inner()
    }
}
