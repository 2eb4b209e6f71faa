//! Buffered byte-level JSON lexer over any [`Read`] source.
//!
//! The lexer keeps a fixed-size window of the input and refills it on demand,
//! so a stream of any length is processed in bounded memory. Only the window
//! position is state; peeking never consumes anything but whitespace.
//!
//! # Window
//!
//! ```text
//!  base                 pos            end          buf.len()
//!   │                    │              │              │
//!   ▼                    ▼              ▼              ▼
//!   [ consumed bytes ... | unread bytes | free space   ]
//! ```
//!
//! `base` is the stream offset of `buf[0]`; offsets in errors are
//! `base + pos`. Lookahead that crosses `end` compacts the unread bytes to
//! the front of the window before reading more.

use std::io::{self, Read};

use crate::error::{Error, Result};
use crate::token::{is_delimiter, is_number_byte, keyword_prefix, TokenClass};

/// Default size of the read window.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Smallest accepted read window. Large enough for any fixed lookahead.
pub const MIN_BUFFER_CAPACITY: usize = 16;

/// JSON lexer reading from `R`.
#[derive(Debug)]
pub struct ReaderLexer<R> {
    reader: R,
    buf: Vec<u8>,
    pos: usize,
    end: usize,
    /// Stream offset of `buf[0]`
    base: u64,
    eof: bool,
    /// Decoded string or literal bytes
    scratch: Vec<u8>,
}

impl<R: Read> ReaderLexer<R> {
    /// Create a lexer with the default window size.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_CAPACITY)
    }

    /// Create a lexer with a window of at least `capacity` bytes.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            buf: vec![0; capacity.max(MIN_BUFFER_CAPACITY)],
            pos: 0,
            end: 0,
            base: 0,
            eof: false,
            scratch: Vec::new(),
        }
    }

    /// Absolute stream offset of the next unread byte.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.base + self.pos as u64
    }

    /// Give back the underlying reader. Buffered but unread bytes are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    // Make at least `n` unread bytes available. Returns false when the
    // stream ends first; whatever is left stays readable.
    fn ensure(&mut self, n: usize) -> Result<bool> {
        while self.end - self.pos < n {
            if self.eof {
                return Ok(false);
            }
            if self.pos > 0 {
                self.buf.copy_within(self.pos..self.end, 0);
                self.base += self.pos as u64;
                self.end -= self.pos;
                self.pos = 0;
            }
            if self.end == self.buf.len() {
                let grown = self.buf.len() * 2;
                self.buf.resize(grown, 0);
            }
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => self.eof = true,
                Ok(read) => self.end += read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(true)
    }

    #[inline]
    fn peek_byte(&mut self) -> Result<Option<u8>> {
        if self.ensure(1)? {
            Ok(Some(self.buf[self.pos]))
        } else {
            Ok(None)
        }
    }

    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    /// Skip whitespace and return the next byte without consuming it.
    fn skip_whitespace(&mut self) -> Result<Option<u8>> {
        loop {
            match self.peek_byte()? {
                Some(b' ' | b'\n' | b'\r' | b'\t') => self.pos += 1,
                other => return Ok(other),
            }
        }
    }

    /// Class of the next token. Consumes leading whitespace only.
    pub fn peek_next_token(&mut self) -> Result<TokenClass> {
        Ok(TokenClass::of(self.skip_whitespace()?))
    }

    /// Whether any non-whitespace input remains.
    pub fn is_not_eof(&mut self) -> Result<bool> {
        Ok(self.skip_whitespace()?.is_some())
    }

    /// Consume a single structural token, failing if the next token differs.
    pub fn consume_next_token(&mut self, expected: TokenClass) -> Result<()> {
        debug_assert!(expected.is_structural(), "{expected:?} is not a structural token");
        let found = self.peek_next_token()?;
        if found != expected {
            return Err(self.unexpected(expected.describe(), found));
        }
        self.pos += 1;
        Ok(())
    }

    /// Require that no input other than whitespace remains.
    pub fn expect_eof(&mut self) -> Result<()> {
        match self.peek_next_token()? {
            TokenClass::Eof => Ok(()),
            found => Err(Error::TrailingBytesAfterSingleValue {
                offset: self.offset(),
                found: found.describe(),
            }),
        }
    }

    /// Error for `found` where `expected` was required.
    pub(crate) fn unexpected(&self, expected: &'static str, found: TokenClass) -> Error {
        let offset = self.offset();
        match found {
            TokenClass::Eof => Error::PrematureEndOfInput { offset, expected },
            found => Error::UnexpectedToken {
                offset,
                expected,
                found: found.describe(),
            },
        }
    }

    /// Consume `null` if it is the next literal.
    pub fn try_consume_null(&mut self) -> Result<bool> {
        if self.skip_whitespace()? != Some(b'n') {
            return Ok(false);
        }
        self.ensure(4)?;
        let matched = self.buf[self.pos..self.end].starts_with(b"null");
        if matched {
            self.pos += 4;
        }
        Ok(matched)
    }

    /// Consume a bare literal.
    ///
    /// A keyword ends right after its last letter and a number at the first
    /// byte that cannot continue it, so `true1` reads as `true` followed by
    /// `1`. Anything else runs to the next delimiter and comes back whole for
    /// the caller to reject.
    pub fn consume_literal(&mut self) -> Result<&str> {
        let found = self.peek_next_token()?;
        if found != TokenClass::Other {
            return Err(self.unexpected("literal", found));
        }
        let offset = self.offset();
        self.scratch.clear();

        if self.buf[self.pos].is_ascii_alphabetic() {
            // "false" is the longest keyword
            self.ensure(5)?;
            if let Some(keyword) = keyword_prefix(&self.buf[self.pos..self.end]) {
                self.pos += keyword.len();
                return Ok(keyword);
            }
        } else {
            self.consume_while(is_number_byte)?;
        }
        if self.scratch.is_empty() {
            self.consume_while(|b| !is_delimiter(b))?;
        }
        std::str::from_utf8(&self.scratch).map_err(|_| Error::InvalidLiteral {
            offset,
            literal: String::from_utf8_lossy(&self.scratch).into_owned(),
        })
    }

    fn consume_while(&mut self, accept: impl Fn(u8) -> bool) -> Result<()> {
        while let Some(byte) = self.peek_byte()? {
            if !accept(byte) {
                break;
            }
            self.scratch.push(byte);
            self.pos += 1;
        }
        Ok(())
    }

    /// Consume a string token and return its unescaped contents.
    ///
    /// The returned slice is only valid until the next lexer call.
    pub fn consume_string(&mut self) -> Result<&str> {
        let found = self.peek_next_token()?;
        if found != TokenClass::String {
            return Err(self.unexpected("string", found));
        }
        let start = self.offset();
        self.pos += 1;
        self.scratch.clear();

        loop {
            if !self.ensure(1)? {
                return Err(Error::PrematureEndOfInput {
                    offset: self.offset(),
                    expected: "closing quote",
                });
            }

            let chunk = &self.buf[self.pos..self.end];
            let stop = memchr::memchr2(b'"', b'\\', chunk);
            let len = stop.unwrap_or(chunk.len());
            let head = &chunk[..len];

            if let Some(bad) = head.iter().position(|&b| b < 0x20) {
                return Err(Error::InvalidString {
                    offset: self.base + (self.pos + bad) as u64,
                    reason: "unescaped control character",
                });
            }
            self.scratch.extend_from_slice(head);
            self.pos += len;

            match stop.map(|i| chunk[i]) {
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    self.pos += 1;
                    self.consume_escape()?;
                }
                None => {}
            }
        }

        std::str::from_utf8(&self.scratch).map_err(|_| Error::InvalidString {
            offset: start,
            reason: "invalid UTF-8",
        })
    }

    // The backslash is already consumed.
    fn consume_escape(&mut self) -> Result<()> {
        let offset = self.offset();
        let escaped = match self.next_byte()? {
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0c,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => return self.consume_unicode_escape(),
            Some(_) => {
                return Err(Error::InvalidString {
                    offset,
                    reason: "invalid escape sequence",
                })
            }
            None => {
                return Err(Error::PrematureEndOfInput {
                    offset,
                    expected: "escape sequence",
                })
            }
        };
        self.scratch.push(escaped);
        Ok(())
    }

    // `\u` is already consumed.
    fn consume_unicode_escape(&mut self) -> Result<()> {
        let offset = self.offset();
        let unit = self.read_hex4()?;

        let code = match unit {
            0xD800..=0xDBFF => {
                if !self.ensure(2)? || &self.buf[self.pos..self.pos + 2] != b"\\u" {
                    return Err(Error::InvalidString {
                        offset,
                        reason: "unpaired surrogate",
                    });
                }
                self.pos += 2;
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(Error::InvalidString {
                        offset,
                        reason: "unpaired surrogate",
                    });
                }
                0x10000 + (((unit as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(Error::InvalidString {
                    offset,
                    reason: "unpaired surrogate",
                })
            }
            _ => unit as u32,
        };

        let ch = char::from_u32(code).ok_or(Error::InvalidString {
            offset,
            reason: "invalid unicode escape",
        })?;
        let mut encoded = [0u8; 4];
        self.scratch
            .extend_from_slice(ch.encode_utf8(&mut encoded).as_bytes());
        Ok(())
    }

    fn read_hex4(&mut self) -> Result<u16> {
        let offset = self.offset();
        if !self.ensure(4)? {
            return Err(Error::PrematureEndOfInput {
                offset,
                expected: "four hex digits",
            });
        }
        let mut unit = 0u16;
        for &b in &self.buf[self.pos..self.pos + 4] {
            let digit = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => {
                    return Err(Error::InvalidString {
                        offset,
                        reason: "invalid unicode escape",
                    })
                }
            };
            unit = (unit << 4) | digit as u16;
        }
        self.pos += 4;
        Ok(unit)
    }
}
