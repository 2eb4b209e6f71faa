//! Token classes and literal classification.
//!
//! The framing layer only needs to know the class of the next token. Bare
//! literals (numbers and keywords) stay opaque until the codec asks for them
//! with [`Literal::parse`].

use phf::phf_map;

/// Class of the next token in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginList,
    /// `]`
    EndList,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// Opening quote of a string.
    String,
    /// Start of a number or keyword literal (or a stray byte).
    Other,
    /// No input left.
    Eof,
}

impl TokenClass {
    /// Classify the first byte of a token. `None` means end of input.
    #[inline]
    pub fn of(byte: Option<u8>) -> Self {
        match byte {
            Some(b'{') => Self::BeginObject,
            Some(b'}') => Self::EndObject,
            Some(b'[') => Self::BeginList,
            Some(b']') => Self::EndList,
            Some(b',') => Self::Comma,
            Some(b':') => Self::Colon,
            Some(b'"') => Self::String,
            Some(_) => Self::Other,
            None => Self::Eof,
        }
    }

    /// Single-byte tokens that can be consumed without decoding.
    #[inline]
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::BeginObject
                | Self::EndObject
                | Self::BeginList
                | Self::EndList
                | Self::Comma
                | Self::Colon
        )
    }

    /// Human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::BeginObject => "'{'",
            Self::EndObject => "'}'",
            Self::BeginList => "'['",
            Self::EndList => "']'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::String => "string",
            Self::Other => "literal",
            Self::Eof => "EOF",
        }
    }
}

/// Bytes that terminate a bare literal.
#[inline]
pub(crate) fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b' ' | b'\n' | b'\r' | b'\t' | b'{' | b'}' | b'[' | b']' | b',' | b':' | b'"'
    )
}

/// Bytes that may appear inside a number literal.
#[inline]
pub(crate) fn is_number_byte(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
}

/// JSON numeric value as read from the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

/// A classified bare literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(Number),
}

static KEYWORDS: phf::Map<&'static str, Literal> = phf_map! {
    "null" => Literal::Null,
    "true" => Literal::Bool(true),
    "false" => Literal::Bool(false),
};

/// Longest keyword at the start of `bytes`. `true1` yields `true`.
pub(crate) fn keyword_prefix(bytes: &[u8]) -> Option<&'static str> {
    KEYWORDS
        .keys()
        .copied()
        .find(|keyword| bytes.starts_with(keyword.as_bytes()))
}

impl Literal {
    /// Classify a bare literal. Returns `None` for anything that is not a
    /// keyword or a well-formed JSON number.
    pub fn parse(text: &str) -> Option<Literal> {
        if let Some(keyword) = KEYWORDS.get(text) {
            return Some(*keyword);
        }
        parse_number(text).map(Literal::Number)
    }
}

/// Parse a JSON number. Integers that overflow 64 bits fall back to `f64`.
fn parse_number(text: &str) -> Option<Number> {
    let integral = scan_number(text.as_bytes())?;
    if integral {
        if text.starts_with('-') {
            if let Ok(value) = text.parse::<i64>() {
                return Some(Number::Signed(value));
            }
        } else if let Ok(value) = text.parse::<u64>() {
            return Some(Number::Unsigned(value));
        }
    }
    text.parse::<f64>().ok().map(Number::Float)
}

/// Validate `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
/// Returns `Some(true)` for integers, `Some(false)` for fractions or exponents.
fn scan_number(bytes: &[u8]) -> Option<bool> {
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i += 1 + count_digits(&bytes[i + 1..]),
        _ => return None,
    }

    let mut integral = true;

    if bytes.get(i) == Some(&b'.') {
        let digits = count_digits(&bytes[i + 1..]);
        if digits == 0 {
            return None;
        }
        i += 1 + digits;
        integral = false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let digits = count_digits(&bytes[i..]);
        if digits == 0 {
            return None;
        }
        i += digits;
        integral = false;
    }

    (i == bytes.len()).then_some(integral)
}

#[inline]
fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
