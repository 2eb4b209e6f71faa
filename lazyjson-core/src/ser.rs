//! Buffered output for a sequence of encoded values.
//!
//! Each value is written compactly by `serde_json`. Values follow each other
//! with no separator, except where the end of one bare literal would run into
//! the start of the next:
//!
//! ```text
//! {"a":1}  {"a":2}   →  {"a":1}{"a":2}
//! "x"      [1]       →  "x"[1]
//! 1        2         →  1 2
//! true     -3        →  true -3
//! ```
//!
//! The inserted space is plain JSON whitespace, so the output always reads
//! back as the same values in whitespace-separated framing.

use std::io::{self, BufWriter, Write};

use serde::Serialize;

use crate::error::Result;
use crate::token::is_delimiter;

/// Writes encoded values to `W` through a buffer of fixed capacity.
///
/// Call [`release`](Self::release) on every exit path; it flushes the buffer
/// and the underlying writer and reports failures that a drop would hide.
#[derive(Debug)]
pub struct ValueWriter<W: Write> {
    out: BufWriter<W>,
    /// Last byte handed to `out`
    last: Option<u8>,
    /// Next write starts a value that may need a space in front
    gap_pending: bool,
}

impl<W: Write> ValueWriter<W> {
    pub fn with_capacity(capacity: usize, inner: W) -> Self {
        Self {
            out: BufWriter::with_capacity(capacity, inner),
            last: None,
            gap_pending: false,
        }
    }

    /// Encode one value.
    pub fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.gap_pending = self.last.is_some_and(|b| !is_delimiter(b));
        serde_json::to_writer(&mut *self, value)?;
        Ok(())
    }

    /// Raw bytes between values, never part of a value.
    pub fn write_separator(&mut self, bytes: &[u8]) -> Result<()> {
        self.gap_pending = false;
        self.write_all(bytes)?;
        Ok(())
    }

    /// Flush everything and give back the underlying writer.
    pub fn release(self) -> io::Result<W> {
        let mut inner = self.out.into_inner().map_err(io::IntoInnerError::into_error)?;
        inner.flush()?;
        Ok(inner)
    }
}

impl<W: Write> Write for ValueWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let Some(&first) = data.first() else {
            return Ok(0);
        };
        if self.gap_pending {
            if !is_delimiter(first) {
                self.out.write_all(b" ")?;
                self.last = Some(b' ');
            }
            self.gap_pending = false;
        }
        let written = self.out.write(data)?;
        if written > 0 {
            self.last = Some(data[written - 1]);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
