//! Entry points for reading and writing value streams.
//!
//! The free functions use [`StreamConfig::default`]; each has a method of the
//! same name on [`StreamConfig`] for custom buffer sizes, nesting limits or
//! newline-delimited output.
//!
//! | Function               | Framing                 | Resolution   |
//! |------------------------|-------------------------|--------------|
//! | `decode_from_reader`   | exactly one value       | n/a          |
//! | `iterate_over_stream`  | whitespace-separated    | n/a          |
//! | `open_iterator`        | any                     | on call      |
//! | `decode_to_sequence`   | any                     | first pull   |

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StreamConfig;
use crate::de::Decoder;
use crate::error::Result;
use crate::framing::FramingMode;
use crate::iter::StreamIter;
use crate::lexer::ReaderLexer;
use crate::seq::Sequence;
use crate::ser::ValueWriter;

impl StreamConfig {
    fn lexer<R: Read>(&self, reader: R) -> ReaderLexer<R> {
        ReaderLexer::with_capacity(reader, self.buffer_capacity)
    }

    fn writer<W: Write>(&self, writer: W) -> ValueWriter<W> {
        ValueWriter::with_capacity(self.buffer_capacity, writer)
    }

    /// Write every value of `values`, back to back.
    ///
    /// Adjacent bare literals (`1`, `true`, ...) are kept apart by one space,
    /// so the output always decodes back to the same values. The writer is
    /// flushed whether or not encoding succeeds; an encoding error takes
    /// precedence over a flush error.
    pub fn encode_sequence<I, W>(&self, values: I, writer: W) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Serialize,
        W: Write,
    {
        let mut out = self.writer(writer);
        let written = self.write_values(&mut out, values);
        let released = out.release();
        let count = written?;
        released?;
        tracing::debug!(count, newline_delimited = self.newline_delimited, "encoded value sequence");
        Ok(())
    }

    fn write_values<I, W>(&self, out: &mut ValueWriter<W>, values: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Serialize,
        W: Write,
    {
        let mut count = 0;
        for value in values {
            out.write_value(&value)?;
            if self.newline_delimited {
                out.write_separator(b"\n")?;
            }
            count += 1;
        }
        Ok(count)
    }

    /// Write one value with no framing and no trailing separator.
    pub fn encode_to_writer<T, W>(&self, value: &T, writer: W) -> Result<()>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let mut out = self.writer(writer);
        let written = out.write_value(value);
        let released = out.release();
        written?;
        released?;
        Ok(())
    }

    /// Decode the only value of `reader`.
    ///
    /// Anything but whitespace after the value fails with
    /// [`Error::TrailingBytesAfterSingleValue`](crate::Error::TrailingBytesAfterSingleValue).
    pub fn decode_from_reader<T, R>(&self, reader: R) -> Result<T>
    where
        T: DeserializeOwned,
        R: Read,
    {
        let mut lexer = self.lexer(reader);
        let value = Decoder::new(&mut lexer, self.max_depth).decode()?;
        lexer.expect_eof()?;
        Ok(value)
    }

    /// Cursor over a whitespace-separated stream. Reads nothing yet.
    pub fn iterate_over_stream<R: Read>(&self, reader: R) -> StreamIter<R> {
        StreamIter::whitespace_separated(self.lexer(reader), self.max_depth)
    }

    /// Cursor over a stream in `mode`, resolving the framing now.
    pub fn open_iterator<R: Read>(&self, reader: R, mode: FramingMode) -> Result<StreamIter<R>> {
        StreamIter::open(self.lexer(reader), mode, self.max_depth)
    }

    /// Lazy sequence of `T` values in `mode`. Reads nothing until the first pull.
    pub fn decode_to_sequence<T, R>(&self, reader: R, mode: FramingMode) -> Sequence<R, T>
    where
        T: DeserializeOwned,
        R: Read,
    {
        Sequence::new(self.lexer(reader), mode, self.max_depth)
    }
}

/// Write every value of `values` back to back. See [`StreamConfig::encode_sequence`].
pub fn encode_sequence<I, W>(values: I, writer: W) -> Result<()>
where
    I: IntoIterator,
    I::Item: Serialize,
    W: Write,
{
    StreamConfig::default().encode_sequence(values, writer)
}

/// Write one value. See [`StreamConfig::encode_to_writer`].
pub fn encode_to_writer<T, W>(value: &T, writer: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    StreamConfig::default().encode_to_writer(value, writer)
}

/// Decode the only value of `reader`. See [`StreamConfig::decode_from_reader`].
pub fn decode_from_reader<T, R>(reader: R) -> Result<T>
where
    T: DeserializeOwned,
    R: Read,
{
    StreamConfig::default().decode_from_reader(reader)
}

/// Whitespace-separated cursor. See [`StreamConfig::iterate_over_stream`].
pub fn iterate_over_stream<R: Read>(reader: R) -> StreamIter<R> {
    StreamConfig::default().iterate_over_stream(reader)
}

/// Cursor with eager framing resolution. See [`StreamConfig::open_iterator`].
pub fn open_iterator<R: Read>(reader: R, mode: FramingMode) -> Result<StreamIter<R>> {
    StreamConfig::default().open_iterator(reader, mode)
}

/// Lazy typed sequence. See [`StreamConfig::decode_to_sequence`].
pub fn decode_to_sequence<T, R>(reader: R, mode: FramingMode) -> Sequence<R, T>
where
    T: DeserializeOwned,
    R: Read,
{
    StreamConfig::default().decode_to_sequence(reader, mode)
}
