//! Stream configuration.

use crate::de::DEFAULT_MAX_DEPTH;
use crate::lexer::{DEFAULT_BUFFER_CAPACITY, MIN_BUFFER_CAPACITY};

/// Settings shared by every entry point in [`crate::stream`].
///
/// ```
/// use lazyjson_core::StreamConfig;
///
/// let config = StreamConfig::default()
///     .with_buffer_capacity(64 * 1024)
///     .with_newline_delimited(true);
/// assert_eq!(config.max_depth(), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    pub(crate) buffer_capacity: usize,
    pub(crate) max_depth: usize,
    pub(crate) newline_delimited: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            newline_delimited: false,
        }
    }
}

impl StreamConfig {
    /// Size of the lexer read window and of the encoder output buffer.
    /// Values below 16 bytes are raised to 16.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(MIN_BUFFER_CAPACITY);
        self
    }

    /// Maximum object and array nesting accepted while decoding.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Write a newline after every value of an encoded sequence.
    pub fn with_newline_delimited(mut self, enabled: bool) -> Self {
        self.newline_delimited = enabled;
        self
    }

    /// Read window and output buffer size in bytes, never below 16.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Deepest object or array nesting a decode accepts.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether `encode_sequence` ends every value with `\n`.
    pub fn newline_delimited(&self) -> bool {
        self.newline_delimited
    }
}
