//! lazyjson Core
//!
//! Lazy decoding and encoding of streams of JSON values. A stream holds one
//! value, many values separated only by optional whitespace, or many values
//! wrapped in a single top-level array. Values are decoded one at a time
//! through `serde`, without reading the whole stream.
//!
//! # Architecture
//!
//! - **lexer.rs** - Buffered byte-level lexer over any `Read`
//! - **token.rs** - Token classes, keyword and number classification
//! - **de.rs** - Streaming `serde` decoder reading one value at a time
//! - **ser.rs** - Buffered output of `serde_json`-encoded values
//! - **framing.rs** - Framing modes and detection
//! - **iter.rs** - Pull cursor over the values of a stream
//! - **seq.rs** - `Iterator` adapters, including the lazy `Sequence`
//! - **stream.rs** - Entry points (`decode_from_reader`, `open_iterator`, ...)
//! - **config.rs** - Buffer size, nesting limit, output delimiting
//!
//! Elements without a fixed shape decode into [`Value`], re-exported from
//! `serde_json`.
//!
//! # Example
//!
//! ```
//! use lazyjson_core::{decode_to_sequence, FramingMode, Value};
//!
//! let input = br#"[{"id": 1}, {"id": 2}]"#;
//! let ids: Vec<i64> = decode_to_sequence::<Value, _>(&input[..], FramingMode::AutoDetect)
//!     .map(|v| v.map(|v| v.get("id").and_then(Value::as_i64).unwrap_or(0)))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(ids, [1, 2]);
//! ```

pub mod config;
pub mod de;
pub mod error;
pub mod framing;
pub mod iter;
pub mod lexer;
pub mod seq;
pub mod ser;
pub mod stream;
pub mod token;

pub use config::StreamConfig;
pub use de::Decoder;
pub use error::{Error, Result};
pub use framing::{FramingMode, UnknownFramingMode};
pub use iter::StreamIter;
pub use lexer::ReaderLexer;
pub use seq::{Sequence, Values};
pub use ser::ValueWriter;
pub use serde_json::Value;
pub use stream::{
    decode_from_reader, decode_to_sequence, encode_sequence, encode_to_writer, iterate_over_stream,
    open_iterator,
};
pub use token::TokenClass;
