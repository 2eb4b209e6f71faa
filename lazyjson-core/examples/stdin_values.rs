//! Print every JSON value read from stdin, one compact value per line.
//!
//! The framing can be given as the first argument: `whitespace`, `array` or
//! `auto` (default).
//!
//! ```text
//! echo '[{"a":1}, {"b":[2, 3]}]' | cargo run --example stdin_values
//! ```

use std::io::{self, BufWriter};

use lazyjson_core::{FramingMode, StreamConfig, Value};

fn main() {
    let mode: FramingMode = match std::env::args().nth(1).map(|arg| arg.parse()).transpose() {
        Ok(mode) => mode.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let config = StreamConfig::default().with_newline_delimited(true);
    let values = config.decode_to_sequence::<Value, _>(io::stdin().lock(), mode);

    let mut failed = None;
    let decoded = values.map_while(|value| value.map_err(|e| failed = Some(e)).ok());
    if let Err(e) = config.encode_sequence(decoded, BufWriter::new(io::stdout().lock())) {
        eprintln!("write error: {e}");
        std::process::exit(1);
    }
    if let Some(e) = failed {
        eprintln!("decode error: {e}");
        std::process::exit(1);
    }
}
