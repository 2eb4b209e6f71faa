//! Framing tests: array-wrapped streams, auto-detection and malformed framing

mod common;

use common::{abc, StringData, Trickle, ABC_CONCATENATED};
use lazyjson_core::{decode_to_sequence, open_iterator, Error, FramingMode, Value};

const ABC_WRAPPED: &str = r#"[{"data":"a"},{"data":"b"},{"data":"c"}]"#;

fn collect<T: serde::de::DeserializeOwned>(input: &str, mode: FramingMode) -> Result<Vec<T>, Error> {
    decode_to_sequence(input.as_bytes(), mode).collect()
}

// =============================================================================
// Array-wrapped
// =============================================================================

mod array_wrapped {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_and_detected() {
        for mode in [FramingMode::ArrayWrapped, FramingMode::AutoDetect] {
            assert_eq!(collect::<StringData>(ABC_WRAPPED, mode).unwrap(), abc());
        }
    }

    #[test]
    fn whitespace_around_elements() {
        let input = "\n [ {\"data\":\"a\"} ,\n\t{\"data\":\"b\"},{\"data\":\"c\"}\n ] \n";
        assert_eq!(collect::<StringData>(input, FramingMode::AutoDetect).unwrap(), abc());
    }

    #[test]
    fn empty_array() {
        for input in ["[]", " [ \n ] "] {
            let mut iter = open_iterator(input.as_bytes(), FramingMode::ArrayWrapped).unwrap();
            assert!(!iter.has_next().unwrap());
            assert!(!iter.has_next().unwrap());
            assert!(matches!(
                iter.next::<Value>(),
                Err(Error::UnexpectedEndOfInputOnDecode { .. })
            ));
        }
    }

    #[test]
    fn nested_arrays_are_elements() {
        let values: Vec<Vec<u8>> = collect("[[1,2],[],[3]]", FramingMode::AutoDetect).unwrap();
        assert_eq!(values, vec![vec![1, 2], vec![], vec![3]]);
    }

    #[test]
    fn chunk_boundaries_do_not_matter() {
        for chunk in [1, 2, 5] {
            let items: Vec<StringData> =
                decode_to_sequence(Trickle::new(ABC_WRAPPED.as_bytes(), chunk), FramingMode::AutoDetect)
                    .collect::<Result<_, _>>()
                    .unwrap();
            assert_eq!(items, abc());
        }
    }

    #[test]
    fn offset_tracks_cursor() {
        let mut iter = open_iterator("[10, 20]".as_bytes(), FramingMode::ArrayWrapped).unwrap();
        assert_eq!(iter.offset(), 1);
        assert_eq!(iter.next::<u8>().unwrap(), 10);
        assert_eq!(iter.offset(), 3);
        assert_eq!(iter.next::<u8>().unwrap(), 20);
        assert!(!iter.has_next().unwrap());
        assert_eq!(iter.offset(), 8);
    }
}

// =============================================================================
// Malformed array-wrapped streams
// =============================================================================

mod malformed {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trailing_comma() {
        let err = collect::<u8>("[1,2,]", FramingMode::ArrayWrapped).unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { offset: 5, expected: "a value", found: "']'" }));
    }

    #[test]
    fn missing_closing_bracket() {
        let mut iter = open_iterator("[1,2".as_bytes(), FramingMode::ArrayWrapped).unwrap();
        assert_eq!(iter.next::<u8>().unwrap(), 1);
        assert_eq!(iter.next::<u8>().unwrap(), 2);
        let err = iter.has_next().unwrap_err();
        assert!(matches!(err, Error::PrematureEndOfInput { offset: 4, expected: "closing bracket" }));
        assert!(err.is_eof());
    }

    #[test]
    fn opening_bracket_only() {
        let err = collect::<u8>("[", FramingMode::AutoDetect).unwrap_err();
        assert!(matches!(err, Error::PrematureEndOfInput { offset: 1, expected: "closing bracket" }));
    }

    #[test]
    fn missing_comma() {
        let mut iter = open_iterator("[1 2]".as_bytes(), FramingMode::ArrayWrapped).unwrap();
        assert_eq!(iter.next::<u8>().unwrap(), 1);
        assert!(iter.has_next().unwrap());
        let err = iter.next::<u8>().unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { offset: 3, expected: "','", found: "literal" }));
    }

    #[test]
    fn framing_mismatch() {
        let err = open_iterator(ABC_CONCATENATED.as_bytes(), FramingMode::ArrayWrapped).unwrap_err();
        assert!(matches!(err, Error::FramingMismatch { offset: 0 }));

        let err = open_iterator(&b"   "[..], FramingMode::ArrayWrapped).unwrap_err();
        assert!(matches!(err, Error::FramingMismatch { offset: 3 }));
    }

    #[test]
    fn dangling_literal() {
        let err = collect::<u8>("[1] x", FramingMode::AutoDetect).unwrap_err();
        assert!(matches!(err, Error::DanglingData { offset: 4, another_array: false }));
        assert_eq!(err.to_string(), "dangling data after last bracket at offset 4");
    }

    #[test]
    fn dangling_second_array() {
        let mut iter = open_iterator("[1,2] [3]".as_bytes(), FramingMode::AutoDetect).unwrap();
        assert_eq!(iter.next::<u8>().unwrap(), 1);
        assert_eq!(iter.next::<u8>().unwrap(), 2);

        let err = iter.has_next().unwrap_err();
        assert!(matches!(err, Error::DanglingData { offset: 6, another_array: true }));
        assert!(err.to_string().contains("another top-level array follows"), "{err}");
    }
}

// =============================================================================
// Auto-detection and whitespace-separated streams of arrays
// =============================================================================

mod detection {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn non_array_start_is_whitespace_separated() {
        let iter = open_iterator(ABC_CONCATENATED.as_bytes(), FramingMode::AutoDetect).unwrap();
        assert_eq!(iter.framing(), FramingMode::WhitespaceSeparated);
        assert_eq!(iter.offset(), 0);
        assert_eq!(
            iter.into_values::<StringData>().collect::<Result<Vec<_>, _>>().unwrap(),
            abc()
        );
    }

    #[test]
    fn empty_stream_detects_whitespace() {
        let iter = open_iterator(&b""[..], FramingMode::AutoDetect).unwrap();
        assert_eq!(iter.framing(), FramingMode::WhitespaceSeparated);
        assert_eq!(iter.into_values::<Value>().count(), 0);
    }

    #[test]
    fn explicit_whitespace_keeps_arrays_whole() {
        let values: Vec<Vec<u8>> = collect("[1,2] [3]\n[]", FramingMode::WhitespaceSeparated).unwrap();
        assert_eq!(values, vec![vec![1, 2], vec![3], vec![]]);
    }

    #[test]
    fn mode_from_name() {
        let mode: FramingMode = "array".parse().unwrap();
        assert_eq!(collect::<StringData>(ABC_WRAPPED, mode).unwrap(), abc());
        assert!("ndjson".parse::<FramingMode>().is_err());
    }
}
