#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsontrace::{Parser, ParserOptions, SpanKind, SyntaxError};
use jsontrace::Value as Decoded;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 2; // 1 flag byte + 1 depth byte

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Insignificant bytes between values. The parser treats `,` and whitespace
/// alike, so both are mixed in. The non-ASCII separators only count as
/// whitespace when the Unicode flag is set; U+00A0 never does.
static SEPARATOR_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    b"\x0B",
    b"\x0C",
    b",",
    b",,",
    "\u{00A0}".as_bytes(),
    "\u{2003}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{3000}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07);
        data[1] = with_rng(|rng| rng.next_u32() as u8);

        let mut prefix = HEADER;

        while prefix < size {
            let limit = max_size - prefix;

            prefix += append_separator(&mut data[prefix..], limit);
            prefix += append_value(&mut data[prefix..], size, limit);
            prefix += append_separator(&mut data[prefix..], limit);
        }

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight separator runs to `buf` without exceeding `limit`.
/// Returns the number of bytes written.
fn append_separator(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let runs = rng.random_range(1..=limit.min(8));
        let mut written = 0;

        for _ in 0..runs {
            let s = SEPARATOR_TABLE[rng.random_range(0..SEPARATOR_TABLE.len())];
            if written + s.len() > limit {
                break;
            }
            buf[written..written + s.len()].copy_from_slice(s);
            written += s.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2 + 1).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// A JSON value whose strings serialize without escapes, so the parser and
/// `serde_json` must agree on its shape.
#[derive(Debug)]
struct ArbitraryValue(Value);

fn plain_string(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<String> {
    let s: String = u.arbitrary()?;
    Ok(s.chars()
        .filter(|c| !matches!(c, '"' | '\\') && !c.is_control())
        .collect())
}

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(plain_string(u)?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let len = u.arbitrary_len::<ArbitraryValue>()?;
                let mut m = Map::new();
                for _ in 0..len {
                    let key = plain_string(u)?;
                    m.insert(key, ArbitraryValue::arbitrary(u)?.0);
                }
                Value::Object(m)
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn parser(data: &[u8]) {
    if data.len() <= HEADER {
        return;
    }

    let flags = data[0];
    // Small limits exercise the depth guard; 0 keeps the default.
    let max_depth = match data[1] {
        0 => ParserOptions::default().max_depth,
        n => usize::from(n & 0x3F),
    };
    let text = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    let options = ParserOptions {
        max_depth,
        allow_unicode_whitespace: flags & 1 != 0,
        strict_key_separator: flags & 2 != 0,
        panic_on_error: false,
    };

    let parsed = Parser::new(&text, options).parse();

    // Without backslashes there are no escapes, and on that subset any
    // document `serde_json` accepts must decode to the same shape.
    if !text.contains('\\') {
        if let Ok(reference) = serde_json::from_str::<Value>(&text) {
            match &parsed {
                Ok(doc) => {
                    assert!(same_shape(doc.value(), &reference), "{text:?}");
                    assert_eq!(doc.end(), text.trim_end_matches([' ', '\t', '\n', '\r']).len());
                }
                Err(err) => assert!(
                    matches!(err.kind(), SyntaxError::RecursionLimit(_)),
                    "{text:?}: {err}"
                ),
            }
        }
    }

    match parsed {
        Ok(doc) => {
            assert!(doc.end() <= text.len());
            assert!(text.is_char_boundary(doc.end()));

            let spans = doc.trace().as_slice();
            let first = spans.first().expect("a parsed value records a span");
            assert_eq!(first.depth, 0);
            assert_eq!(first.end, doc.end());
            assert_eq!(first.kind, doc.value().kind());

            for span in spans {
                assert!(!span.is_placeholder(), "{span:?}");
                assert_ne!(span.kind, SpanKind::Undefined);
                assert!(span.start < span.end, "{span:?}");
                assert!(span.source(&text).is_some(), "{span:?}");
                assert!(span.depth <= max_depth, "{span:?}");
            }
        }
        Err(err) => {
            assert!(err.offset() <= text.len());
            assert!(text.is_char_boundary(err.offset()));
            if let SyntaxError::RecursionLimit(limit) = err.kind() {
                assert_eq!(*limit, max_depth);
            }
        }
    }
}

/// Variants, child counts, keys and string contents agree. Numbers are only
/// matched by kind since the two sides may round float lexemes differently.
fn same_shape(ours: &Decoded, reference: &Value) -> bool {
    match (ours, reference) {
        (Decoded::Null, Value::Null) | (Decoded::Number(_), Value::Number(_)) => true,
        (Decoded::Boolean(a), Value::Bool(b)) => a == b,
        (Decoded::String(a), Value::String(b)) => a == b,
        (Decoded::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
        }
        (Decoded::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|w| same_shape(v, w)))
        }
        _ => false,
    }
}

fuzz_target!(|data: &[u8]| parser(data));
