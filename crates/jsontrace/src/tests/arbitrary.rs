use alloc::{string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

/// A JSON document within the subset the parser decodes faithfully: strings
/// never need escaping when serialized.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlainJson(pub serde_json::Value);

fn plain_string(g: &mut Gen) -> String {
    String::arbitrary(g)
        .chars()
        .filter(|c| !matches!(c, '"' | '\\') && !c.is_control())
        .collect()
}

fn number(g: &mut Gen) -> serde_json::Number {
    if bool::arbitrary(g) {
        return i64::arbitrary(g).into();
    }
    let mut value = f64::arbitrary(g);
    while !value.is_finite() {
        value = f64::arbitrary(g);
    }
    serde_json::Number::from_f64(value).unwrap_or_else(|| serde_json::Number::from(0_i64))
}

impl Arbitrary for PlainJson {
    fn arbitrary(g: &mut Gen) -> Self {
        use serde_json::Value;

        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            let choices = if depth == 0 { 4 } else { 6 };
            match usize::arbitrary(g) % choices {
                0 => Value::Null,
                1 => Value::Bool(bool::arbitrary(g)),
                2 => Value::Number(number(g)),
                3 => Value::String(plain_string(g)),
                4 => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Object(
                        (0..len)
                            .map(|_| (plain_string(g), gen_val(g, depth - 1)))
                            .collect(),
                    )
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        Self(gen_val(g, depth))
    }
}

/// Text assembled from JSON punctuation, literals and fragments, so random
/// inputs reach deep into the grammar instead of failing on the first byte.
#[derive(Debug, Clone)]
pub(crate) struct JsonishText(pub String);

const PIECES: &[&str] = &[
    "{", "}", "[", "]", ",", ":", "\"", "\\", "1", "-", "e", ".", "+", "0", "true", "null",
    "false", "nul", " ", "\n", "\t", "a", "\u{e9}", "\u{3000}", "{\"k\":", "[1,", "\"s\"",
];

impl Arbitrary for JsonishText {
    fn arbitrary(g: &mut Gen) -> Self {
        let picks: Vec<u8> = Vec::arbitrary(g);
        Self(
            picks
                .into_iter()
                .map(|i| PIECES[usize::from(i) % PIECES.len()])
                .collect(),
        )
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(self.0.shrink().map(Self))
    }
}
