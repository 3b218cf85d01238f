//! Human-readable renderings of a parse result.
//!
//! Both renderings are lossy: spans are truncated, strings are printed without
//! quoting rules. They are meant for eyeballing a document, not for feeding
//! back into a parser.
use core::fmt::{self, Write};

use crate::{trace::Trace, value::Value};

const ELLIPSIS: &str = " ...";

/// Lists every recorded span, one per line, indented four spaces per depth
/// level, followed by the source text it covers.
///
/// Source text longer than `max_len` characters is cut to its first
/// `max_len - 4` characters and marked with ` ...`. Lengths are counted in
/// characters, not bytes, so multi-byte text is not cut short.
///
/// ```
/// use jsontrace::SpanDump;
///
/// let text = r#"{"abc":[1]}"#;
/// let doc = jsontrace::parse(text).unwrap();
/// assert_eq!(
///     SpanDump::new(text, doc.trace(), 8).to_string(),
///     concat!(
///         "|-Object at depth 0 from 0 to 10 = {\"ab ...\n",
///         "    |-Key:Val at depth 1 from 1 to 9 = \"abc ...\n",
///         "    |-String at depth 1 from 1 to 5 = \"abc\"\n",
///         "    |-Array at depth 1 from 7 to 9 = [1]\n",
///         "        |-Number at depth 2 from 8 to 8 = 1\n",
///     )
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SpanDump<'a> {
    text: &'a str,
    trace: &'a Trace,
    max_len: usize,
}

impl<'a> SpanDump<'a> {
    /// `text` must be the input `trace` was recorded from.
    #[must_use]
    pub fn new(text: &'a str, trace: &'a Trace, max_len: usize) -> Self {
        Self {
            text,
            trace,
            max_len,
        }
    }
}

impl fmt::Display for SpanDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in self.trace {
            for _ in 0..span.depth {
                f.write_str("    ")?;
            }
            write!(
                f,
                "|-{} at depth {} from {} to {} = ",
                span.kind,
                span.depth,
                span.start,
                span.end.saturating_sub(1)
            )?;

            let source = span.source(self.text).unwrap_or_default();
            if source.char_indices().nth(self.max_len).is_none() {
                f.write_str(source)?;
            } else {
                let keep = self.max_len.saturating_sub(ELLIPSIS.len());
                let cut = source.char_indices().nth(keep).map_or(source.len(), |(i, _)| i);
                f.write_str(&source[..cut])?;
                f.write_str(ELLIPSIS)?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

/// Renders a value tree, two spaces of indent per level.
///
/// ```
/// let doc = jsontrace::parse(r#"{"k": [true, "v"]}"#).unwrap();
/// assert_eq!(
///     jsontrace::TreeDump(doc.value()).to_string(),
///     "Object:\n Key = k:\n  Array:\n    True\n    String: \"v\"\n"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeDump<'a>(pub &'a Value);

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self.0, 0)
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match value {
        Value::Null => f.write_str("Null\n"),
        Value::Boolean(true) => f.write_str("True\n"),
        Value::Boolean(false) => f.write_str("False\n"),
        Value::Number(n) => writeln!(f, "Number: {n}"),
        Value::String(s) => writeln!(f, "String: \"{s}\""),
        Value::Array(items) => {
            f.write_str("Array:\n")?;
            for item in items {
                write_value(f, item, depth + 1)?;
            }
            Ok(())
        }
        Value::Object(members) => {
            f.write_str("Object:\n")?;
            for (key, item) in members {
                indent(f, depth)?;
                writeln!(f, " Key = {key}:")?;
                write_value(f, item, depth + 1)?;
            }
            Ok(())
        }
    }
}
