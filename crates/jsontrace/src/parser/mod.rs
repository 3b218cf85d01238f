//! Recursive-descent parser.
//!
//! Each production takes the container it appends into and the offset to
//! start from, and returns the offset just past what it consumed. Lookahead is
//! a single character after skipping whitespace; nothing is ever backtracked.
//!
//! Containers are built locally and handed to their parent only once their
//! closing delimiter has been consumed, so a value is never modified after it
//! is stored. Their spans, on the other hand, are opened before the children
//! are parsed and closed afterwards, which keeps the trace in document order.
//!
//! Depth is the number of arrays and objects currently open. A container's
//! span carries the depth it was opened at; its children (and, for objects,
//! each key/value pair together with its key and value) sit one level deeper.

mod error;
mod options;
mod scanner;


use alloc::string::String;

pub use error::{ErrorContext, ParserError, SyntaxError};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};
use scanner::{Scanner, is_number_start};

use crate::{
    trace::{SpanKind, Trace},
    value::{Array, Map, Number, Value},
};

/// Parses `text` with the default [`ParserOptions`].
///
/// Only the first value in `text` is decoded; anything after it is ignored
/// and can be located through [`Document::end`].
///
/// ```
/// let doc = jsontrace::parse("1 2").unwrap();
/// assert_eq!(doc.value().as_number().unwrap().as_str(), "1");
/// assert_eq!(doc.end(), 1);
/// ```
///
/// # Errors
///
/// Returns the first [`ParserError`] encountered.
pub fn parse(text: &str) -> Result<Document, ParserError> {
    Parser::new(text, ParserOptions::default()).parse()
}

/// A successfully decoded value together with its span trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Array,
    trace: Trace,
    end: usize,
}

impl Document {
    /// The decoded top-level value.
    #[must_use]
    pub fn value(&self) -> &Value {
        // `Parser::parse_into` appends exactly one value on success.
        &self.root[0]
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.root.into_iter().next().unwrap_or_default()
    }

    /// The single-element document root holding [`Document::value`].
    #[must_use]
    pub fn root(&self) -> &Array {
        &self.root
    }

    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Offset just past the top-level value. Input from here on was not
    /// examined.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn into_parts(self) -> (Value, Trace) {
        let trace = self.trace;
        let value = self.root.into_iter().next().unwrap_or_default();
        (value, trace)
    }
}

/// Single-use parser over one fully buffered input.
#[derive(Debug)]
pub struct Parser<'src> {
    scanner: Scanner<'src>,
    options: ParserOptions,
    trace: Trace,
    depth: usize,
}

impl<'src> Parser<'src> {
    #[must_use]
    pub fn new(text: &'src str, options: ParserOptions) -> Self {
        Self {
            scanner: Scanner::new(text, options.allow_unicode_whitespace),
            options,
            trace: Trace::new(),
            depth: 0,
        }
    }

    /// Decodes the first value of the input.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParserError`] encountered.
    pub fn parse(self) -> Result<Document, ParserError> {
        let mut root = Array::with_capacity(1);
        let (trace, end) = self.parse_into(&mut root)?;
        Ok(Document { root, trace, end })
    }

    /// Decodes the first value of the input and appends it to `root`,
    /// returning the trace and the offset just past the value.
    ///
    /// On error `root` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParserError`] encountered.
    pub fn parse_into(mut self, root: &mut Array) -> Result<(Trace, usize), ParserError> {
        let text = self.scanner.text();
        tracing::debug!(len = text.len(), "parsing document");

        match self.parse_value(root, 0) {
            Ok(end) => {
                tracing::debug!(end, spans = self.trace.len(), "parsed document");
                Ok((self.trace, end))
            }
            Err(err) => {
                #[cfg(any(test, feature = "fuzzing"))]
                if self.options.panic_on_error {
                    panic!("{err}");
                }
                tracing::debug!(error = %err, offset = err.offset(), "parse failed");
                Err(err)
            }
        }
    }

    /// Dispatches on the next non-whitespace character.
    fn parse_value(&mut self, parent: &mut Array, pos: usize) -> Result<usize, ParserError> {
        let start = self.scanner.skip_whitespace(pos)?;
        let c = self.scanner.expect_char(start)?;
        match c {
            '{' => self.parse_object(parent, start),
            '[' => self.parse_array(parent, start),
            '"' => self.parse_string(parent, start),
            c if is_number_start(c) => self.parse_number(parent, start),
            c => match self.scanner.literal_at(start) {
                Some(literal) => {
                    let end = start + literal.text().len();
                    self.trace.record(literal.kind(), start, end, self.depth);
                    parent.push(literal.value());
                    Ok(end)
                }
                None => Err(self.scanner.error(SyntaxError::UnexpectedChar(c), start)),
            },
        }
    }

    fn parse_object(&mut self, parent: &mut Array, pos: usize) -> Result<usize, ParserError> {
        let span = self.trace.open(SpanKind::Object, pos, self.depth);
        self.enter(pos)?;

        let mut map = Map::new();
        let mut end = self.scanner.skip_whitespace(pos + 1)?;
        while self.scanner.expect_char(end)? != '}' {
            end = self.parse_keyval(&mut map, end)?;
            end = self.scanner.skip_separator_or_whitespace(end)?;
        }
        end += 1;

        self.leave();
        self.trace.close(span, end);
        tracing::trace!(start = pos, end, depth = self.depth, members = map.len(), "object");
        parent.push(Value::Object(map));
        Ok(end)
    }

    fn parse_keyval(&mut self, parent: &mut Map, pos: usize) -> Result<usize, ParserError> {
        let start = self.scanner.skip_whitespace(pos)?;
        let span = self.trace.open(SpanKind::KeyVal, start, self.depth);

        let c = self.scanner.expect_char(start)?;
        if c != '"' {
            return Err(self.scanner.error(SyntaxError::MalformedKey(c), start));
        }
        let (key, end) = self.scan_string(start)?;

        let colon = self.scanner.skip_whitespace(end)?;
        let sep = self.scanner.expect_char(colon)?;
        if self.options.strict_key_separator && sep != ':' {
            return Err(self.scanner.error(SyntaxError::UnexpectedChar(sep), colon));
        }

        let mut slot = Array::with_capacity(1);
        let end = self.parse_value(&mut slot, colon + sep.len_utf8())?;
        parent.insert(key, slot.pop().unwrap_or_default());

        self.trace.close(span, end);
        Ok(end)
    }

    fn parse_array(&mut self, parent: &mut Array, pos: usize) -> Result<usize, ParserError> {
        let span = self.trace.open(SpanKind::Array, pos, self.depth);
        self.enter(pos)?;

        let mut items = Array::new();
        let mut end = self.scanner.skip_whitespace(pos + 1)?;
        while self.scanner.expect_char(end)? != ']' {
            end = self.parse_value(&mut items, end)?;
            end = self.scanner.skip_separator_or_whitespace(end)?;
        }
        end += 1;

        self.leave();
        self.trace.close(span, end);
        tracing::trace!(start = pos, end, depth = self.depth, items = items.len(), "array");
        parent.push(Value::Array(items));
        Ok(end)
    }

    fn parse_string(&mut self, parent: &mut Array, pos: usize) -> Result<usize, ParserError> {
        let (s, end) = self.scan_string(pos)?;
        parent.push(Value::String(s));
        Ok(end)
    }

    /// Scans the string whose opening quote is at `pos` and records its span.
    fn scan_string(&mut self, pos: usize) -> Result<(String, usize), ParserError> {
        let close = self.scanner.string_end(pos)?;
        let end = close + 1;
        self.trace.record(SpanKind::String, pos, end, self.depth);
        Ok((self.scanner.text()[pos + 1..close].into(), end))
    }

    fn parse_number(&mut self, parent: &mut Array, pos: usize) -> Result<usize, ParserError> {
        let end = self.scanner.number_end(pos);
        if end == pos {
            let c = self.scanner.expect_char(pos)?;
            return Err(self.scanner.error(SyntaxError::UnexpectedChar(c), pos));
        }
        self.trace.record(SpanKind::Number, pos, end, self.depth);
        parent.push(Value::Number(Number::from_raw(&self.scanner.text()[pos..end])));
        Ok(end)
    }

    fn enter(&mut self, pos: usize) -> Result<(), ParserError> {
        if self.depth >= self.options.max_depth {
            return Err(self
                .scanner
                .error(SyntaxError::RecursionLimit(self.options.max_depth), pos));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
