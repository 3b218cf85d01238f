//! Structural span log.
//!
//! The parser appends one [`Span`] per grammar element it recognises. Leaf
//! elements are recorded in one step. Containers and key/value pairs are
//! opened as a placeholder before their children are parsed and closed once
//! the closing delimiter has been consumed, so a parent always precedes its
//! children in the log.
use alloc::vec::Vec;
use core::{fmt, slice};

/// The grammar element a [`Span`] describes.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpanKind {
    #[default]
    Undefined,
    Null,
    True,
    False,
    Number,
    String,
    Array,
    Object,
    KeyVal,
}

impl SpanKind {
    /// Label used by the span dump.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Null => "NULL",
            Self::True => "True",
            Self::False => "False",
            Self::Number => "Number",
            Self::String => "String",
            Self::Array => "Array",
            Self::Object => "Object",
            Self::KeyVal => "Key:Val",
        }
    }

    /// Whether spans of this kind are opened before their children.
    #[must_use]
    pub fn is_two_phase(self) -> bool {
        matches!(self, Self::Array | Self::Object | Self::KeyVal)
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded element: byte range `start..end` of the input and the
/// nesting depth the element lives at.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    /// Byte offset of the element's first character.
    pub start: usize,
    /// Byte offset just past the element. Equal to `start` while a two-phase
    /// span is still open.
    pub end: usize,
    /// Number of arrays and objects enclosing the element.
    pub depth: usize,
}

impl Span {
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// A two-phase span that has been opened but not yet closed.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.kind.is_two_phase() && self.is_empty()
    }

    /// The slice of `text` this span covers.
    ///
    /// Returns `None` when `text` is not the input the span was recorded from.
    #[must_use]
    pub fn source<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// Handle to a span inside a [`Trace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanId(usize);

impl SpanId {
    /// Position of the span in recording order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only log of spans in recording order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    spans: Vec<Span>,
}

impl Trace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a placeholder with `start == end`. Close it with
    /// [`Trace::close`] after the element's children have been recorded.
    pub fn open(&mut self, kind: SpanKind, start: usize, depth: usize) -> SpanId {
        self.record(kind, start, start, depth)
    }

    /// Finalises a placeholder so it covers `start..end`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this trace or if `end` precedes the
    /// span's start.
    pub fn close(&mut self, id: SpanId, end: usize) {
        let span = &mut self.spans[id.0];
        assert!(span.start <= end, "span closed before its start");
        span.end = end;
    }

    /// Pushes a finished span.
    pub fn record(&mut self, kind: SpanKind, start: usize, end: usize, depth: usize) -> SpanId {
        debug_assert!(start <= end);
        let id = SpanId(self.spans.len());
        self.spans.push(Span {
            kind,
            start,
            end,
            depth,
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: SpanId) -> Option<&Span> {
        self.spans.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Span> {
        self.spans.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Span] {
        &self.spans
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Span;
    type IntoIter = slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

impl IntoIterator for Trace {
    type Item = Span;
    type IntoIter = alloc::vec::IntoIter<Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn placeholder_is_closed_in_place() {
        let mut trace = Trace::new();
        let outer = trace.open(SpanKind::Array, 0, 0);
        trace.record(SpanKind::Number, 1, 2, 1);
        assert!(trace.get(outer).unwrap().is_placeholder());

        trace.close(outer, 3);

        assert_eq!(
            trace.as_slice(),
            &[
                Span {
                    kind: SpanKind::Array,
                    start: 0,
                    end: 3,
                    depth: 0
                },
                Span {
                    kind: SpanKind::Number,
                    start: 1,
                    end: 2,
                    depth: 1
                },
            ]
        );
        assert_eq!(outer.index(), 0);
    }

    #[test]
    #[should_panic(expected = "span closed before its start")]
    fn closing_before_start_panics() {
        let mut trace = Trace::new();
        let id = trace.open(SpanKind::Object, 5, 0);
        trace.close(id, 4);
    }

    #[test]
    fn names_follow_dump_labels() {
        assert_eq!(SpanKind::default().name(), "Undefined");
        assert_eq!(SpanKind::Null.name(), "NULL");
        assert_eq!(SpanKind::KeyVal.to_string(), "Key:Val");
        assert!(SpanKind::KeyVal.is_two_phase());
        assert!(!SpanKind::String.is_two_phase());
    }

    #[test]
    fn source_slices_input() {
        let span = Span {
            kind: SpanKind::String,
            start: 1,
            end: 4,
            depth: 0,
        };
        assert_eq!(span.source("[\"a\"]"), Some("\"a\""));
        assert_eq!(span.source("x"), None);
    }
}
