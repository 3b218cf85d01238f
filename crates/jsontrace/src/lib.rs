//! A recursive-descent JSON decoder that builds a typed [`Value`] tree and,
//! alongside it, records a [`Trace`] of structural spans (kind, byte range,
//! nesting depth) for diagnostic inspection.
//!
//! ```rust
//! use jsontrace::{SpanKind, Value};
//!
//! let doc = jsontrace::parse(r#"{"a": [1, 2e3]}"#).unwrap();
//! let Value::Object(map) = doc.value() else { panic!("expected object") };
//! assert_eq!(map["a"].as_array().unwrap()[1].as_number().unwrap().as_str(), "2e3");
//! assert_eq!(doc.trace().as_slice()[0].kind, SpanKind::Object);
//! ```
//!
//! The decoder is deliberately permissive: commas and whitespace are
//! interchangeable between elements, the character after an object key is
//! consumed without checking that it is a colon, and anything after the first
//! complete top-level value is ignored. Strings are taken verbatim up to the
//! next `"`; escape sequences are not decoded.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod dump;
mod parser;
mod trace;
mod value;

#[cfg(test)]
mod tests;

pub use dump::{SpanDump, TreeDump};
pub use parser::{
    DEFAULT_MAX_DEPTH, Document, ErrorContext, Parser, ParserError, ParserOptions, SyntaxError,
    parse,
};
pub use trace::{Span, SpanId, SpanKind, Trace};
pub use value::{Array, Map, Number, Value};
