use core::fmt;

use thiserror::Error;

use super::scanner::{ceil_char_boundary, floor_char_boundary};

/// A parse failure. Parsing stops at the first error; no partial document is
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} at {line}:{column}")]
pub struct ParserError {
    pub(crate) source: SyntaxError,
    pub(crate) offset: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("object key must be a string, found '{0}'")]
    MalformedKey(char),
    #[error("nesting deeper than {0} levels")]
    RecursionLimit(usize),
}

impl ParserError {
    /// Locates `source` at byte `offset` of `text`.
    pub(crate) fn new(source: SyntaxError, text: &str, offset: usize) -> Self {
        let before = &text[..floor_char_boundary(text, offset)];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self {
            source,
            offset,
            line,
            column,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &SyntaxError {
        &self.source
    }

    /// Byte offset into the input where the error was detected. Equal to the
    /// input length for [`SyntaxError::UnexpectedEnd`].
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line of [`ParserError::offset`].
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column, counted in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// The part of the offending line within `radius` bytes of the error.
    ///
    /// `text` must be the input that produced this error.
    ///
    /// ```
    /// let text = "{\"a\": }";
    /// let err = jsontrace::parse(text).unwrap_err();
    /// let ctx = err.context(text, 16);
    /// assert_eq!(ctx.to_string(), "{\"a\": }\n      ^");
    /// ```
    #[must_use]
    pub fn context<'a>(&self, text: &'a str, radius: usize) -> ErrorContext<'a> {
        let offset = floor_char_boundary(text, self.offset);
        let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line_end = text[offset..].find('\n').map_or(text.len(), |i| offset + i);
        let start = floor_char_boundary(text, offset.saturating_sub(radius).max(line_start));
        let end = ceil_char_boundary(text, offset.saturating_add(radius).min(line_end));
        ErrorContext {
            snippet: &text[start..end],
            caret: text[start..offset].chars().count(),
        }
    }
}

/// A window of input around an error, rendered as the snippet followed by a
/// caret line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorContext<'a> {
    pub snippet: &'a str,
    /// Character index of the error within `snippet`.
    pub caret: usize,
}

impl fmt::Display for ErrorContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.snippet)?;
        write!(f, "{:>width$}", "^", width = self.caret + 1)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn position_counts_lines_and_chars() {
        let text = "[1,\n  \u{e9}x]";
        let offset = text.find('x').unwrap();
        let err = ParserError::new(SyntaxError::UnexpectedChar('x'), text, offset);
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 4);
        assert_eq!(err.offset(), offset);
        assert_eq!(err.to_string(), "unexpected character 'x' at 2:4");
    }

    #[test]
    fn context_stays_on_the_offending_line() {
        let text = "[1,\n  oops,\n 3]";
        let offset = text.find('o').unwrap();
        let err = ParserError::new(SyntaxError::UnexpectedChar('o'), text, offset);
        let ctx = err.context(text, 40);
        assert_eq!(ctx.snippet, "  oops,");
        assert_eq!(ctx.caret, 2);
        assert_eq!(ctx.to_string(), "  oops,\n  ^");
    }

    #[test]
    fn context_at_end_of_input() {
        let text = "\"abc";
        let err = ParserError::new(SyntaxError::UnexpectedEnd, text, text.len());
        let ctx = err.context(text, 2);
        assert_eq!(ctx.snippet, "bc");
        assert_eq!(ctx.caret, 2);
    }
}
