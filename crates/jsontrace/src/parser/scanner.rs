//! Cursor primitives over the input text.
//!
//! Every function takes a byte offset and returns the next offset; the scanner
//! itself holds no position. Offsets handed out are always on char boundaries.
use bstr::ByteSlice;

use super::error::{ParserError, SyntaxError};
use crate::{trace::SpanKind, value::Value};

const LEADING_NUMBER_CHARS: &[u8] = b"-0123456789";
const NUMBER_CHARS: &[u8] = b"0123456789.-+eE";

/// `null`, `true` or `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

impl Literal {
    const ALL: [Literal; 3] = [Literal::Null, Literal::True, Literal::False];

    pub(crate) fn text(self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::True => "true",
            Literal::False => "false",
        }
    }

    pub(crate) fn kind(self) -> SpanKind {
        match self {
            Literal::Null => SpanKind::Null,
            Literal::True => SpanKind::True,
            Literal::False => SpanKind::False,
        }
    }

    pub(crate) fn value(self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::True => Value::Boolean(true),
            Literal::False => Value::Boolean(false),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Scanner<'src> {
    text: &'src str,
    unicode_whitespace: bool,
}

impl<'src> Scanner<'src> {
    pub(crate) fn new(text: &'src str, unicode_whitespace: bool) -> Self {
        Self {
            text,
            unicode_whitespace,
        }
    }

    pub(crate) fn text(&self) -> &'src str {
        self.text
    }

    pub(crate) fn peek(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    /// Like [`Scanner::peek`], but running off the end is an error.
    pub(crate) fn expect_char(&self, pos: usize) -> Result<char, ParserError> {
        self.peek(pos).ok_or_else(|| self.end_of_input())
    }

    pub(crate) fn error(&self, source: SyntaxError, pos: usize) -> ParserError {
        ParserError::new(source, self.text, pos)
    }

    pub(crate) fn end_of_input(&self) -> ParserError {
        self.error(SyntaxError::UnexpectedEnd, self.text.len())
    }

    fn is_whitespace(&self, c: char) -> bool {
        if self.unicode_whitespace {
            is_unicode_whitespace(c)
        } else {
            is_ascii_whitespace(c)
        }
    }

    /// Advances past whitespace. Fails if the input ends before a
    /// non-whitespace character.
    pub(crate) fn skip_whitespace(&self, pos: usize) -> Result<usize, ParserError> {
        self.skip_while(pos, |c| self.is_whitespace(c))
    }

    /// Advances past any mix of whitespace and `,`. Element separators are
    /// optional and may repeat.
    pub(crate) fn skip_separator_or_whitespace(&self, pos: usize) -> Result<usize, ParserError> {
        self.skip_while(pos, |c| c == ',' || self.is_whitespace(c))
    }

    fn skip_while(&self, mut pos: usize, skip: impl Fn(char) -> bool) -> Result<usize, ParserError> {
        loop {
            match self.peek(pos) {
                Some(c) if skip(c) => pos += c.len_utf8(),
                Some(_) => return Ok(pos),
                None => return Err(self.end_of_input()),
            }
        }
    }

    /// The literal starting exactly at `pos`, if any.
    pub(crate) fn literal_at(&self, pos: usize) -> Option<Literal> {
        let rest = self.text.get(pos..)?;
        Literal::ALL.into_iter().find(|lit| rest.starts_with(lit.text()))
    }

    /// Offset of the `"` closing a string whose opening quote is at `pos`.
    /// The first quote found terminates the string; backslashes are not
    /// special.
    pub(crate) fn string_end(&self, pos: usize) -> Result<usize, ParserError> {
        let body = pos + 1;
        self.text.as_bytes()[body..]
            .find_byte(b'"')
            .map(|i| body + i)
            .ok_or_else(|| self.end_of_input())
    }

    /// End of the longest run of number characters starting at `pos`. The run
    /// is not checked for well-formedness.
    pub(crate) fn number_end(&self, pos: usize) -> usize {
        let rest = &self.text.as_bytes()[pos..];
        pos + rest
            .iter()
            .position(|b| !NUMBER_CHARS.contains(b))
            .unwrap_or(rest.len())
    }
}

/// C `isspace` in the "C" locale.
fn is_ascii_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Unicode space, line and paragraph separators except the no-break ones
/// (U+00A0, U+2007, U+202F), plus the ASCII whitespace controls and the
/// information separators U+001C to U+001F.
///
/// This differs from [`char::is_whitespace`], which accepts the no-break
/// spaces and U+0085 but not the information separators.
fn is_unicode_whitespace(c: char) -> bool {
    is_ascii_whitespace(c)
        || matches!(
            c,
            '\x1C'..='\x1F'
                | '\u{1680}'
                | '\u{2000}'..='\u{2006}'
                | '\u{2008}'..='\u{200A}'
                | '\u{2028}'
                | '\u{2029}'
                | '\u{205F}'
                | '\u{3000}'
        )
}

pub(crate) fn is_number_start(c: char) -> bool {
    c.is_ascii() && LEADING_NUMBER_CHARS.contains(&(c as u8))
}

/// Largest char boundary of `text` that is `<= index`.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    (0..=index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0)
}

/// Smallest char boundary of `text` that is `>= index`.
pub(crate) fn ceil_char_boundary(text: &str, index: usize) -> usize {
    (index..text.len())
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn scanner(text: &str) -> Scanner<'_> {
        Scanner::new(text, true)
    }

    #[rstest]
    #[case("  x", 0, 2)]
    #[case("x", 0, 0)]
    #[case("\t\r\n\x0B\x0Cx", 0, 5)]
    #[case("a  b", 1, 3)]
    fn skips_whitespace(#[case] text: &str, #[case] pos: usize, #[case] expected: usize) {
        assert_eq!(scanner(text).skip_whitespace(pos), Ok(expected));
    }

    #[rstest]
    #[case("   ")]
    #[case("")]
    fn whitespace_to_end_is_unexpected_end(#[case] text: &str) {
        let err = scanner(text).skip_whitespace(0).unwrap_err();
        assert_eq!(err.kind(), &SyntaxError::UnexpectedEnd);
        assert_eq!(err.offset(), text.len());
    }

    #[test]
    fn separators_and_whitespace_are_interchangeable() {
        assert_eq!(scanner(", ,,\n]").skip_separator_or_whitespace(0), Ok(5));
        assert_eq!(scanner("]").skip_separator_or_whitespace(0), Ok(0));
        assert!(scanner(",,").skip_separator_or_whitespace(0).is_err());
        // A comma is not whitespace.
        assert_eq!(scanner(",").skip_whitespace(0), Ok(0));
    }

    #[rstest]
    #[case(' ', true, true)]
    #[case('\x0B', true, true)]
    #[case('\r', true, true)]
    #[case('\x1C', true, false)]
    #[case('\x1F', true, false)]
    #[case('\u{1680}', true, false)]
    #[case('\u{2003}', true, false)]
    #[case('\u{200A}', true, false)]
    #[case('\u{2028}', true, false)]
    #[case('\u{2029}', true, false)]
    #[case('\u{205F}', true, false)]
    #[case('\u{3000}', true, false)]
    #[case('\u{A0}', false, false)]
    #[case('\u{2007}', false, false)]
    #[case('\u{202F}', false, false)]
    #[case('\u{85}', false, false)]
    #[case('\u{200B}', false, false)]
    #[case(',', false, false)]
    fn whitespace_sets(#[case] c: char, #[case] unicode: bool, #[case] ascii: bool) {
        assert_eq!(Scanner::new("", true).is_whitespace(c), unicode);
        assert_eq!(Scanner::new("", false).is_whitespace(c), ascii);
    }

    #[test]
    fn ascii_mode_stops_at_unicode_separators() {
        let text = "\u{3000}1";
        assert_eq!(Scanner::new(text, true).skip_whitespace(0), Ok(3));
        assert_eq!(Scanner::new(text, false).skip_whitespace(0), Ok(0));
    }

    #[rstest]
    #[case('-', true)]
    #[case('0', true)]
    #[case('9', true)]
    #[case('+', false)]
    #[case('.', false)]
    #[case('e', false)]
    #[case('\u{661}', false)]
    fn leading_number_chars(#[case] c: char, #[case] expected: bool) {
        assert_eq!(is_number_start(c), expected);
    }

    #[rstest]
    #[case("null", Some(Literal::Null))]
    #[case("true,", Some(Literal::True))]
    #[case("false]", Some(Literal::False))]
    #[case("nul", None)]
    #[case("True", None)]
    #[case("fals", None)]
    fn literals_match_exactly(#[case] text: &str, #[case] expected: Option<Literal>) {
        assert_eq!(scanner(text).literal_at(0), expected);
    }

    #[test]
    fn string_ends_at_first_quote() {
        assert_eq!(scanner(r#""abc" "#).string_end(0), Ok(4));
        assert_eq!(scanner(r#""a\"b""#).string_end(0), Ok(3));
        assert!(scanner("\"abc").string_end(0).is_err());
    }

    #[test]
    fn number_run_is_greedy() {
        assert_eq!(scanner("1e-5,").number_end(0), 4);
        assert_eq!(scanner("--e+.5").number_end(0), 6);
        assert_eq!(scanner("12x").number_end(0), 2);
        assert_eq!(scanner("x").number_end(0), 0);
    }

    #[test]
    fn char_boundaries() {
        let text = "a\u{e9}b";
        assert_eq!(floor_char_boundary(text, 2), 1);
        assert_eq!(ceil_char_boundary(text, 2), 3);
        assert_eq!(floor_char_boundary(text, 99), text.len());
        assert_eq!(ceil_char_boundary(text, 99), text.len());
    }
}
