/// Default for [`ParserOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the parser.
///
/// # Examples
///
/// ```rust
/// use jsontrace::{Parser, ParserOptions, SyntaxError};
///
/// let options = ParserOptions {
///     max_depth: 2,
///     ..Default::default()
/// };
/// let err = Parser::new("[[[]]]", options).parse().unwrap_err();
/// assert_eq!(err.kind(), &SyntaxError::RecursionLimit(2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Maximum number of arrays and objects that may be open at once.
    ///
    /// Recursion depth follows input nesting, so this bounds stack usage on
    /// untrusted input. Exceeding it fails with
    /// [`SyntaxError::RecursionLimit`](crate::SyntaxError::RecursionLimit).
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,

    /// Whether Unicode separators count as whitespace between JSON values.
    ///
    /// When `true`, whitespace is the Unicode space, line and paragraph
    /// separators other than the no-break spaces (U+00A0, U+2007, U+202F),
    /// together with tab, line feed, vertical tab, form feed, carriage return
    /// and the information separators U+001C to U+001F. When `false`, only
    /// the characters C's `isspace` accepts are skipped: space, tab, line
    /// feed, vertical tab, form feed and carriage return.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_unicode_whitespace: bool,

    /// Whether the character following an object key must be `:`.
    ///
    /// When `false`, whatever single character follows the key (after
    /// whitespace) is consumed as the separator without being looked at, so
    /// `{"a" 12}` decodes as `{"a": 2}`.
    ///
    /// # Default
    ///
    /// `false`
    pub strict_key_separator: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_unicode_whitespace: true,
            strict_key_separator: false,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}
