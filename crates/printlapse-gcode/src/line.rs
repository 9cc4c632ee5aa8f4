//! Line tokenizer
//!
//! Splits a raw G-code line into command code, argument string and trailing
//! comment. Comments start at the first `;`. The command text before it is
//! trimmed and split on the first run of whitespace.

/// A tokenized G-code line
///
/// Borrowed views into the input line. A blank or comment-only line has no
/// code; the comment (when present) is still surfaced so comment side
/// effects can be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizedLine<'a> {
    /// Command code, e.g. `"G1"`; `None` for blank or comment-only lines
    pub code: Option<&'a str>,
    /// Raw argument text after the code, empty when absent
    pub args: &'a str,
    /// Text after the first `;`, if any
    pub comment: Option<&'a str>,
}

/// Tokenize one raw line
pub fn tokenize(line: &str) -> TokenizedLine<'_> {
    let (command, comment) = match line.split_once(';') {
        Some((before, after)) => (before, Some(after)),
        None => (line, None),
    };

    let command = command.trim();
    let (code, args) = match command.split_once(char::is_whitespace) {
        Some((code, rest)) => (Some(code), rest.trim_start()),
        None if command.is_empty() => (None, ""),
        None => (Some(command), ""),
    };

    TokenizedLine {
        code,
        args,
        comment,
    }
}
