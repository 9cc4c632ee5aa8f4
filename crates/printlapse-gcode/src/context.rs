//! Per-parse context
//!
//! Carries the line counter, current line text and captured comment that
//! every component needs for diagnostics. One context lives for the duration
//! of one import; the comment is valid for the current line only.

use printlapse_core::error::ParseError;

/// Explicit per-parse state shared by the pipeline components
#[derive(Debug, Default)]
pub struct ParseContext {
    line_number: u32,
    line: String,
    comment: Option<String>,
}

impl ParseContext {
    /// Create a fresh context with the line counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next input line
    ///
    /// Increments the 1-based counter, stores the line text and clears any
    /// comment captured from the previous line.
    pub fn begin_line(&mut self, line: &str) {
        self.line_number += 1;
        self.line.clear();
        self.line.push_str(line);
        self.comment = None;
    }

    /// 1-based number of the current line
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Text of the current line, trailing whitespace stripped
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Capture the comment portion of the current line
    pub fn set_comment(&mut self, comment: Option<&str>) {
        self.comment = comment.map(str::to_string);
    }

    /// Comment captured on the current line, if any
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Log a recoverable condition with line provenance
    ///
    /// Warnings are never escalated; parsing continues.
    pub fn warn(&self, msg: impl AsRef<str>) {
        tracing::warn!(
            line = self.line_number,
            text = %self.line,
            "{}",
            msg.as_ref()
        );
    }

    /// Build a fatal parse error for the current line
    ///
    /// Fatal errors abort the parse; no partial model is returned.
    pub fn fail(&self, reason: impl Into<String>) -> ParseError {
        let reason = reason.into();
        tracing::error!(
            line = self.line_number,
            text = %self.line,
            "{}",
            reason
        );
        ParseError::Fatal {
            line_number: self.line_number,
            line: self.line.clone(),
            reason,
        }
    }
}
