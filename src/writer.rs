//! INI serialization.
//!
//! This module provides the [`IniWriter`], the mirror of the reader: given
//! typed items it emits well-formed lines, honoring indentation, optional
//! value quoting, and the configured delimiter characters.
//!
//! The writer is a monotonic state machine: blank and comment lines may be
//! written at any time, but keys are only legal once a section header has
//! been written, and nothing may follow [`IniWriter::close`]. Violations
//! are [`Error::InvalidSequence`].
//!
//! ## Usage
//!
//! ```rust
//! use initext::IniWriter;
//!
//! let mut writer = IniWriter::new();
//! writer.write_empty(Some("generated file")).unwrap();
//! writer.write_section("server", None).unwrap();
//! writer.write_key("port", "8080", None).unwrap();
//!
//! let text = writer.into_inner();
//! assert_eq!(text, "; generated file\r\n[server]\r\nport = 8080\r\n");
//! ```

use crate::{Error, Result};
use std::io;

/// The lifecycle state of an [`IniWriter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteState {
    /// Nothing has been written yet.
    Start,
    /// Blank or comment lines have been written, but no section yet.
    BeforeFirstSection,
    /// Inside a section; keys are legal.
    Section,
    /// The writer was closed. Terminal.
    Closed,
}

/// Serializes INI items into an owned `String`.
///
/// Formatting is controlled by the builder-style setters; the defaults
/// match the standard dialect (`=` assignment, `;` comments, CRLF line
/// endings, no indentation, no value quoting).
pub struct IniWriter {
    output: String,
    state: WriteState,
    indentation: String,
    assign_delimiter: char,
    comment_delimiter: char,
    use_value_quotes: bool,
    line_terminator: &'static str,
}

impl Default for IniWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl IniWriter {
    /// Creates a writer with standard-dialect formatting.
    #[must_use]
    pub fn new() -> Self {
        IniWriter {
            output: String::with_capacity(256),
            state: WriteState::Start,
            indentation: String::new(),
            assign_delimiter: '=',
            comment_delimiter: ';',
            use_value_quotes: false,
            line_terminator: "\r\n",
        }
    }

    /// Sets the number of leading spaces applied to every emitted line.
    #[must_use]
    pub fn with_indentation(mut self, spaces: usize) -> Self {
        self.indentation = " ".repeat(spaces);
        self
    }

    /// Sets the assignment character emitted between key and value.
    #[must_use]
    pub fn with_assign_delimiter(mut self, delimiter: char) -> Self {
        self.assign_delimiter = delimiter;
        self
    }

    /// Sets the comment character emitted before comment text.
    #[must_use]
    pub fn with_comment_delimiter(mut self, delimiter: char) -> Self {
        self.comment_delimiter = delimiter;
        self
    }

    /// When enabled, every value is wrapped in double quotes.
    #[must_use]
    pub fn with_value_quotes(mut self, enabled: bool) -> Self {
        self.use_value_quotes = enabled;
        self
    }

    /// Sets the line terminator. CRLF by default.
    #[must_use]
    pub fn with_line_terminator(mut self, terminator: &'static str) -> Self {
        self.line_terminator = terminator;
        self
    }

    /// The writer's lifecycle state.
    #[must_use]
    pub fn state(&self) -> WriteState {
        self.state
    }

    /// Emits a `[name]` section header, optionally with a comment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSequence`] if the writer is closed.
    pub fn write_section(&mut self, name: &str, comment: Option<&str>) -> Result<()> {
        self.validate_open()?;
        self.state = WriteState::Section;
        let line = format!("[{}]{}", name, self.format_comment(comment));
        self.write_line(&line);
        Ok(())
    }

    /// Emits a `key = value` line, optionally with a trailing comment.
    ///
    /// Embedded newlines in the value are stripped so a value cannot
    /// inject extra lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSequence`] if no section has been written
    /// yet, or if the writer is closed.
    pub fn write_key(&mut self, key: &str, value: &str, comment: Option<&str>) -> Result<()> {
        self.validate_open()?;
        if self.state != WriteState::Section {
            return Err(Error::InvalidSequence(
                "a key may only be written inside a section",
            ));
        }

        let line = format!(
            "{} {} {}{}",
            key,
            self.assign_delimiter,
            self.format_value(value),
            self.format_comment(comment)
        );
        self.write_line(&line);
        Ok(())
    }

    /// Emits a blank line, or a comment line when `comment` is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSequence`] if the writer is closed.
    pub fn write_empty(&mut self, comment: Option<&str>) -> Result<()> {
        self.validate_open()?;
        if self.state == WriteState::Start {
            self.state = WriteState::BeforeFirstSection;
        }
        match comment {
            Some(text) => {
                let line = format!("{} {}", self.comment_delimiter, text);
                self.write_line(&line);
            }
            None => self.write_line(""),
        }
        Ok(())
    }

    /// Closes the writer. Further writes are rejected.
    pub fn close(&mut self) {
        self.state = WriteState::Closed;
    }

    /// Consumes the writer and returns the accumulated text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    /// The accumulated text so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Copies the accumulated text into an `io::Write` sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink fails.
    pub fn to_writer<W: io::Write>(&self, mut sink: W) -> Result<()> {
        sink.write_all(self.output.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    fn validate_open(&self) -> Result<()> {
        if self.state == WriteState::Closed {
            return Err(Error::InvalidSequence("the writer is closed"));
        }
        Ok(())
    }

    fn format_value(&self, value: &str) -> String {
        let sanitized = massage_value(value);
        if self.use_value_quotes {
            format!("\"{}\"", sanitized)
        } else {
            sanitized
        }
    }

    fn format_comment(&self, comment: Option<&str>) -> String {
        match comment {
            Some(text) => format!(" {} {}", self.comment_delimiter, text),
            None => String::new(),
        }
    }

    fn write_line(&mut self, line: &str) {
        self.output.push_str(&self.indentation);
        self.output.push_str(line);
        self.output.push_str(self.line_terminator);
    }
}

/// Strips embedded newlines so a value cannot break the line structure.
fn massage_value(value: &str) -> String {
    value.replace('\n', "")
}
