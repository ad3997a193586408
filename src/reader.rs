//! INI tokenization.
//!
//! This module provides the [`IniReader`] pull tokenizer. Each call to
//! [`IniReader::read`] advances past exactly one logical item — a section
//! header, a key/value pair, or a blank/comment line — and leaves that
//! item's name, value, and comment available through accessors until the
//! next call.
//!
//! ## Overview
//!
//! - **Single-pass lexing**: one character of lookahead, no backtracking
//! - **Dialect-aware**: comment and assignment delimiter sets, quoting,
//!   line continuation, and bare keys are all controlled by a [`Dialect`]
//! - **Positioned errors**: malformed input reports 1-based line and column
//!
//! ## Usage
//!
//! ```rust
//! use initext::{IniReader, ItemKind};
//!
//! let mut reader = IniReader::new("[server]\nport = 8080\n");
//!
//! reader.read().unwrap();
//! assert_eq!(reader.kind(), ItemKind::Section);
//! assert_eq!(reader.name(), "server");
//!
//! reader.read().unwrap();
//! assert_eq!(reader.kind(), ItemKind::Key);
//! assert_eq!(reader.name(), "port");
//! assert_eq!(reader.value(), "8080");
//! ```

use crate::{Dialect, Error, Result};

/// The lifecycle state of an [`IniReader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadState {
    /// No read has been performed yet.
    Initial,
    /// At least one item has been read and more may follow.
    Interactive,
    /// The end of the input was reached. Terminal.
    EndOfFile,
    /// The reader was closed explicitly. Terminal.
    Closed,
    /// A parse error occurred. Terminal.
    Error,
}

/// The kind of item the reader last produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// A `[name]` section header.
    Section,
    /// A key/value pair.
    Key,
    /// A blank line or a whole-line comment.
    Empty,
}

/// A pull tokenizer for INI-style text.
///
/// The reader borrows its input and tracks a cursor with line/column
/// positions for diagnostics. Item buffers are reset at the start of every
/// [`read`](IniReader::read), so no state leaks between items.
pub struct IniReader<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    dialect: Dialect,
    ignore_comments: bool,
    state: ReadState,
    kind: ItemKind,
    name: String,
    value: String,
    comment: String,
    has_comment: bool,
}

impl<'a> IniReader<'a> {
    /// Creates a reader over `input` using the standard dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, Dialect::standard())
    }

    /// Creates a reader over `input` using the given dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: Dialect) -> Self {
        IniReader {
            input,
            position: 0,
            line: 1,
            column: 1,
            dialect,
            ignore_comments: false,
            state: ReadState::Initial,
            kind: ItemKind::Empty,
            name: String::new(),
            value: String::new(),
            comment: String::new(),
            has_comment: false,
        }
    }

    /// Advances past the next logical item.
    ///
    /// Returns `Ok(true)` when an item was produced, `Ok(false)` once the
    /// end of the input is reached or the reader is closed.
    ///
    /// # Errors
    ///
    /// Returns a positioned error on malformed input; the reader then
    /// stays in [`ReadState::Error`] and produces no further items.
    pub fn read(&mut self) -> Result<bool> {
        match self.state {
            ReadState::EndOfFile | ReadState::Closed | ReadState::Error => Ok(false),
            ReadState::Initial | ReadState::Interactive => {
                self.state = ReadState::Interactive;
                match self.read_next() {
                    Ok(more) => Ok(more),
                    Err(err) => {
                        self.state = ReadState::Error;
                        Err(err)
                    }
                }
            }
        }
    }

    /// Reads until a section header is produced.
    ///
    /// Returns `Ok(false)` if the input ends first.
    pub fn move_to_next_section(&mut self) -> Result<bool> {
        loop {
            let more = self.read()?;
            if self.kind == ItemKind::Section || !more {
                return Ok(more);
            }
        }
    }

    /// Reads until a key is produced.
    ///
    /// Stops with `Ok(false)` when a section header is encountered instead,
    /// or when the input ends.
    pub fn move_to_next_key(&mut self) -> Result<bool> {
        loop {
            let more = self.read()?;
            if self.kind == ItemKind::Section {
                return Ok(false);
            }
            if self.kind == ItemKind::Key || !more {
                return Ok(more);
            }
        }
    }

    /// Closes the reader. Subsequent reads return `Ok(false)`.
    pub fn close(&mut self) {
        self.reset();
        self.state = ReadState::Closed;
    }

    /// The kind of the current item.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The name of the current item (section or key name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of the current item (empty unless the item is a key).
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The comment attached to the current item, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.has_comment.then_some(self.comment.as_str())
    }

    /// The reader's lifecycle state.
    #[must_use]
    pub fn state(&self) -> ReadState {
        self.state
    }

    /// The current 1-based line number.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// The current 1-based column.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// The active dialect.
    #[must_use]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// When set, comments are discarded instead of captured.
    pub fn set_ignore_comments(&mut self, ignore: bool) {
        self.ignore_comments = ignore;
    }

    /// Clears the buffers of the previous item.
    fn reset(&mut self) {
        self.name.clear();
        self.value.clear();
        self.comment.clear();
        self.kind = ItemKind::Empty;
        self.has_comment = false;
    }

    fn read_next(&mut self) -> Result<bool> {
        loop {
            let ch = self.peek_char();
            self.reset();

            if let Some(c) = ch {
                if self.dialect.is_comment(c) {
                    self.kind = ItemKind::Empty;
                    self.next_char(); // consume the comment delimiter
                    self.read_comment();
                    return Ok(true);
                }
            }

            match ch {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.skip_whitespace();
                }
                Some('\n') => {
                    self.next_char();
                    return Ok(true);
                }
                Some('[') => {
                    self.read_section()?;
                    return Ok(true);
                }
                None => {
                    self.state = ReadState::EndOfFile;
                    return Ok(false);
                }
                Some(_) => {
                    self.read_key()?;
                    return Ok(true);
                }
            }
        }
    }

    /// Captures a comment. The delimiter must already be consumed.
    fn read_comment(&mut self) {
        self.skip_whitespace();
        self.has_comment = true;

        while let Some(c) = self.next_char() {
            if c == '\n' {
                break;
            }
            self.comment.push(c);
        }

        trim_trailing_whitespace(&mut self.comment);
    }

    fn read_section(&mut self) -> Result<()> {
        self.kind = ItemKind::Section;
        self.next_char(); // consume '['

        loop {
            match self.peek_char() {
                Some(']') => break,
                Some('\n') | None => {
                    return Err(Error::unterminated_section(self.line, self.column));
                }
                Some(c) => {
                    self.name.push(c);
                    self.next_char();
                }
            }
        }

        self.consume_to_end(); // all after ']' is garbage
        trim_trailing_whitespace(&mut self.name);
        Ok(())
    }

    fn read_key(&mut self) -> Result<()> {
        self.kind = ItemKind::Key;

        loop {
            match self.peek_char() {
                Some(c) if self.dialect.is_assign(c) => {
                    self.next_char();
                    break;
                }
                Some('\n') | None => {
                    if self.dialect.allow_missing_assign() {
                        break;
                    }
                    return Err(Error::missing_assignment(
                        self.line,
                        self.column,
                        self.dialect.primary_assign(),
                    ));
                }
                Some(c) => {
                    self.name.push(c);
                    self.next_char();
                }
            }
        }

        self.read_key_value()?;
        self.search_for_comment();
        trim_trailing_whitespace(&mut self.name);
        Ok(())
    }

    fn read_key_value(&mut self) -> Result<()> {
        let mut found_quote = false;
        let mut characters = 0usize;
        self.skip_whitespace();

        loop {
            let ch = self.peek_char();

            if !matches!(ch, Some(' ') | Some('\t') | Some('\r') | Some('\n')) {
                characters += 1;
            }

            if !self.dialect.consume_all_key_text() && ch == Some('"') {
                self.next_char();
                if !found_quote && characters == 1 {
                    found_quote = true;
                    continue;
                }
                break;
            }

            if found_quote && end_of_line(ch) {
                return Err(Error::unterminated_quote(self.line, self.column));
            }

            if self.dialect.line_continuation() && ch == Some('\\') {
                if self.take_line_continuation() {
                    continue;
                }
                // The backslash was not a continuation; the consumed text is
                // already in the value buffer and the character after it is
                // taken verbatim.
                if let Some(c) = self.peek_char() {
                    if c != '\n' {
                        self.value.push(c);
                        self.next_char();
                    }
                }
                continue;
            }

            if !self.dialect.consume_all_key_text()
                && self.dialect.comment_after_key()
                && !found_quote
                && matches!(ch, Some(c) if self.dialect.is_comment(c))
            {
                break;
            }

            if end_of_line(ch) {
                break;
            }

            if let Some(c) = ch {
                self.value.push(c);
                self.next_char();
            }
        }

        if !found_quote {
            trim_trailing_whitespace(&mut self.value);
        }
        Ok(())
    }

    /// Consumes a backslash and any same-line whitespace after it. Returns
    /// true if the line indeed ends there (a real continuation, the newline
    /// consumed too); otherwise the consumed text is appended to the value
    /// and false is returned.
    fn take_line_continuation(&mut self) -> bool {
        let mut buffer = String::from('\\');
        self.next_char(); // consume '\'

        while let Some(next) = self.peek_char() {
            if next == '\n' || !is_whitespace(next) {
                break;
            }
            if next == '\r' {
                self.next_char(); // CR is swallowed, not kept
            } else {
                buffer.push(next);
                self.next_char();
            }
        }

        if self.peek_char() == Some('\n') {
            self.next_char();
            return true;
        }

        self.value.push_str(&buffer);
        false
    }

    /// Scans the remainder of the line for a trailing comment.
    fn search_for_comment(&mut self) {
        let mut ch = self.next_char();

        while !end_of_line(ch) {
            if let Some(c) = ch {
                if self.dialect.is_comment(c) {
                    if self.ignore_comments {
                        self.consume_to_end();
                    } else {
                        self.read_comment();
                    }
                    break;
                }
            }
            ch = self.next_char();
        }
    }

    /// Discards everything up to and including the end of the line.
    fn consume_to_end(&mut self) {
        while let Some(c) = self.next_char() {
            if c == '\n' {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.position..].chars().next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Skips spaces, tabs, and carriage returns. Stops at a newline.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' || !is_whitespace(c) {
                break;
            }
            self.next_char();
        }
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

/// End of line is a newline or the end of the input.
fn end_of_line(ch: Option<char>) -> bool {
    matches!(ch, Some('\n') | None)
}

fn trim_trailing_whitespace(s: &mut String) {
    let trimmed = s.trim_end().len();
    s.truncate(trimmed);
}
