//! Dialect configuration for INI readers and writers.
//!
//! A [`Dialect`] bundles the delimiter sets and behavior toggles that make
//! one INI flavor differ from another: which characters open a comment,
//! which act as the assignment operator, whether values may continue across
//! lines, and so on. Five named presets cover the flavors found in the
//! wild.
//!
//! Dialects are plain immutable data. To switch dialects, construct a fresh
//! reader or writer with the new value; nothing is mutated at runtime.
//!
//! ## Examples
//!
//! ```rust
//! use initext::{Dialect, IniDocument};
//!
//! // MySQL-style option files use '#' comments and allow bare flags.
//! let doc = IniDocument::from_str_with_dialect(
//!     "[mysqld]\nskip-networking\nport = 3306\n",
//!     Dialect::mysql_style(),
//! ).unwrap();
//! assert_eq!(doc.section("mysqld").unwrap().get("skip-networking"), Some(""));
//! ```

use crate::{Error, Result};

/// Delimiter sets and toggles controlling tokenizer and writer behavior.
///
/// Construct one of the presets, or start from [`Dialect::standard`] and
/// adjust with the builder methods. Delimiter sets are never empty;
/// supplying an empty set is rejected eagerly with
/// [`Error::EmptyDelimiters`].
///
/// # Examples
///
/// ```rust
/// use initext::Dialect;
///
/// let dialect = Dialect::standard()
///     .with_comment_delimiters(vec![';', '#'])
///     .unwrap();
/// assert!(dialect.is_comment(';'));
/// assert!(dialect.is_comment('#'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialect {
    comment_delimiters: Vec<char>,
    assign_delimiters: Vec<char>,
    line_continuation: bool,
    comment_after_key: bool,
    allow_missing_assign: bool,
    consume_all_key_text: bool,
    writer_assign: char,
    writer_comment: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::standard()
    }
}

impl Dialect {
    /// The common flavor: `;` comments, `=` assignment, comments allowed
    /// after a key's value.
    #[must_use]
    pub fn standard() -> Self {
        Dialect {
            comment_delimiters: vec![';'],
            assign_delimiters: vec!['='],
            line_continuation: false,
            comment_after_key: true,
            allow_missing_assign: false,
            consume_all_key_text: false,
            writer_assign: '=',
            writer_comment: ';',
        }
    }

    /// Python configparser flavor: `;` or `#` comments, `:` assignment,
    /// no comments after a key.
    #[must_use]
    pub fn python_style() -> Self {
        Dialect {
            comment_delimiters: vec![';', '#'],
            assign_delimiters: vec![':'],
            comment_after_key: false,
            writer_assign: ':',
            writer_comment: '#',
            ..Self::standard()
        }
    }

    /// Samba smb.conf flavor: `;` or `#` comments, `=` assignment, values
    /// may continue across lines with a trailing backslash.
    #[must_use]
    pub fn samba_style() -> Self {
        Dialect {
            comment_delimiters: vec![';', '#'],
            line_continuation: true,
            comment_after_key: false,
            writer_comment: '#',
            ..Self::standard()
        }
    }

    /// MySQL option-file flavor: `#` comments, `:` or `=` assignment, and
    /// bare keys without any assignment operator are accepted.
    #[must_use]
    pub fn mysql_style() -> Self {
        Dialect {
            comment_delimiters: vec!['#'],
            assign_delimiters: vec![':', '='],
            comment_after_key: false,
            allow_missing_assign: true,
            writer_comment: '#',
            ..Self::standard()
        }
    }

    /// Windows flavor: like [`Dialect::standard`] except that key text is
    /// consumed verbatim to end of line, so quote and comment characters
    /// lose their special meaning inside values.
    #[must_use]
    pub fn windows_style() -> Self {
        Dialect {
            consume_all_key_text: true,
            ..Self::standard()
        }
    }

    /// Replaces the comment-delimiter set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDelimiters`] if `delimiters` is empty.
    pub fn with_comment_delimiters(mut self, delimiters: Vec<char>) -> Result<Self> {
        if delimiters.is_empty() {
            return Err(Error::EmptyDelimiters);
        }
        self.comment_delimiters = delimiters;
        Ok(self)
    }

    /// Replaces the assign-delimiter set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDelimiters`] if `delimiters` is empty.
    pub fn with_assign_delimiters(mut self, delimiters: Vec<char>) -> Result<Self> {
        if delimiters.is_empty() {
            return Err(Error::EmptyDelimiters);
        }
        self.assign_delimiters = delimiters;
        Ok(self)
    }

    /// Enables or disables backslash line continuation in values.
    #[must_use]
    pub fn with_line_continuation(mut self, enabled: bool) -> Self {
        self.line_continuation = enabled;
        self
    }

    /// Enables or disables comment capture after a key's value.
    #[must_use]
    pub fn with_comment_after_key(mut self, enabled: bool) -> Self {
        self.comment_after_key = enabled;
        self
    }

    /// Enables or disables acceptance of keys without an assignment
    /// operator.
    #[must_use]
    pub fn with_allow_missing_assign(mut self, enabled: bool) -> Self {
        self.allow_missing_assign = enabled;
        self
    }

    /// Enables or disables verbatim consumption of all key text.
    #[must_use]
    pub fn with_consume_all_key_text(mut self, enabled: bool) -> Self {
        self.consume_all_key_text = enabled;
        self
    }

    /// Returns true if `ch` starts a comment under this dialect.
    #[must_use]
    pub fn is_comment(&self, ch: char) -> bool {
        self.comment_delimiters.contains(&ch)
    }

    /// Returns true if `ch` is an assignment operator under this dialect.
    #[must_use]
    pub fn is_assign(&self, ch: char) -> bool {
        self.assign_delimiters.contains(&ch)
    }

    /// The comment-delimiter set.
    #[must_use]
    pub fn comment_delimiters(&self) -> &[char] {
        &self.comment_delimiters
    }

    /// The assign-delimiter set.
    #[must_use]
    pub fn assign_delimiters(&self) -> &[char] {
        &self.assign_delimiters
    }

    /// The first configured assignment operator, used in diagnostics.
    pub(crate) fn primary_assign(&self) -> char {
        self.assign_delimiters[0]
    }

    #[must_use]
    pub fn line_continuation(&self) -> bool {
        self.line_continuation
    }

    #[must_use]
    pub fn comment_after_key(&self) -> bool {
        self.comment_after_key
    }

    #[must_use]
    pub fn allow_missing_assign(&self) -> bool {
        self.allow_missing_assign
    }

    #[must_use]
    pub fn consume_all_key_text(&self) -> bool {
        self.consume_all_key_text
    }

    /// The assignment character the writer emits.
    #[must_use]
    pub fn writer_assign(&self) -> char {
        self.writer_assign
    }

    /// The comment character the writer emits.
    #[must_use]
    pub fn writer_comment(&self) -> char {
        self.writer_comment
    }
}
