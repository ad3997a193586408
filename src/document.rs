//! Document assembly and serialization.
//!
//! An [`IniDocument`] owns an ordered collection of sections plus the
//! comments that appear before the first section header. Loading drives an
//! [`IniReader`] to populate the model; saving drives an [`IniWriter`] to
//! re-emit it.
//!
//! ## Usage
//!
//! ```rust
//! use initext::IniDocument;
//!
//! let doc = IniDocument::from_str("; generated\n[server]\nport = 8080\n").unwrap();
//! assert_eq!(doc.section("server").unwrap().get("port"), Some("8080"));
//!
//! let out = doc.to_string();
//! assert!(out.contains("[server]"));
//! ```
//!
//! ## Duplicate handling
//!
//! Two tolerance rules apply while loading, both deliberate:
//!
//! - Re-declaring a section name replaces the earlier section entirely
//!   (last declaration wins).
//! - A duplicate key within one section is ignored (first occurrence wins).

use crate::{Dialect, Error, IniItem, IniReader, IniSection, IniWriter, ItemKind, Result};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// An ordered sequence of sections, with leading file comments.
#[derive(Clone, Debug, Default)]
pub struct IniDocument {
    leading: Vec<Option<String>>,
    sections: Vec<IniSection>,
    dialect: Dialect,
}

impl IniDocument {
    /// Creates an empty document using the standard dialect.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dialect(Dialect::standard())
    }

    /// Creates an empty document using the given dialect.
    #[must_use]
    pub fn with_dialect(dialect: Dialect) -> Self {
        IniDocument {
            leading: Vec::new(),
            sections: Vec::new(),
            dialect,
        }
    }

    /// Parses a document from a string using the standard dialect.
    ///
    /// # Errors
    ///
    /// Returns a positioned parse error on malformed input.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        Self::from_str_with_dialect(input, Dialect::standard())
    }

    /// Parses a document from a string using the given dialect.
    ///
    /// # Errors
    ///
    /// Returns a positioned parse error on malformed input.
    pub fn from_str_with_dialect(input: &str, dialect: Dialect) -> Result<Self> {
        let mut reader = IniReader::with_dialect(input, dialect);
        Self::from_ini_reader(&mut reader)
    }

    /// Parses a document from any `io::Read` source.
    ///
    /// The source is read to its end before parsing; the handle is
    /// released as soon as this returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails, or a positioned parse error
    /// on malformed input.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_dialect(reader, Dialect::standard())
    }

    /// Parses a document from any `io::Read` source using the given
    /// dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails, or a positioned parse error
    /// on malformed input.
    pub fn from_reader_with_dialect<R: io::Read>(mut reader: R, dialect: Dialect) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::from_str_with_dialect(&input, dialect)
    }

    /// Loads a document from a file path using the standard dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or a positioned
    /// parse error on malformed input.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_path_with_dialect(path, Dialect::standard())
    }

    /// Loads a document from a file path using the given dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or a positioned
    /// parse error on malformed input.
    pub fn load_path_with_dialect<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<Self> {
        let input = fs::read_to_string(path)?;
        Self::from_str_with_dialect(&input, dialect)
    }

    /// Populates a document by pulling every item from `reader`.
    ///
    /// The document adopts the reader's dialect for later saving.
    ///
    /// # Errors
    ///
    /// Returns the reader's positioned error on malformed input, or
    /// [`Error::OrphanKey`] for a key line before any section header.
    pub fn from_ini_reader(reader: &mut IniReader<'_>) -> Result<Self> {
        let mut doc = Self::with_dialect(reader.dialect().clone());

        loop {
            let (line, column) = (reader.line_number(), reader.column());
            if !reader.read()? {
                break;
            }

            match reader.kind() {
                ItemKind::Empty => match doc.sections.last_mut() {
                    Some(section) => section.push_empty(reader.comment()),
                    None => doc.leading.push(reader.comment().map(str::to_string)),
                },
                ItemKind::Section => {
                    doc.remove_section(reader.name());
                    doc.sections.push(IniSection::with_comment(
                        reader.name(),
                        reader.comment().map(str::to_string),
                    ));
                }
                ItemKind::Key => {
                    let section = doc
                        .sections
                        .last_mut()
                        .ok_or(Error::OrphanKey { line, column })?;
                    // First occurrence wins; later duplicates are ignored.
                    if !section.contains(reader.name()) {
                        section.set(reader.name(), reader.value(), reader.comment());
                    }
                }
            }
        }

        reader.close();
        Ok(doc)
    }

    /// The dialect used for saving.
    #[must_use]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Comments (and blank lines, as `None`) before the first section.
    #[must_use]
    pub fn leading_comments(&self) -> &[Option<String>] {
        &self.leading
    }

    /// Appends a comment line before the first section.
    pub fn push_leading_comment(&mut self, comment: &str) {
        self.leading.push(Some(comment.to_string()));
    }

    /// All sections in order.
    #[must_use]
    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }

    /// Looks up a section by name (case-sensitive).
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name() == name)
    }

    /// Looks up a section by name for mutation.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut IniSection> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    /// Adds a section. An existing section of the same name is replaced
    /// (removed, then the new one appended), keeping names unique.
    pub fn add_section(&mut self, section: IniSection) {
        self.remove_section(section.name());
        self.sections.push(section);
    }

    /// Removes a section by name. Returns true if one was removed.
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name() != name);
        self.sections.len() != before
    }

    /// Serializes the whole document through `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSequence`] only if `writer` was already
    /// closed or mid-section.
    pub fn write_to(&self, writer: &mut IniWriter) -> Result<()> {
        for comment in &self.leading {
            writer.write_empty(comment.as_deref())?;
        }

        for section in &self.sections {
            writer.write_section(section.name(), section.comment())?;
            for item in section.items() {
                match item {
                    IniItem::Key {
                        name,
                        value,
                        comment,
                    } => writer.write_key(name, value, comment.as_deref())?,
                    IniItem::Empty { comment } => writer.write_empty(comment.as_deref())?,
                }
            }
        }
        Ok(())
    }

    /// Serializes the document into a writer configured from its dialect.
    fn render(&self) -> String {
        let mut writer = IniWriter::new()
            .with_assign_delimiter(self.dialect.writer_assign())
            .with_comment_delimiter(self.dialect.writer_comment());
        // A fresh open writer accepts every item the model can hold.
        let _ = self.write_to(&mut writer);
        writer.into_inner()
    }

    /// Serializes the document into an `io::Write` sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink fails.
    pub fn to_writer<W: io::Write>(&self, mut sink: W) -> Result<()> {
        sink.write_all(self.render().as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    /// Saves the document to a file path (create or overwrite).
    ///
    /// The document is serialized fully in memory first, so a failure
    /// never leaves a half-written file behind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn save_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let rendered = self.render();
        fs::write(path, rendered)?;
        Ok(())
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
