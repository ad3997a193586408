//! Error types for INI parsing, writing, and value expansion.
//!
//! All parse errors carry 1-based line and column numbers pointing at the
//! character where tokenization failed. Expansion errors are recoverable by
//! the caller and never leave a partially substituted value behind.
//!
//! ## Examples
//!
//! ```rust
//! use initext::{Error, IniDocument};
//!
//! let result = IniDocument::from_str("[unterminated\nkey = value\n");
//! match result {
//!     Err(Error::UnterminatedSection { line, .. }) => assert_eq!(line, 1),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Represents all errors this crate can produce.
///
/// Parse variants are fatal to the current parse; the reader does not
/// recover mid-stream. Expansion variants are reported to the caller and
/// leave the config tree unchanged.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while reading or writing a stream
    #[error("IO error: {0}")]
    Io(String),

    /// A `[section` header reached end of line before its closing `]`
    #[error("Expected section end (]) - Line: {line}, Position: {column}")]
    UnterminatedSection { line: usize, column: usize },

    /// A key line ended without an assignment operator under a dialect
    /// that requires one
    #[error("Expected assignment operator ({expected}) - Line: {line}, Position: {column}")]
    MissingAssignment {
        line: usize,
        column: usize,
        expected: char,
    },

    /// A quoted value reached end of line before its closing quote
    #[error("Expected closing quote (\") - Line: {line}, Position: {column}")]
    UnterminatedQuote { line: usize, column: usize },

    /// A key line appeared before any section header during a document load
    #[error("Key without a preceding section header - Line: {line}, Position: {column}")]
    OrphanKey { line: usize, column: usize },

    /// Writer state-machine misuse, e.g. writing a key before any section
    #[error("Invalid write sequence: {0}")]
    InvalidSequence(&'static str),

    /// A delimiter set was configured with zero characters
    #[error("Must supply at least one delimiter")]
    EmptyDelimiters,

    /// A key lookup failed during expansion or a typed access
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    /// A `${section|key}` reference named a config that does not exist
    #[error("Config not found: {name}")]
    ConfigNotFound { name: String },

    /// A key expanded to a reference of itself
    #[error("Key cannot expand to a value of itself: {key}")]
    SelfReferenceCycle { key: String },

    /// A typed accessor could not parse the stored value
    #[error("Invalid value for key {key}: {value:?} is not a valid {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl Error {
    pub(crate) fn unterminated_section(line: usize, column: usize) -> Self {
        Error::UnterminatedSection { line, column }
    }

    pub(crate) fn missing_assignment(line: usize, column: usize, expected: char) -> Self {
        Error::MissingAssignment {
            line,
            column,
            expected,
        }
    }

    pub(crate) fn unterminated_quote(line: usize, column: usize) -> Self {
        Error::UnterminatedQuote { line, column }
    }

    pub(crate) fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn config_not_found(name: &str) -> Self {
        Error::ConfigNotFound {
            name: name.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
