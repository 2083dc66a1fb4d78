use miette::Diagnostic;
use thiserror::Error;

use crate::parser::LexError;

/// Main error type for tgmlint operations.
///
/// Every parse variant is fatal for the file being read; there is no
/// partially parsed map.
#[derive(Error, Diagnostic, Debug)]
pub enum MapError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tgmlint::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tgmlint::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error(transparent)]
    #[diagnostic(code(tgmlint::lex))]
    Lex(#[from] LexError),

    #[error("line {line}: key \"{key}\" is already defined on line {first_line}")]
    #[diagnostic(
        code(tgmlint::parse::duplicate_key),
        help("Each key may only be declared once per map file")
    )]
    DuplicateKey {
        key: String,
        line: u32,
        first_line: u32,
    },

    #[error("line {line}: grid references undefined key \"{key}\"")]
    #[diagnostic(
        code(tgmlint::parse::dangling_key),
        help("Add a definition for the key or fix the grid row")
    )]
    DanglingKey { key: String, line: u32 },

    #[error("line {line}: {message}")]
    #[diagnostic(
        code(tgmlint::parse::ragged_grid),
        help("Every level must be a complete rectangle of the same size")
    )]
    RaggedGrid { line: u32, message: String },

    #[error("line {line}: {message}")]
    #[diagnostic(code(tgmlint::parse::malformed_entry))]
    MalformedEntry { line: u32, message: String },

    #[error("Config error: {message}")]
    #[diagnostic(code(tgmlint::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl MapError {
    /// The 1-based source line the error points at, if it has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            MapError::Lex(e) => Some(e.location.line),
            MapError::DuplicateKey { line, .. }
            | MapError::DanglingKey { line, .. }
            | MapError::RaggedGrid { line, .. }
            | MapError::MalformedEntry { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub(crate) fn malformed(line: u32, message: impl Into<String>) -> Self {
        MapError::MalformedEntry {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn ragged(line: u32, message: impl Into<String>) -> Self {
        MapError::RaggedGrid {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
