//! Error types for brickstore_xml

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Line/column position inside an XML document, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPosition {
    pub row: u32,
    pub col: u32,
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Malformed locator expression. Always a programming defect, never dirty data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("locator is empty")]
    Empty,
    #[error("locator '{0}' contains an empty step")]
    EmptyStep(String),
    #[error("locator '{locator}' has an invalid step '{step}'")]
    InvalidStep { locator: String, step: String },
}

/// Unified error type for reading and writing inventories
#[derive(Debug, Error)]
pub enum Error {
    /// The stream cannot be read, or cannot be written and repositioned
    #[error("Stream error: {0}")]
    Stream(#[source] std::io::Error),
    /// Path-based read of a file that does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Input is not a well-formed XML document
    #[error("Parse error{}: {message}", display_position(.position))]
    Parse {
        message: String,
        position: Option<TextPosition>,
    },
    /// Malformed locator expression passed to a field accessor
    #[error("Invalid locator: {0}")]
    InvalidLocator(#[from] LocatorError),
    /// Configured doctype is not a valid XML element name
    #[error("Invalid doctype '{0}': not an XML element name")]
    InvalidDoctype(String),
    /// XML event writer failure
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_position(position: &Option<TextPosition>) -> String {
    match position {
        Some(pos) => format!(" at {pos}"),
        None => String::new(),
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        let pos = err.pos();
        Error::Parse {
            message: err.to_string(),
            position: Some(TextPosition {
                row: pos.row,
                col: pos.col,
            }),
        }
    }
}

/// Result alias for brickstore_xml operations
pub type Result<T> = std::result::Result<T, Error>;
