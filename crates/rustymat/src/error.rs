//! Error type shared by the reading and writing API.

use std::fmt;

use rustymat_format::error::FormatError;

/// Errors surfaced by [`crate::MatFile`] and [`crate::MatFileBuilder`].
#[derive(Debug)]
pub enum Error {
    /// Filesystem error while opening, reading, or writing.
    Io(std::io::Error),
    /// The byte stream violates the MAT-file format.
    Format(FormatError),
    /// A numeric read was attempted on a struct, cell, char, or sparse
    /// array; carries the variable name.
    NotNumeric(String),
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Error::Format(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Format(e) => write!(f, "MAT-file format error: {e}"),
            Error::NotNumeric(name) => {
                write!(f, "variable '{name}' is not a numeric array")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Format(e) => Some(e),
            Error::NotNumeric(_) => None,
        }
    }
}
