//! Error types for MAT-file format parsing.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use core::fmt;

/// Errors that can occur when parsing or building MAT-file binary structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Unexpected end of data.
    UnexpectedEof {
        /// Number of bytes expected.
        expected: usize,
        /// Number of bytes actually available.
        available: usize,
    },
    /// The endian indicator bytes are neither `IM` nor `MI`.
    BadEndianIndicator([u8; 2]),
    /// The file was written on a big-endian platform.
    BigEndianUnsupported,
    /// The header version word is not the expected 0x0100.
    UnsupportedVersion(u16),
    /// A tag carries a data type code outside the defined mi range.
    UnknownDataType(u32),
    /// Array flags carry a class code outside the defined mx range.
    UnknownClass(u8),
    /// A required miMATRIX subelement is absent.
    MissingSubelement(&'static str),
    /// A subelement's tag type differs from what its position requires.
    SubelementType {
        /// The subelement being parsed.
        subelement: &'static str,
        /// The type code found in its tag.
        found: u32,
    },
    /// A payload length is not a whole number of elements of its type.
    PayloadSize {
        /// Element width in bytes.
        elem_size: usize,
        /// Payload length in bytes.
        actual: usize,
    },
    /// The element count implied by the dimensions does not match the data.
    DimensionMismatch {
        /// Element count from the dimensions subelement.
        expected: usize,
        /// Element count actually present.
        actual: usize,
    },
    /// A dimension is negative.
    NegativeDimension(i32),
    /// The element count implied by the dimensions overflows a 64-bit count.
    DimensionOverflow,
    /// A value of this type cannot be read as numeric data.
    NotNumeric(u32),
    /// A name exceeds the format's field-name limit.
    NameTooLong {
        /// Number of bytes in the offending name.
        len: usize,
        /// Maximum allowed, including the trailing NUL.
        max: usize,
    },
    /// The field name length subelement holds an unusable value.
    BadFieldNameLength(i32),
    /// Nested arrays exceed the parser's depth limit.
    NestingTooDeep(usize),
    /// zlib inflation or deflation failed.
    Compression(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnexpectedEof {
                expected,
                available,
            } => {
                write!(f, "unexpected EOF: need {expected} bytes, have {available}")
            }
            FormatError::BadEndianIndicator(b) => {
                write!(
                    f,
                    "bad endian indicator: [{:#04x}, {:#04x}], expected \"IM\"",
                    b[0], b[1]
                )
            }
            FormatError::BigEndianUnsupported => {
                write!(f, "big-endian MAT-files are not supported")
            }
            FormatError::UnsupportedVersion(v) => {
                write!(f, "unsupported MAT-file version: {v:#06x}")
            }
            FormatError::UnknownDataType(code) => {
                write!(f, "unknown data type code: {code}")
            }
            FormatError::UnknownClass(code) => {
                write!(f, "unknown array class code: {code}")
            }
            FormatError::MissingSubelement(name) => {
                write!(f, "missing {name} subelement")
            }
            FormatError::SubelementType { subelement, found } => {
                write!(f, "unexpected type code {found} in {subelement} subelement")
            }
            FormatError::PayloadSize { elem_size, actual } => {
                write!(
                    f,
                    "payload of {actual} bytes is not a multiple of element size {elem_size}"
                )
            }
            FormatError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimensions declare {expected} elements, data holds {actual}"
                )
            }
            FormatError::NegativeDimension(d) => {
                write!(f, "negative dimension: {d}")
            }
            FormatError::DimensionOverflow => {
                write!(f, "dimension product overflows a 64-bit element count")
            }
            FormatError::NotNumeric(code) => {
                write!(f, "data type code {code} is not numeric")
            }
            FormatError::NameTooLong { len, max } => {
                write!(f, "name of {len} bytes exceeds the {max}-byte limit")
            }
            FormatError::BadFieldNameLength(v) => {
                write!(f, "bad field name length: {v}")
            }
            FormatError::NestingTooDeep(max) => {
                write!(f, "arrays nested deeper than {max} levels")
            }
            FormatError::Compression(msg) => {
                write!(f, "zlib error: {msg}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}
