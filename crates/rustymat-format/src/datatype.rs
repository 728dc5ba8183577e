//! MAT-file data type codes (the `mi` types stored in element tags).

use core::fmt;

use crate::error::FormatError;

/// Wire-level data type of an element's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// miINT8 (1).
    Int8,
    /// miUINT8 (2).
    Uint8,
    /// miINT16 (3).
    Int16,
    /// miUINT16 (4).
    Uint16,
    /// miINT32 (5).
    Int32,
    /// miUINT32 (6).
    Uint32,
    /// miSINGLE (7).
    Single,
    /// miDOUBLE (9).
    Double,
    /// miINT64 (12).
    Int64,
    /// miUINT64 (13).
    Uint64,
    /// miMATRIX (14): a nested array element.
    Matrix,
    /// miCOMPRESSED (15): a zlib envelope around one element.
    Compressed,
    /// miUTF8 (16).
    Utf8,
    /// miUTF16 (17).
    Utf16,
    /// miUTF32 (18).
    Utf32,
}

impl DataType {
    /// Decode a tag type code.
    pub fn from_code(code: u32) -> Result<DataType, FormatError> {
        Ok(match code {
            1 => DataType::Int8,
            2 => DataType::Uint8,
            3 => DataType::Int16,
            4 => DataType::Uint16,
            5 => DataType::Int32,
            6 => DataType::Uint32,
            7 => DataType::Single,
            9 => DataType::Double,
            12 => DataType::Int64,
            13 => DataType::Uint64,
            14 => DataType::Matrix,
            15 => DataType::Compressed,
            16 => DataType::Utf8,
            17 => DataType::Utf16,
            18 => DataType::Utf32,
            other => return Err(FormatError::UnknownDataType(other)),
        })
    }

    /// The tag type code for this type.
    pub fn code(self) -> u32 {
        match self {
            DataType::Int8 => 1,
            DataType::Uint8 => 2,
            DataType::Int16 => 3,
            DataType::Uint16 => 4,
            DataType::Int32 => 5,
            DataType::Uint32 => 6,
            DataType::Single => 7,
            DataType::Double => 9,
            DataType::Int64 => 12,
            DataType::Uint64 => 13,
            DataType::Matrix => 14,
            DataType::Compressed => 15,
            DataType::Utf8 => 16,
            DataType::Utf16 => 17,
            DataType::Utf32 => 18,
        }
    }

    /// Element width in bytes, `None` for container and variable-width types.
    pub fn size(self) -> Option<usize> {
        match self {
            DataType::Int8 | DataType::Uint8 => Some(1),
            DataType::Int16 | DataType::Uint16 => Some(2),
            DataType::Int32 | DataType::Uint32 | DataType::Single => Some(4),
            DataType::Double | DataType::Int64 | DataType::Uint64 => Some(8),
            DataType::Matrix | DataType::Compressed => None,
            DataType::Utf8 => Some(1),
            DataType::Utf16 => Some(2),
            DataType::Utf32 => Some(4),
        }
    }

    /// Returns `true` for the fixed-width integer and float types.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            DataType::Int8
                | DataType::Uint8
                | DataType::Int16
                | DataType::Uint16
                | DataType::Int32
                | DataType::Uint32
                | DataType::Single
                | DataType::Double
                | DataType::Int64
                | DataType::Uint64
        )
    }

    /// The `mi` name used in the format specification.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Int8 => "miINT8",
            DataType::Uint8 => "miUINT8",
            DataType::Int16 => "miINT16",
            DataType::Uint16 => "miUINT16",
            DataType::Int32 => "miINT32",
            DataType::Uint32 => "miUINT32",
            DataType::Single => "miSINGLE",
            DataType::Double => "miDOUBLE",
            DataType::Int64 => "miINT64",
            DataType::Uint64 => "miUINT64",
            DataType::Matrix => "miMATRIX",
            DataType::Compressed => "miCOMPRESSED",
            DataType::Utf8 => "miUTF8",
            DataType::Utf16 => "miUTF16",
            DataType::Utf32 => "miUTF32",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
