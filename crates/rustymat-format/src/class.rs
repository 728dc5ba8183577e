//! Array class codes (`mx` classes) and the array flags subelement.

use core::fmt;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::FormatError;

/// MATLAB array class stored in the array flags subelement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayClass {
    /// mxCELL_CLASS (1).
    Cell,
    /// mxSTRUCT_CLASS (2).
    Struct,
    /// mxOBJECT_CLASS (3).
    Object,
    /// mxCHAR_CLASS (4).
    Char,
    /// mxSPARSE_CLASS (5).
    Sparse,
    /// mxDOUBLE_CLASS (6).
    Double,
    /// mxSINGLE_CLASS (7).
    Single,
    /// mxINT8_CLASS (8).
    Int8,
    /// mxUINT8_CLASS (9).
    Uint8,
    /// mxINT16_CLASS (10).
    Int16,
    /// mxUINT16_CLASS (11).
    Uint16,
    /// mxINT32_CLASS (12).
    Int32,
    /// mxUINT32_CLASS (13).
    Uint32,
    /// mxINT64_CLASS (14).
    Int64,
    /// mxUINT64_CLASS (15).
    Uint64,
}

impl ArrayClass {
    /// Decode the class byte of the array flags.
    pub fn from_code(code: u8) -> Result<ArrayClass, FormatError> {
        Ok(match code {
            1 => ArrayClass::Cell,
            2 => ArrayClass::Struct,
            3 => ArrayClass::Object,
            4 => ArrayClass::Char,
            5 => ArrayClass::Sparse,
            6 => ArrayClass::Double,
            7 => ArrayClass::Single,
            8 => ArrayClass::Int8,
            9 => ArrayClass::Uint8,
            10 => ArrayClass::Int16,
            11 => ArrayClass::Uint16,
            12 => ArrayClass::Int32,
            13 => ArrayClass::Uint32,
            14 => ArrayClass::Int64,
            15 => ArrayClass::Uint64,
            other => return Err(FormatError::UnknownClass(other)),
        })
    }

    /// The class byte for this class.
    pub fn code(self) -> u8 {
        match self {
            ArrayClass::Cell => 1,
            ArrayClass::Struct => 2,
            ArrayClass::Object => 3,
            ArrayClass::Char => 4,
            ArrayClass::Sparse => 5,
            ArrayClass::Double => 6,
            ArrayClass::Single => 7,
            ArrayClass::Int8 => 8,
            ArrayClass::Uint8 => 9,
            ArrayClass::Int16 => 10,
            ArrayClass::Uint16 => 11,
            ArrayClass::Int32 => 12,
            ArrayClass::Uint32 => 13,
            ArrayClass::Int64 => 14,
            ArrayClass::Uint64 => 15,
        }
    }

    /// Returns `true` for the real numeric classes (double through uint64).
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ArrayClass::Double
                | ArrayClass::Single
                | ArrayClass::Int8
                | ArrayClass::Uint8
                | ArrayClass::Int16
                | ArrayClass::Uint16
                | ArrayClass::Int32
                | ArrayClass::Uint32
                | ArrayClass::Int64
                | ArrayClass::Uint64
        )
    }

    /// The `mx` name used in the format specification.
    pub fn name(self) -> &'static str {
        match self {
            ArrayClass::Cell => "mxCELL_CLASS",
            ArrayClass::Struct => "mxSTRUCT_CLASS",
            ArrayClass::Object => "mxOBJECT_CLASS",
            ArrayClass::Char => "mxCHAR_CLASS",
            ArrayClass::Sparse => "mxSPARSE_CLASS",
            ArrayClass::Double => "mxDOUBLE_CLASS",
            ArrayClass::Single => "mxSINGLE_CLASS",
            ArrayClass::Int8 => "mxINT8_CLASS",
            ArrayClass::Uint8 => "mxUINT8_CLASS",
            ArrayClass::Int16 => "mxINT16_CLASS",
            ArrayClass::Uint16 => "mxUINT16_CLASS",
            ArrayClass::Int32 => "mxINT32_CLASS",
            ArrayClass::Uint32 => "mxUINT32_CLASS",
            ArrayClass::Int64 => "mxINT64_CLASS",
            ArrayClass::Uint64 => "mxUINT64_CLASS",
        }
    }
}

impl fmt::Display for ArrayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const FLAG_LOGICAL: u32 = 0x0200;
const FLAG_GLOBAL: u32 = 0x0400;
const FLAG_COMPLEX: u32 = 0x0800;

/// Decoded array flags subelement (two little-endian u32 words).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayFlags {
    /// The array's class.
    pub class: ArrayClass,
    /// Set when the array carries an imaginary part.
    pub complex: bool,
    /// Set when the variable was saved from the global workspace.
    pub global: bool,
    /// Set when the array is logical.
    pub logical: bool,
    /// Maximum number of nonzeros; meaningful for sparse arrays only.
    pub nzmax: u32,
}

impl ArrayFlags {
    /// Parse the 8-byte array flags payload.
    pub fn parse(data: &[u8]) -> Result<ArrayFlags, FormatError> {
        if data.len() < 8 {
            return Err(FormatError::UnexpectedEof {
                expected: 8,
                available: data.len(),
            });
        }
        let word0 = LittleEndian::read_u32(&data[..4]);
        let nzmax = LittleEndian::read_u32(&data[4..8]);
        let class = ArrayClass::from_code((word0 & 0xFF) as u8)?;
        Ok(ArrayFlags {
            class,
            complex: word0 & FLAG_COMPLEX != 0,
            global: word0 & FLAG_GLOBAL != 0,
            logical: word0 & FLAG_LOGICAL != 0,
            nzmax,
        })
    }

    /// Encode the 8-byte array flags payload.
    pub fn to_bytes(self) -> [u8; 8] {
        let mut word0 = self.class.code() as u32;
        if self.complex {
            word0 |= FLAG_COMPLEX;
        }
        if self.global {
            word0 |= FLAG_GLOBAL;
        }
        if self.logical {
            word0 |= FLAG_LOGICAL;
        }
        let mut out = [0u8; 8];
        LittleEndian::write_u32(&mut out[..4], word0);
        LittleEndian::write_u32(&mut out[4..8], self.nzmax);
        out
    }

    /// Flags for a plain real array of the given class.
    pub fn real(class: ArrayClass) -> ArrayFlags {
        ArrayFlags {
            class,
            complex: false,
            global: false,
            logical: false,
            nzmax: 0,
        }
    }
}
