//! Data element tags: the 8-byte tag and the packed small-element form.

use byteorder::{ByteOrder, LittleEndian};

use crate::datatype::DataType;
use crate::error::FormatError;

/// Round `n` up to the next multiple of 8.
pub fn pad_to_8(n: usize) -> usize {
    (n + 7) & !7
}

/// Parsed element tag.
///
/// A regular tag occupies 8 bytes (u32 type, u32 byte count) and its payload
/// is padded to an 8-byte boundary. When the payload is at most 4 bytes the
/// writer may pack it as a small data element: type and length share the
/// first word and the payload lives in the second, for a fixed 8 bytes total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementTag {
    /// Payload data type.
    pub data_type: DataType,
    /// Payload length in bytes, without padding.
    pub byte_count: usize,
    /// Set when the tag uses the packed small-element form.
    pub small: bool,
}

impl ElementTag {
    /// Parse the tag at `pos`.
    pub fn parse(data: &[u8], pos: usize) -> Result<ElementTag, FormatError> {
        if pos + 8 > data.len() {
            return Err(FormatError::UnexpectedEof {
                expected: pos + 8,
                available: data.len(),
            });
        }
        let word0 = LittleEndian::read_u32(&data[pos..pos + 4]);
        let small_count = word0 >> 16;
        if small_count != 0 {
            let data_type = DataType::from_code(word0 & 0xFFFF)?;
            Ok(ElementTag {
                data_type,
                byte_count: small_count as usize,
                small: true,
            })
        } else {
            let data_type = DataType::from_code(word0)?;
            let byte_count = LittleEndian::read_u32(&data[pos + 4..pos + 8]) as usize;
            Ok(ElementTag {
                data_type,
                byte_count,
                small: false,
            })
        }
    }

    /// Bytes occupied by the tag itself.
    pub fn header_len(&self) -> usize {
        if self.small {
            4
        } else {
            8
        }
    }

    /// Bytes occupied by the whole element: tag, payload, and padding.
    pub fn total_len(&self) -> usize {
        if self.small {
            8
        } else {
            8 + pad_to_8(self.byte_count)
        }
    }
}
