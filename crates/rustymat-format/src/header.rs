//! MAT-file 128-byte header parsing and construction.

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

use byteorder::{ByteOrder, LittleEndian};

use crate::error::FormatError;

/// Total header length in bytes.
pub const HEADER_LEN: usize = 128;

/// Length of the descriptive text field.
pub const TEXT_LEN: usize = 116;

/// The only supported header version word.
pub const VERSION: u16 = 0x0100;

/// Endian indicator as stored by a little-endian writer.
///
/// The format stores the 16-bit value `MI`; written little-endian it appears
/// as the bytes `IM`.
pub const ENDIAN_LE: [u8; 2] = *b"IM";

/// Endian indicator as stored by a big-endian writer.
pub const ENDIAN_BE: [u8; 2] = *b"MI";

/// Parsed MAT-file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Descriptive text, trailing padding stripped.
    pub text: String,
    /// Subsystem data offset; 0 when the field is blank (zeros or spaces).
    pub subsys_offset: u64,
    /// Version word, always 0x0100 for files this crate accepts.
    pub version: u16,
}

impl Header {
    /// Parse the 128-byte header at the start of `data`.
    ///
    /// Only little-endian files are accepted; a big-endian indicator is
    /// reported as [`FormatError::BigEndianUnsupported`].
    pub fn parse(data: &[u8]) -> Result<Header, FormatError> {
        if data.len() < HEADER_LEN {
            return Err(FormatError::UnexpectedEof {
                expected: HEADER_LEN,
                available: data.len(),
            });
        }

        let endian = [data[126], data[127]];
        if endian == ENDIAN_BE {
            return Err(FormatError::BigEndianUnsupported);
        }
        if endian != ENDIAN_LE {
            return Err(FormatError::BadEndianIndicator(endian));
        }

        let version = LittleEndian::read_u16(&data[124..126]);
        if version != VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }

        let text = String::from_utf8_lossy(&data[..TEXT_LEN])
            .trim_end_matches([' ', '\0'])
            .to_string();

        // Writers with no subsystem data fill this field with spaces or zeros.
        let subsys = &data[116..124];
        let subsys_offset = if subsys.iter().all(|&b| b == b' ' || b == 0) {
            0
        } else {
            LittleEndian::read_u64(subsys)
        };

        Ok(Header {
            text,
            subsys_offset,
            version,
        })
    }

    /// Build header bytes for a new little-endian file.
    ///
    /// `text` is truncated to the 116-byte field and padded with spaces.
    pub fn build(text: &str) -> [u8; HEADER_LEN] {
        let mut out = [b' '; HEADER_LEN];
        let bytes = text.as_bytes();
        let n = bytes.len().min(TEXT_LEN);
        out[..n].copy_from_slice(&bytes[..n]);
        // Subsystem offset field stays blank (spaces).
        LittleEndian::write_u16(&mut out[124..126], VERSION);
        out[126] = ENDIAN_LE[0];
        out[127] = ENDIAN_LE[1];
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_header_bytes(text: &str, version: u16, endian: [u8; 2]) -> Vec<u8> {
        let mut buf = vec![b' '; HEADER_LEN];
        let bytes = text.as_bytes();
        buf[..bytes.len()].copy_from_slice(bytes);
        LittleEndian::write_u16(&mut buf[124..126], version);
        buf[126] = endian[0];
        buf[127] = endian[1];
        buf
    }

    #[test]
    fn parse_valid_header() {
        let data = build_header_bytes("MATLAB 5.0 MAT-file, test", VERSION, ENDIAN_LE);
        let hdr = Header::parse(&data).unwrap();
        assert_eq!(hdr.text, "MATLAB 5.0 MAT-file, test");
        assert_eq!(hdr.version, 0x0100);
        assert_eq!(hdr.subsys_offset, 0);
    }

    #[test]
    fn parse_zero_padded_subsys_field() {
        let mut data = build_header_bytes("MATLAB 5.0 MAT-file", VERSION, ENDIAN_LE);
        for b in &mut data[116..124] {
            *b = 0;
        }
        let hdr = Header::parse(&data).unwrap();
        assert_eq!(hdr.subsys_offset, 0);
    }

    #[test]
    fn parse_nonzero_subsys_offset() {
        let mut data = build_header_bytes("MATLAB 5.0 MAT-file", VERSION, ENDIAN_LE);
        LittleEndian::write_u64(&mut data[116..124], 0x1234);
        let hdr = Header::parse(&data).unwrap();
        assert_eq!(hdr.subsys_offset, 0x1234);
    }

    #[test]
    fn big_endian_rejected() {
        let data = build_header_bytes("MATLAB 5.0 MAT-file", VERSION, ENDIAN_BE);
        assert_eq!(
            Header::parse(&data),
            Err(FormatError::BigEndianUnsupported)
        );
    }

    #[test]
    fn garbage_endian_indicator() {
        let data = build_header_bytes("MATLAB 5.0 MAT-file", VERSION, *b"XX");
        assert_eq!(
            Header::parse(&data),
            Err(FormatError::BadEndianIndicator(*b"XX"))
        );
    }

    #[test]
    fn wrong_version() {
        let data = build_header_bytes("MATLAB 5.0 MAT-file", 0x0200, ENDIAN_LE);
        assert_eq!(
            Header::parse(&data),
            Err(FormatError::UnsupportedVersion(0x0200))
        );
    }

    #[test]
    fn truncated_header() {
        let data = vec![b' '; 64];
        assert_eq!(
            Header::parse(&data),
            Err(FormatError::UnexpectedEof {
                expected: HEADER_LEN,
                available: 64,
            })
        );
    }

    #[test]
    fn build_roundtrip() {
        let bytes = Header::build("MATLAB 5.0 MAT-file, Platform: rustymat");
        let hdr = Header::parse(&bytes).unwrap();
        assert_eq!(hdr.text, "MATLAB 5.0 MAT-file, Platform: rustymat");
        assert_eq!(hdr.version, VERSION);
        assert_eq!(hdr.subsys_offset, 0);
    }

    #[test]
    fn build_truncates_long_text() {
        let long = "x".repeat(200);
        let bytes = Header::build(&long);
        let hdr = Header::parse(&bytes).unwrap();
        assert_eq!(hdr.text.len(), TEXT_LEN);
    }
}
