//! zlib inflate/deflate for miCOMPRESSED envelopes.
//!
//! A miCOMPRESSED element holds exactly one complete element (tag included)
//! as a single zlib stream. Only available with the `std` feature.

use std::io::{Read, Write};

use crate::error::FormatError;

/// Inflate a miCOMPRESSED payload back into element bytes.
pub fn inflate(data: &[u8]) -> Result<Vec<u8>, FormatError> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| FormatError::Compression(e.to_string()))?;
    Ok(out)
}

/// Deflate element bytes into a miCOMPRESSED payload.
pub fn deflate(data: &[u8], level: u32) -> Result<Vec<u8>, FormatError> {
    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::new(level));
    encoder
        .write_all(data)
        .map_err(|e| FormatError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| FormatError::Compression(e.to_string()))
}
