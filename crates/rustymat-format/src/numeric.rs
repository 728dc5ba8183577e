//! Typed reads of numeric element payloads with widening to `f64`.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use byteorder::{ByteOrder, LittleEndian};

use crate::datatype::DataType;
use crate::error::FormatError;

fn check_payload(bytes: &[u8], ty: DataType) -> Result<usize, FormatError> {
    let elem_size = match ty.size() {
        Some(s) if ty.is_numeric() => s,
        _ => return Err(FormatError::NotNumeric(ty.code())),
    };
    if bytes.len() % elem_size != 0 {
        return Err(FormatError::PayloadSize {
            elem_size,
            actual: bytes.len(),
        });
    }
    Ok(bytes.len() / elem_size)
}

/// Convert a numeric payload to `f64` values.
///
/// The stored type may be narrower than the array's class; MATLAB compresses
/// integral-valued doubles this way. Every numeric type widens losslessly
/// except `i64`/`u64` values beyond 2^53.
pub fn read_f64(bytes: &[u8], ty: DataType) -> Result<Vec<f64>, FormatError> {
    let count = check_payload(bytes, ty)?;
    let mut out = vec![0f64; count];
    match ty {
        DataType::Double => LittleEndian::read_f64_into(bytes, &mut out),
        DataType::Single => {
            let mut tmp = vec![0f32; count];
            LittleEndian::read_f32_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as f64;
            }
        }
        DataType::Int8 => {
            for (dst, src) in out.iter_mut().zip(bytes) {
                *dst = *src as i8 as f64;
            }
        }
        DataType::Uint8 => {
            for (dst, src) in out.iter_mut().zip(bytes) {
                *dst = *src as f64;
            }
        }
        DataType::Int16 => {
            let mut tmp = vec![0i16; count];
            LittleEndian::read_i16_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as f64;
            }
        }
        DataType::Uint16 => {
            let mut tmp = vec![0u16; count];
            LittleEndian::read_u16_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as f64;
            }
        }
        DataType::Int32 => {
            let mut tmp = vec![0i32; count];
            LittleEndian::read_i32_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as f64;
            }
        }
        DataType::Uint32 => {
            let mut tmp = vec![0u32; count];
            LittleEndian::read_u32_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as f64;
            }
        }
        DataType::Int64 => {
            let mut tmp = vec![0i64; count];
            LittleEndian::read_i64_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as f64;
            }
        }
        DataType::Uint64 => {
            let mut tmp = vec![0u64; count];
            LittleEndian::read_u64_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as f64;
            }
        }
        // check_payload already rejected these
        _ => unreachable!(),
    }
    Ok(out)
}

/// Convert an integer payload to `i32` values (dimensions subelements).
pub fn read_i32(bytes: &[u8], ty: DataType) -> Result<Vec<i32>, FormatError> {
    match ty {
        DataType::Int8
        | DataType::Uint8
        | DataType::Int16
        | DataType::Uint16
        | DataType::Int32
        | DataType::Uint32 => {}
        other => return Err(FormatError::NotNumeric(other.code())),
    }
    let count = check_payload(bytes, ty)?;
    let mut out = vec![0i32; count];
    match ty {
        DataType::Int32 => LittleEndian::read_i32_into(bytes, &mut out),
        DataType::Uint32 => {
            let mut tmp = vec![0u32; count];
            LittleEndian::read_u32_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as i32;
            }
        }
        DataType::Int16 => {
            let mut tmp = vec![0i16; count];
            LittleEndian::read_i16_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as i32;
            }
        }
        DataType::Uint16 => {
            let mut tmp = vec![0u16; count];
            LittleEndian::read_u16_into(bytes, &mut tmp);
            for (dst, src) in out.iter_mut().zip(&tmp) {
                *dst = *src as i32;
            }
        }
        DataType::Int8 => {
            for (dst, src) in out.iter_mut().zip(bytes) {
                *dst = *src as i8 as i32;
            }
        }
        DataType::Uint8 => {
            for (dst, src) in out.iter_mut().zip(bytes) {
                *dst = *src as i32;
            }
        }
        _ => unreachable!(),
    }
    Ok(out)
}
