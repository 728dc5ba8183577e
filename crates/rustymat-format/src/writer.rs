//! Building MAT-file byte images.
//!
//! Every `*_array` function returns a complete element (tag included), so
//! struct fields nest by concatenation and [`file_bytes`] only prepends the
//! header. Fixtures and tests synthesize files through this module instead of
//! shipping binary blobs.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use byteorder::{ByteOrder, LittleEndian};

use crate::class::{ArrayClass, ArrayFlags};
use crate::datatype::DataType;
use crate::element::{num_elements, NumericData};
use crate::error::FormatError;
use crate::header::Header;
use crate::tag::pad_to_8;

/// Field name slot width MATLAB writes: 31 characters plus a NUL.
pub const FIELD_NAME_LEN: usize = 32;

fn put_element(buf: &mut Vec<u8>, ty: DataType, payload: &[u8]) {
    buf.extend_from_slice(&ty.code().to_le_bytes());
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(payload);
    let padded = pad_to_8(payload.len());
    buf.extend(core::iter::repeat(0u8).take(padded - payload.len()));
}

fn put_small_element(buf: &mut Vec<u8>, ty: DataType, payload: &[u8]) {
    debug_assert!(payload.len() <= 4);
    let word0 = (payload.len() as u32) << 16 | ty.code();
    buf.extend_from_slice(&word0.to_le_bytes());
    let mut area = [0u8; 4];
    area[..payload.len()].copy_from_slice(payload);
    buf.extend_from_slice(&area);
}

fn put_name(buf: &mut Vec<u8>, name: &str) {
    if !name.is_empty() && name.len() <= 4 {
        put_small_element(buf, DataType::Int8, name.as_bytes());
    } else {
        put_element(buf, DataType::Int8, name.as_bytes());
    }
}

fn put_dims(buf: &mut Vec<u8>, dims: &[i32]) {
    let mut bytes = vec![0u8; dims.len() * 4];
    LittleEndian::write_i32_into(dims, &mut bytes);
    put_element(buf, DataType::Int32, &bytes);
}

fn wrap_matrix(payload: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 8);
    put_element(&mut out, DataType::Matrix, &payload);
    out
}

fn check_count(dims: &[i32], actual: usize) -> Result<(), FormatError> {
    let expected = num_elements(dims)?;
    if actual as u64 != expected {
        return Err(FormatError::DimensionMismatch {
            expected: expected as usize,
            actual,
        });
    }
    Ok(())
}

/// Encode `f64` values as a little-endian miDOUBLE payload.
pub fn f64_payload(vals: &[f64]) -> NumericData {
    let mut bytes = vec![0u8; vals.len() * 8];
    LittleEndian::write_f64_into(vals, &mut bytes);
    NumericData {
        data_type: DataType::Double,
        bytes,
    }
}

/// Encode `f32` values as a little-endian miSINGLE payload.
pub fn f32_payload(vals: &[f32]) -> NumericData {
    let mut bytes = vec![0u8; vals.len() * 4];
    LittleEndian::write_f32_into(vals, &mut bytes);
    NumericData {
        data_type: DataType::Single,
        bytes,
    }
}

/// Build a numeric array element of the given class.
///
/// The complex flag follows from `imag`. The stored type may be narrower
/// than the class, as MATLAB writes integral-valued doubles.
pub fn numeric_array(
    name: &str,
    class: ArrayClass,
    dims: &[i32],
    real: &NumericData,
    imag: Option<&NumericData>,
) -> Result<Vec<u8>, FormatError> {
    check_count(dims, real.len())?;
    if let Some(im) = imag {
        check_count(dims, im.len())?;
    }
    let mut flags = ArrayFlags::real(class);
    flags.complex = imag.is_some();

    let mut payload = Vec::new();
    put_element(&mut payload, DataType::Uint32, &flags.to_bytes());
    put_dims(&mut payload, dims);
    put_name(&mut payload, name);
    put_element(&mut payload, real.data_type, &real.bytes);
    if let Some(im) = imag {
        put_element(&mut payload, im.data_type, &im.bytes);
    }
    Ok(wrap_matrix(payload))
}

/// Build a real double-precision array element.
pub fn f64_array(name: &str, dims: &[i32], vals: &[f64]) -> Result<Vec<u8>, FormatError> {
    numeric_array(name, ArrayClass::Double, dims, &f64_payload(vals), None)
}

/// Build a real single-precision array element.
pub fn f32_array(name: &str, dims: &[i32], vals: &[f32]) -> Result<Vec<u8>, FormatError> {
    numeric_array(name, ArrayClass::Single, dims, &f32_payload(vals), None)
}

/// Build a struct array element.
///
/// `fields` holds one complete nested element per (array element, field),
/// element-major, matching the read side. Nested elements keep empty names.
pub fn struct_array(
    name: &str,
    dims: &[i32],
    field_names: &[&str],
    fields: &[Vec<u8>],
) -> Result<Vec<u8>, FormatError> {
    let numel = num_elements(dims)?;
    let expected = (field_names.len() as u64)
        .checked_mul(numel)
        .ok_or(FormatError::DimensionOverflow)?;
    if fields.len() as u64 != expected {
        return Err(FormatError::DimensionMismatch {
            expected: expected as usize,
            actual: fields.len(),
        });
    }
    for fname in field_names {
        if fname.len() >= FIELD_NAME_LEN {
            return Err(FormatError::NameTooLong {
                len: fname.len(),
                max: FIELD_NAME_LEN,
            });
        }
    }

    let mut payload = Vec::new();
    put_element(
        &mut payload,
        DataType::Uint32,
        &ArrayFlags::real(ArrayClass::Struct).to_bytes(),
    );
    put_dims(&mut payload, dims);
    put_name(&mut payload, name);
    put_small_element(
        &mut payload,
        DataType::Int32,
        &(FIELD_NAME_LEN as i32).to_le_bytes(),
    );
    let mut names = vec![0u8; field_names.len() * FIELD_NAME_LEN];
    for (slot, fname) in names.chunks_exact_mut(FIELD_NAME_LEN).zip(field_names) {
        slot[..fname.len()].copy_from_slice(fname.as_bytes());
    }
    put_element(&mut payload, DataType::Int8, &names);
    for field in fields {
        payload.extend_from_slice(field);
    }
    Ok(wrap_matrix(payload))
}

/// Wrap a complete element in a miCOMPRESSED zlib envelope.
#[cfg(feature = "std")]
pub fn compressed(element: &[u8], level: u32) -> Result<Vec<u8>, FormatError> {
    let packed = crate::compress::deflate(element, level)?;
    let mut out = Vec::with_capacity(packed.len() + 8);
    put_element(&mut out, DataType::Compressed, &packed);
    Ok(out)
}

/// Assemble a complete file image: header followed by the given elements.
pub fn file_bytes(text: &str, elements: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Header::build(text).to_vec();
    for element in elements {
        out.extend_from_slice(element);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{read_element, MatrixContent, MatrixElement};
    use crate::header::HEADER_LEN;

    fn parse_matrix(element: &[u8]) -> MatrixElement {
        let (raw, consumed) = read_element(element, 0).unwrap();
        assert_eq!(raw.data_type, DataType::Matrix);
        assert_eq!(consumed, element.len());
        MatrixElement::parse(raw.payload).unwrap()
    }

    #[test]
    fn f64_array_roundtrip() {
        let element = f64_array("samples", &[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(element.len() % 8, 0);
        let el = parse_matrix(&element);
        assert_eq!(el.name, "samples");
        assert_eq!(el.flags.class, ArrayClass::Double);
        assert_eq!(el.dims, vec![2, 3]);
        match &el.content {
            MatrixContent::Numeric { real, imag } => {
                assert_eq!(real.to_f64().unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
                assert!(imag.is_none());
            }
            other => panic!("expected numeric content, got {other:?}"),
        }
    }

    #[test]
    fn short_name_uses_small_element() {
        let element = f64_array("ab", &[1, 1], &[9.0]).unwrap();
        let el = parse_matrix(&element);
        assert_eq!(el.name, "ab");
    }

    #[test]
    fn empty_name_roundtrip() {
        let element = f64_array("", &[1, 1], &[9.0]).unwrap();
        let el = parse_matrix(&element);
        assert_eq!(el.name, "");
    }

    #[test]
    fn f32_array_widens_on_read() {
        let element = f32_array("s", &[1, 2], &[0.5, -1.5]).unwrap();
        let el = parse_matrix(&element);
        assert_eq!(el.flags.class, ArrayClass::Single);
        match &el.content {
            MatrixContent::Numeric { real, .. } => {
                assert_eq!(real.data_type, DataType::Single);
                assert_eq!(real.to_f64().unwrap(), vec![0.5, -1.5]);
            }
            other => panic!("expected numeric content, got {other:?}"),
        }
    }

    #[test]
    fn complex_array_roundtrip() {
        let element = numeric_array(
            "z",
            ArrayClass::Double,
            &[1, 2],
            &f64_payload(&[1.0, 2.0]),
            Some(&f64_payload(&[3.0, 4.0])),
        )
        .unwrap();
        let el = parse_matrix(&element);
        assert!(el.flags.complex);
        match &el.content {
            MatrixContent::Numeric { real, imag } => {
                assert_eq!(real.to_f64().unwrap(), vec![1.0, 2.0]);
                assert_eq!(imag.as_ref().unwrap().to_f64().unwrap(), vec![3.0, 4.0]);
            }
            other => panic!("expected numeric content, got {other:?}"),
        }
    }

    #[test]
    fn count_mismatch_rejected() {
        assert_eq!(
            f64_array("m", &[2, 3], &[1.0]).unwrap_err(),
            FormatError::DimensionMismatch {
                expected: 6,
                actual: 1,
            }
        );
    }

    #[test]
    fn overflowing_dims_rejected() {
        assert_eq!(
            f64_array("m", &[i32::MAX, i32::MAX, i32::MAX], &[]).unwrap_err(),
            FormatError::DimensionOverflow
        );
    }

    #[test]
    fn struct_roundtrip() {
        let data = f64_array("", &[2, 2], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let rate = f64_array("", &[1, 1], &[250.0]).unwrap();
        let element = struct_array("TD", &[1, 1], &["data", "rate"], &[data, rate]).unwrap();
        let el = parse_matrix(&element);
        assert_eq!(el.name, "TD");
        assert_eq!(el.flags.class, ArrayClass::Struct);
        let field = el.field("data", 0).unwrap();
        assert_eq!(field.dims, vec![2, 2]);
        let rate = el.field("rate", 0).unwrap();
        match &rate.content {
            MatrixContent::Numeric { real, .. } => {
                assert_eq!(real.to_f64().unwrap(), vec![250.0]);
            }
            other => panic!("expected numeric content, got {other:?}"),
        }
    }

    #[test]
    fn struct_field_count_mismatch() {
        let one = f64_array("", &[1, 1], &[1.0]).unwrap();
        assert_eq!(
            struct_array("s", &[1, 1], &["a", "b"], &[one]).unwrap_err(),
            FormatError::DimensionMismatch {
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn overlong_field_name_rejected() {
        let one = f64_array("", &[1, 1], &[1.0]).unwrap();
        let long = "f".repeat(FIELD_NAME_LEN);
        assert_eq!(
            struct_array("s", &[1, 1], &[&long], &[one]).unwrap_err(),
            FormatError::NameTooLong {
                len: FIELD_NAME_LEN,
                max: FIELD_NAME_LEN,
            }
        );
    }

    #[test]
    fn compressed_roundtrip() {
        let element = f64_array("big", &[1, 100], &[0.25; 100]).unwrap();
        let packed = compressed(&element, 6).unwrap();
        assert!(packed.len() < element.len());

        let (raw, _) = read_element(&packed, 0).unwrap();
        assert_eq!(raw.data_type, DataType::Compressed);
        let inflated = crate::compress::inflate(raw.payload).unwrap();
        assert_eq!(inflated, element);
        let el = parse_matrix(&inflated);
        assert_eq!(el.name, "big");
    }

    #[test]
    fn file_bytes_layout() {
        let a = f64_array("a", &[1, 1], &[1.0]).unwrap();
        let b = f64_array("b", &[1, 1], &[2.0]).unwrap();
        let bytes = file_bytes("MATLAB 5.0 MAT-file, test", &[a.clone(), b.clone()]);

        let hdr = Header::parse(&bytes).unwrap();
        assert_eq!(hdr.text, "MATLAB 5.0 MAT-file, test");

        let (first, consumed) = read_element(&bytes, HEADER_LEN).unwrap();
        assert_eq!(first.data_type, DataType::Matrix);
        assert_eq!(consumed, a.len());
        let (_, consumed2) = read_element(&bytes, HEADER_LEN + consumed).unwrap();
        assert_eq!(HEADER_LEN + consumed + consumed2, bytes.len());
        assert_eq!(consumed2, b.len());
    }

    #[test]
    fn elements_stay_aligned() {
        // A 3-char name forces name padding inside the payload.
        let element = f64_array("abc", &[1, 1], &[7.0]).unwrap();
        assert_eq!(element.len() % 8, 0);
        let el = parse_matrix(&element);
        assert_eq!(el.name, "abc");
    }
}
