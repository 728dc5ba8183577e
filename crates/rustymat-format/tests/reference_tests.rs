//! Integration tests against hand-assembled MAT-file byte images.
//!
//! The inline unit tests build their inputs with the writer; these fixtures
//! are laid out byte by byte instead, so the parser is checked against the
//! wire format itself rather than against the writer's idea of it.

use rustymat_format::class::ArrayClass;
use rustymat_format::datatype::DataType;
use rustymat_format::element::{read_element, MatrixContent, MatrixElement};
use rustymat_format::error::FormatError;
use rustymat_format::header::{Header, HEADER_LEN};

const MI_INT8: u32 = 1;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_SINGLE: u32 = 7;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;

/// 128-byte header with the given text, space-filled subsystem field,
/// version 0x0100, and the little-endian indicator.
fn header_bytes(text: &str) -> Vec<u8> {
    let mut h = vec![b' '; HEADER_LEN];
    h[..text.len()].copy_from_slice(text.as_bytes());
    h[124] = 0x00;
    h[125] = 0x01;
    h[126] = b'I';
    h[127] = b'M';
    h
}

/// Regular element: 8-byte tag, payload, zero padding to 8 bytes.
fn element(data_type: u32, payload: &[u8]) -> Vec<u8> {
    let mut e = Vec::new();
    e.extend_from_slice(&data_type.to_le_bytes());
    e.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    e.extend_from_slice(payload);
    while e.len() % 8 != 0 {
        e.push(0);
    }
    e
}

/// Small data element: type and byte count packed into the first word,
/// payload in the second.
fn small_element(data_type: u32, payload: &[u8]) -> Vec<u8> {
    assert!(payload.len() <= 4);
    let word0 = data_type | ((payload.len() as u32) << 16);
    let mut e = Vec::new();
    e.extend_from_slice(&word0.to_le_bytes());
    e.extend_from_slice(payload);
    e.resize(8, 0);
    e
}

fn flags_payload(class: u8, flag_bits: u8) -> [u8; 8] {
    let word0 = (class as u32) | ((flag_bits as u32) << 8);
    let mut p = [0u8; 8];
    p[..4].copy_from_slice(&word0.to_le_bytes());
    p
}

fn dims_payload(dims: &[i32]) -> Vec<u8> {
    dims.iter().flat_map(|d| d.to_le_bytes()).collect()
}

fn f64_bytes(vals: &[f64]) -> Vec<u8> {
    vals.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[test]
fn minimal_double_matrix_reference() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&element(MI_UINT32, &flags_payload(6, 0)));
    payload.extend_from_slice(&element(MI_INT32, &dims_payload(&[2, 2])));
    payload.extend_from_slice(&element(MI_INT8, b"m"));
    payload.extend_from_slice(&element(
        MI_DOUBLE,
        &f64_bytes(&[1.0, 2.0, 3.0, 4.0]),
    ));

    let mut bytes = header_bytes("MATLAB 5.0 MAT-file, hand-built reference");
    bytes.extend_from_slice(&element(MI_MATRIX, &payload));

    let header = Header::parse(&bytes).unwrap();
    assert_eq!(header.text, "MATLAB 5.0 MAT-file, hand-built reference");
    assert_eq!(header.version, 0x0100);
    assert_eq!(header.subsys_offset, 0);

    let (raw, consumed) = read_element(&bytes, HEADER_LEN).unwrap();
    assert_eq!(raw.data_type, DataType::Matrix);
    assert_eq!(consumed, bytes.len() - HEADER_LEN);

    let el = MatrixElement::parse(raw.payload).unwrap();
    assert_eq!(el.name, "m");
    assert_eq!(el.flags.class, ArrayClass::Double);
    assert!(!el.flags.complex);
    assert_eq!(el.dims, vec![2, 2]);
    match &el.content {
        MatrixContent::Numeric { real, imag } => {
            assert_eq!(real.data_type, DataType::Double);
            assert_eq!(real.to_f64().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
            assert!(imag.is_none());
        }
        other => panic!("expected numeric content, got {other:?}"),
    }
}

#[test]
fn small_data_elements_reference() {
    // 1x1 single with both name and data in packed small elements
    let mut payload = Vec::new();
    payload.extend_from_slice(&element(MI_UINT32, &flags_payload(7, 0)));
    payload.extend_from_slice(&element(MI_INT32, &dims_payload(&[1, 1])));
    payload.extend_from_slice(&small_element(MI_INT8, b"g"));
    payload.extend_from_slice(&small_element(MI_SINGLE, &2.5f32.to_le_bytes()));

    let mut bytes = header_bytes("MATLAB 5.0 MAT-file");
    bytes.extend_from_slice(&element(MI_MATRIX, &payload));

    let (raw, _) = read_element(&bytes, HEADER_LEN).unwrap();
    let el = MatrixElement::parse(raw.payload).unwrap();
    assert_eq!(el.name, "g");
    assert_eq!(el.flags.class, ArrayClass::Single);
    match &el.content {
        MatrixContent::Numeric { real, .. } => {
            assert_eq!(real.data_type, DataType::Single);
            assert_eq!(real.to_f64().unwrap(), vec![2.5]);
        }
        other => panic!("expected numeric content, got {other:?}"),
    }
}

#[test]
fn complex_flag_reference() {
    // Complex bit is 0x08 in the flags byte
    let mut payload = Vec::new();
    payload.extend_from_slice(&element(MI_UINT32, &flags_payload(6, 0x08)));
    payload.extend_from_slice(&element(MI_INT32, &dims_payload(&[1, 1])));
    payload.extend_from_slice(&small_element(MI_INT8, b"z"));
    payload.extend_from_slice(&element(MI_DOUBLE, &f64_bytes(&[3.0])));
    payload.extend_from_slice(&element(MI_DOUBLE, &f64_bytes(&[-4.0])));

    let mut bytes = header_bytes("MATLAB 5.0 MAT-file");
    bytes.extend_from_slice(&element(MI_MATRIX, &payload));

    let (raw, _) = read_element(&bytes, HEADER_LEN).unwrap();
    let el = MatrixElement::parse(raw.payload).unwrap();
    assert!(el.flags.complex);
    match &el.content {
        MatrixContent::Numeric { real, imag } => {
            assert_eq!(real.to_f64().unwrap(), vec![3.0]);
            assert_eq!(imag.as_ref().unwrap().to_f64().unwrap(), vec![-4.0]);
        }
        other => panic!("expected numeric content, got {other:?}"),
    }
}

#[test]
fn struct_wire_layout_reference() {
    // Nested field element: empty name (regular zero-length), scalar double
    fn field_matrix(val: f64) -> Vec<u8> {
        let mut p = Vec::new();
        p.extend_from_slice(&element(MI_UINT32, &flags_payload(6, 0)));
        p.extend_from_slice(&element(MI_INT32, &dims_payload(&[1, 1])));
        p.extend_from_slice(&element(MI_INT8, b""));
        p.extend_from_slice(&element(MI_DOUBLE, &f64_bytes(&[val])));
        element(MI_MATRIX, &p)
    }

    // 32-byte name slots, NUL padded
    let mut name_slots = vec![0u8; 64];
    name_slots[..1].copy_from_slice(b"a");
    name_slots[32..33].copy_from_slice(b"b");

    let mut payload = Vec::new();
    payload.extend_from_slice(&element(MI_UINT32, &flags_payload(2, 0)));
    payload.extend_from_slice(&element(MI_INT32, &dims_payload(&[1, 1])));
    payload.extend_from_slice(&element(MI_INT8, b"s"));
    payload.extend_from_slice(&small_element(MI_INT32, &32i32.to_le_bytes()));
    payload.extend_from_slice(&element(MI_INT8, &name_slots));
    payload.extend_from_slice(&field_matrix(1.0));
    payload.extend_from_slice(&field_matrix(2.0));

    let mut bytes = header_bytes("MATLAB 5.0 MAT-file");
    bytes.extend_from_slice(&element(MI_MATRIX, &payload));

    let (raw, _) = read_element(&bytes, HEADER_LEN).unwrap();
    let el = MatrixElement::parse(raw.payload).unwrap();
    assert_eq!(el.name, "s");
    assert_eq!(el.flags.class, ArrayClass::Struct);

    match &el.content {
        MatrixContent::Struct { field_names, .. } => {
            assert_eq!(field_names, &["a".to_string(), "b".to_string()]);
        }
        other => panic!("expected struct content, got {other:?}"),
    }

    let a = el.field("a", 0).unwrap();
    match &a.content {
        MatrixContent::Numeric { real, .. } => {
            assert_eq!(real.to_f64().unwrap(), vec![1.0]);
        }
        other => panic!("expected numeric field, got {other:?}"),
    }
    let b = el.field("b", 0).unwrap();
    match &b.content {
        MatrixContent::Numeric { real, .. } => {
            assert_eq!(real.to_f64().unwrap(), vec![2.0]);
        }
        other => panic!("expected numeric field, got {other:?}"),
    }
}

#[test]
fn big_endian_header_rejected() {
    let mut bytes = header_bytes("MATLAB 5.0 MAT-file");
    bytes[126] = b'M';
    bytes[127] = b'I';
    assert_eq!(
        Header::parse(&bytes).unwrap_err(),
        FormatError::BigEndianUnsupported
    );
}

#[test]
fn truncated_tag_reported() {
    let mut bytes = header_bytes("MATLAB 5.0 MAT-file");
    bytes.extend_from_slice(&[1, 2, 3, 4]);
    let err = read_element(&bytes, HEADER_LEN).unwrap_err();
    assert!(matches!(err, FormatError::UnexpectedEof { .. }));
}
