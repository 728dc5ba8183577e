#![no_main]
use libfuzzer_sys::fuzz_target;

use rustymat_format::element::{MatrixElement, MatrixInfo};

fuzz_target!(|data: &[u8]| {
    // The input is treated as a bare miMATRIX payload
    let _ = MatrixInfo::parse(data);
    let _ = MatrixElement::parse(data);
});
