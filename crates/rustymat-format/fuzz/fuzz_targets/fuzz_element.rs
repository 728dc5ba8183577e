#![no_main]
use libfuzzer_sys::fuzz_target;

use rustymat_format::element::read_element;

fuzz_target!(|data: &[u8]| {
    // Walk the element stream the way a directory listing does
    let mut pos = 0;
    while pos < data.len() {
        match read_element(data, pos) {
            Ok((_, consumed)) if consumed > 0 => pos += consumed,
            _ => break,
        }
    }
});
