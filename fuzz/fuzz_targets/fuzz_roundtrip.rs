#![no_main]
use std::io::Cursor;

use bmpbin::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that loads must write back to the same bytes when untouched
    let Ok(mut file) = BmpFile::verify(Cursor::new(data), "fuzz.bmp") else {
        return;
    };
    if file.load().is_err() {
        return;
    }
    let mut out = Vec::new();
    let Ok(()) = file.write_to(&mut out) else {
        return;
    };

    let header_len = file.header().data_offset as usize;
    let body_len = file.image().pixels().len() * BYTES_PER_PIXEL;
    assert_eq!(out.len(), header_len + body_len);
    assert_eq!(&out[..header_len], &data[..header_len], "header passthrough mismatch");
    assert_eq!(
        &out[header_len..],
        &data[header_len..header_len + body_len],
        "pixel roundtrip mismatch"
    );
});
