#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header decode, format gate and pixel load must never panic
    let Ok(mut file) = bmpbin::BmpFile::from_reader(Cursor::new(data), "fuzz.bmp") else {
        return;
    };
    let _ = file.is_supported();
    let _ = file.load();
});
