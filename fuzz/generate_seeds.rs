#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, pixels: &[u8]) -> Vec<u8> {
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(54 + pixels.len() as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp.extend_from_slice(pixels);
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 4x1 24-bit, no row padding needed
    fs::write(format!("{dir}/bmp_4x1.bmp"), bmp(4, 1, 24, &[0x10; 12])).unwrap();

    // 2x2 24-bit gray ramp
    let ramp = [10, 10, 10, 200, 200, 200, 50, 50, 50, 250, 250, 250];
    fs::write(format!("{dir}/bmp_2x2.bmp"), bmp(2, 2, 24, &ramp)).unwrap();

    // Unsupported and malformed seeds for edge coverage
    fs::write(format!("{dir}/bmp_8bit.bmp"), bmp(4, 1, 8, &[0; 4])).unwrap();
    fs::write(format!("{dir}/bmp_negative_height.bmp"), bmp(4, -1, 24, &[0; 12])).unwrap();
    fs::write(format!("{dir}/bmp_truncated.bmp"), bmp(4, 4, 24, &[0; 7])).unwrap();
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/bz_magic.bin"), b"BZ\x00\x00\x00\x00\x00\x00\x00\x00\x36\x00\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}
