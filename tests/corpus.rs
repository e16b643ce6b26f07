//! Malformed and unsupported inputs, plus a few larger patterns.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use bmpbin::bmp::{decode_header, decode_info_header, load_pixels, validate_format};
use bmpbin::*;

fn header_54(width: i32, height: i32, bpp: u16, planes: u16, compression: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&planes.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&[0u8; 20]);
    out
}

fn noise(len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in out.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    out
}

fn run(dir: &Path, bytes: &[u8]) -> (Result<ConversionReport, BmpError>, PathBuf) {
    let input = dir.join("in.bmp");
    let output = dir.join("out.bmp");
    fs::write(&input, bytes).unwrap();
    (binarize_file(&input, &output, 128), output)
}

// ── Rejections ───────────────────────────────────────────────────────

#[test]
fn bad_magic_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = header_54(4, 1, 24, 1, 0);
    bytes[1] = b'Z';
    bytes.extend_from_slice(&[0; 12]);

    let (result, output) = run(dir.path(), &bytes);
    match result {
        Err(BmpError::InvalidMagic { found }) => assert_eq!(&found, b"BZ"),
        other => panic!("expected InvalidMagic, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn eight_bit_rejected_before_pixels() {
    let dir = tempfile::tempdir().unwrap();
    // No pixel data at all: a pixel read would fail with ShortRead instead.
    let bytes = header_54(4, 4, 8, 1, 0);

    let (result, output) = run(dir.path(), &bytes);
    assert!(matches!(
        result,
        Err(BmpError::UnsupportedFormat {
            bits_per_pixel: 8,
            planes: 1,
            compression: 0
        })
    ));
    assert!(!output.exists());
}

#[test]
fn compressed_and_multi_plane_rejected() {
    for (bpp, planes, compression) in [(24, 1, 1), (24, 2, 0), (32, 1, 0), (1, 1, 0)] {
        let bytes = header_54(1, 1, bpp, planes, compression);
        let info = decode_info_header(&mut Cursor::new(&bytes[14..])).unwrap();
        assert!(!validate_format(&info), "{bpp} bpp {planes} planes comp {compression}");
    }
}

#[test]
fn truncated_pixels_report_index_and_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = header_54(4, 2, 24, 1, 0);
    bytes.extend_from_slice(&noise(3 * 5 + 2));

    let (result, output) = run(dir.path(), &bytes);
    match result {
        Err(BmpError::ShortRead {
            stage: ReadStage::Pixel(5),
            needed: 3,
            got: 2,
        }) => {}
        other => panic!("expected ShortRead at pixel 5, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn missing_input_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.bmp");
    match binarize_file(&input, dir.path().join("out.bmp"), 1) {
        Err(BmpError::Open { path, .. }) => assert_eq!(path, input),
        other => panic!("expected Open, got {other:?}"),
    }
}

#[test]
fn unwritable_output_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = header_54(4, 1, 24, 1, 0);
    bytes.extend_from_slice(&[0; 12]);
    let input = dir.path().join("in.bmp");
    fs::write(&input, &bytes).unwrap();

    let output = dir.path().join("missing-dir").join("out.bmp");
    match binarize_file(&input, &output, 1) {
        Err(BmpError::Open { path, .. }) => assert_eq!(path, output),
        other => panic!("expected Open, got {other:?}"),
    }
}

#[cfg(target_os = "linux")]
#[test]
fn full_device_is_copy_mismatch() {
    let full = Path::new("/dev/full");
    if !full.exists() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = header_54(4, 1, 24, 1, 0);
    bytes.extend_from_slice(&[0; 12]);
    let input = dir.path().join("in.bmp");
    fs::write(&input, &bytes).unwrap();

    match binarize_file(&input, full, 10) {
        Err(BmpError::CopyMismatch {
            expected: 54,
            read: 54,
            ..
        }) => {}
        other => panic!("expected CopyMismatch, got {other:?}"),
    }
}

#[test]
fn header_shorter_than_14_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let (result, _) = run(dir.path(), b"BM\x10\x00");
    assert!(matches!(
        result,
        Err(BmpError::ShortRead {
            stage: ReadStage::Header,
            got: 4,
            ..
        })
    ));
}

#[test]
fn os2_core_header_rejected() {
    let mut bytes = header_54(1, 1, 24, 1, 0);
    bytes[14..18].copy_from_slice(&12u32.to_le_bytes());
    let mut cur = Cursor::new(bytes);
    decode_header(&mut cur).unwrap();
    assert!(matches!(
        decode_info_header(&mut cur),
        Err(BmpError::InvalidInfoHeader(_))
    ));
}

#[test]
fn limits_reject_large() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = header_54(4, 2, 24, 1, 0);
    bytes.extend_from_slice(&noise(24));
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    fs::write(&input, &bytes).unwrap();

    let limits = Limits {
        max_pixels: Some(4),
        ..Default::default()
    };
    match binarize_file_with_limits(&input, &output, 128, limits) {
        Err(BmpError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
    assert!(!output.exists());
}

// ── Patterns ─────────────────────────────────────────────────────────

#[test]
fn noise_image_binarizes_consistently() {
    let (w, h) = (16usize, 12usize);
    let mut bytes = header_54(w as i32, h as i32, 24, 1, 0);
    let body = noise(w * h * 3);
    bytes.extend_from_slice(&body);

    let mut cur = Cursor::new(bytes.clone());
    let header = decode_header(&mut cur).unwrap();
    let info = decode_info_header(&mut cur).unwrap();
    let mut pixels = load_pixels(&mut cur, &header, &info, None).unwrap();
    assert_eq!(pixels.len(), w * h);

    let expected: Vec<bool> = pixels.iter().map(|&p| luminance(p) < 128).collect();
    let black = binarize(&mut pixels, 128);
    assert_eq!(black, expected.iter().filter(|&&b| b).count());
    for (px, was_dark) in pixels.iter().zip(expected) {
        assert_eq!(*px, if was_dark { BLACK } else { WHITE });
    }

    let mut out = Vec::new();
    bmp::write_to(&mut cur, &header, &pixels, &mut out).unwrap();
    assert_eq!(out.len(), bytes.len());
    assert_eq!(&out[..54], &bytes[..54]);
}

#[test]
fn empty_image_copies_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = header_54(0, 7, 24, 1, 0);
    let (result, output) = run(dir.path(), &bytes);
    assert_eq!(result.unwrap().pixels, 0);
    assert_eq!(fs::read(output).unwrap(), bytes);
}
