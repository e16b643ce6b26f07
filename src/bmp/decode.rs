//! Pixel-array loading for 24-bit uncompressed BMP.
//!
//! Rows are taken exactly as stored: no row padding is skipped and no
//! vertical flip is applied, so a bottom-up file yields its bottom row first.

use std::io::{self, Read, Seek, SeekFrom};

use log::debug;

use super::header::{FileHeader, InfoHeader};
use crate::error::{BmpError, ReadStage};
use crate::limits::Limits;
use crate::pixel::{BYTES_PER_PIXEL, Pixel, from_bgr};

/// Fill `buf` from `reader`, stopping early only at end of input.
///
/// Returns the number of bytes read, which is less than `buf.len()` only
/// when the input ran out.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Load `width * height` pixels starting at the header's data offset.
///
/// Each pixel is three bytes on disk in blue, green, red order. Running out
/// of input aborts the whole load with the index of the pixel that was
/// short.
pub fn load_pixels<R: Read + Seek>(
    reader: &mut R,
    header: &FileHeader,
    info: &InfoHeader,
    limits: Option<&Limits>,
) -> Result<Vec<Pixel>, BmpError> {
    let count = info.pixel_count()?;
    if let Some(limits) = limits {
        let (w, h) = info.dimensions();
        limits.check(u64::from(w), u64::from(h))?;
        limits.check_memory(count)?;
    }

    // Only reserve what the input could possibly hold; a lying header
    // fails with ShortRead instead of a huge allocation.
    let end = reader.seek(SeekFrom::End(0))?;
    let start = u64::from(header.data_offset);
    reader.seek(SeekFrom::Start(start))?;
    let available = usize::try_from(end.saturating_sub(start) / BYTES_PER_PIXEL as u64)
        .unwrap_or(usize::MAX);

    debug!(
        "loading {count} pixels from offset {start} ({} bytes of pixel data present)",
        end.saturating_sub(start)
    );

    let mut pixels = Vec::with_capacity(count.min(available));
    let mut bgr = [0u8; BYTES_PER_PIXEL];
    for index in 0..count {
        let got = read_full(reader, &mut bgr)?;
        if got < BYTES_PER_PIXEL {
            return Err(BmpError::ShortRead {
                stage: ReadStage::Pixel(index),
                needed: BYTES_PER_PIXEL,
                got,
            });
        }
        pixels.push(from_bgr(bgr));
    }

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::header::{decode_header, decode_info_header};
    use std::io::Cursor;

    /// 54-byte header followed by `pixels` as raw BGR triples.
    fn bmp(width: i32, height: i32, data_offset: u32, pixel_bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(data_offset + pixel_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&data_offset.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&[0u8; 24]);
        out.resize(data_offset as usize, 0x55);
        out.extend_from_slice(pixel_bytes);
        out
    }

    fn load(raw: Vec<u8>, limits: Option<&Limits>) -> Result<Vec<Pixel>, BmpError> {
        let mut cur = Cursor::new(raw);
        let header = decode_header(&mut cur)?;
        let info = decode_info_header(&mut cur)?;
        load_pixels(&mut cur, &header, &info, limits)
    }

    #[test]
    fn bgr_to_rgb() {
        let raw = bmp(2, 1, 54, &[1, 2, 3, 4, 5, 6]);
        let pixels = load(raw, None).unwrap();
        assert_eq!(pixels, vec![Pixel::new(3, 2, 1), Pixel::new(6, 5, 4)]);
    }

    #[test]
    fn seeks_past_gap() {
        // 8 bytes of color table between the info header and the pixels
        let raw = bmp(1, 1, 62, &[10, 20, 30]);
        let pixels = load(raw, None).unwrap();
        assert_eq!(pixels, vec![Pixel::new(30, 20, 10)]);
    }

    #[test]
    fn rows_kept_in_file_order() {
        let raw = bmp(1, 2, 54, &[0, 0, 1, 0, 0, 2]);
        let pixels = load(raw, None).unwrap();
        assert_eq!(pixels[0].r, 1);
        assert_eq!(pixels[1].r, 2);
    }

    #[test]
    fn non_positive_dimensions_are_empty() {
        assert!(load(bmp(0, 5, 54, &[]), None).unwrap().is_empty());
        assert!(load(bmp(4, -3, 54, &[1, 2, 3]), None).unwrap().is_empty());
    }

    #[test]
    fn truncated_pixel_reports_index() {
        let raw = bmp(2, 2, 54, &[0; 10]);
        match load(raw, None) {
            Err(BmpError::ShortRead {
                stage: ReadStage::Pixel(3),
                needed: 3,
                got: 1,
            }) => {}
            other => panic!("expected ShortRead at pixel 3, got {other:?}"),
        }
    }

    #[test]
    fn huge_declared_size_fails_without_allocating() {
        let raw = bmp(60_000, 60_000, 54, &[0; 9]);
        assert!(matches!(
            load(raw, None),
            Err(BmpError::ShortRead {
                stage: ReadStage::Pixel(3),
                ..
            })
        ));
    }

    #[test]
    fn limits_checked_before_read() {
        let limits = Limits {
            max_pixels: Some(3),
            ..Default::default()
        };
        let raw = bmp(2, 2, 54, &[0; 12]);
        assert!(matches!(load(raw, Some(&limits)), Err(BmpError::LimitExceeded(_))));
    }
}
