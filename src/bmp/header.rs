//! File header and BITMAPINFOHEADER decoding.
//!
//! Fields are pulled out of the raw bytes with explicit little-endian
//! reads at fixed offsets; every read is bounds-checked.

use std::fmt;
use std::io::Read;

use log::debug;

use super::decode::read_full;
use crate::error::{BmpError, ReadStage};

/// Size of the file header in bytes.
pub const FILE_HEADER_SIZE: usize = 14;

/// Size of the only info header layout whose offsets are decoded.
pub const INFO_HEADER_SIZE: u32 = 40;

/// `"BM"` in file order.
pub const MAGIC: [u8; 2] = *b"BM";

// File header offsets
const MAGIC_OFF: usize = 0;
const FILE_SIZE_OFF: usize = 2;
const RESERVED_OFF: usize = 6;
const DATA_OFFSET_OFF: usize = 10;

// Info header offsets, relative to the start of the info header
const SIZE_OFF: usize = 0;
const WIDTH_OFF: usize = 4;
const HEIGHT_OFF: usize = 8;
const PLANES_OFF: usize = 12;
const BIT_COUNT_OFF: usize = 14;
const COMPRESSION_OFF: usize = 16;
const IMAGE_SIZE_OFF: usize = 20;
const X_RES_OFF: usize = 24;
const Y_RES_OFF: usize = 28;
const COLORS_USED_OFF: usize = 32;
const IMPORTANT_COLORS_OFF: usize = 36;

/// The 14-byte BMP file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: [u8; 2],
    /// Declared file size. Informational; never recomputed.
    pub file_size: u32,
    pub reserved: u32,
    /// Absolute offset of the pixel data from the start of the file.
    pub data_offset: u32,
}

impl FileHeader {
    /// Parse a file header from its raw bytes, rejecting anything that
    /// doesn't start with `BM`.
    pub fn parse(buf: &[u8; FILE_HEADER_SIZE]) -> Result<Self, BmpError> {
        let magic = [buf[MAGIC_OFF], buf[MAGIC_OFF + 1]];
        if magic != MAGIC {
            return Err(BmpError::InvalidMagic { found: magic });
        }
        Ok(Self {
            magic,
            file_size: fixed_u32(buf, FILE_SIZE_OFF),
            reserved: fixed_u32(buf, RESERVED_OFF),
            data_offset: fixed_u32(buf, DATA_OFFSET_OFF),
        })
    }
}

/// The Windows BITMAPINFOHEADER fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    /// Declared size of the info header, including this field.
    pub size: u32,
    pub width: i32,
    /// Positive for bottom-up rows. Rows are kept in file order either way.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_resolution: u32,
    pub y_resolution: u32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl InfoHeader {
    /// Parse the fixed-offset fields from a buffer that starts at the
    /// info header's size field.
    pub fn parse(buf: &[u8]) -> Result<Self, BmpError> {
        let len = buf.len();
        Ok(Self {
            size: require(le_u32(buf, SIZE_OFF), "size", len)?,
            width: require(le_u32(buf, WIDTH_OFF), "width", len)? as i32,
            height: require(le_u32(buf, HEIGHT_OFF), "height", len)? as i32,
            planes: require(le_u16(buf, PLANES_OFF), "planes", len)?,
            bits_per_pixel: require(le_u16(buf, BIT_COUNT_OFF), "bit count", len)?,
            compression: require(le_u32(buf, COMPRESSION_OFF), "compression", len)?,
            image_size: require(le_u32(buf, IMAGE_SIZE_OFF), "image size", len)?,
            x_resolution: require(le_u32(buf, X_RES_OFF), "x resolution", len)?,
            y_resolution: require(le_u32(buf, Y_RES_OFF), "y resolution", len)?,
            colors_used: require(le_u32(buf, COLORS_USED_OFF), "color count", len)?,
            important_colors: require(le_u32(buf, IMPORTANT_COLORS_OFF), "important colors", len)?,
        })
    }

    /// Number of pixels in the image.
    ///
    /// A zero or negative dimension gives an empty image.
    pub fn pixel_count(&self) -> Result<usize, BmpError> {
        let (w, h) = self.dimensions();
        (w as usize)
            .checked_mul(h as usize)
            .ok_or(BmpError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    /// Width and height with non-positive values clamped to zero.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width.max(0) as u32, self.height.max(0) as u32)
    }
}

impl fmt::Display for InfoHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}, {} planes, {} bpp, compression {}, \
             image size {} bytes, {} colors ({} important)",
            self.width,
            self.height,
            self.planes,
            self.bits_per_pixel,
            self.compression,
            self.image_size,
            self.colors_used,
            self.important_colors,
        )
    }
}

/// Read and parse the file header. Leaves the reader just past it.
pub fn decode_header<R: Read>(reader: &mut R) -> Result<FileHeader, BmpError> {
    let mut buf = [0u8; FILE_HEADER_SIZE];
    let got = read_full(reader, &mut buf)?;
    if got < FILE_HEADER_SIZE {
        return Err(BmpError::ShortRead {
            stage: ReadStage::Header,
            needed: FILE_HEADER_SIZE,
            got,
        });
    }
    let header = FileHeader::parse(&buf)?;
    debug!(
        "file header: size={} data_offset={}",
        header.file_size, header.data_offset
    );
    Ok(header)
}

/// Read and parse the info header. Leaves the reader at its end.
///
/// The declared size is read first, then the remaining `size - 4` bytes in
/// one bounded read into a buffer that already holds the size field, so
/// the fixed offsets line up without seeking back.
pub fn decode_info_header<R: Read>(reader: &mut R) -> Result<InfoHeader, BmpError> {
    let mut size_field = [0u8; 4];
    let got = read_full(reader, &mut size_field)?;
    if got < size_field.len() {
        return Err(BmpError::ShortRead {
            stage: ReadStage::InfoHeaderSize,
            needed: size_field.len(),
            got,
        });
    }

    let declared = u32::from_le_bytes(size_field);
    if declared < INFO_HEADER_SIZE {
        return Err(BmpError::InvalidInfoHeader(format!(
            "declared size {declared} is smaller than the {INFO_HEADER_SIZE}-byte BITMAPINFOHEADER"
        )));
    }
    let size = usize::try_from(declared).map_err(|_| {
        BmpError::InvalidInfoHeader(format!("declared size {declared} doesn't fit in memory"))
    })?;

    let mut buf = Vec::with_capacity(INFO_HEADER_SIZE as usize);
    buf.extend_from_slice(&size_field);
    let rest = (size - size_field.len()) as u64;
    reader.by_ref().take(rest).read_to_end(&mut buf)?;
    if buf.len() < size {
        return Err(BmpError::ShortRead {
            stage: ReadStage::InfoHeader,
            needed: size,
            got: buf.len(),
        });
    }

    let info = InfoHeader::parse(&buf)?;
    debug!("info header: {info}");
    Ok(info)
}

/// Whether the info header describes the one supported layout:
/// 24 bits per pixel, a single plane, no compression.
pub fn validate_format(info: &InfoHeader) -> bool {
    info.bits_per_pixel == 24 && info.planes == 1 && info.compression == 0
}

/// [`validate_format`] as a typed failure.
pub fn ensure_supported(info: &InfoHeader) -> Result<(), BmpError> {
    if validate_format(info) {
        Ok(())
    } else {
        Err(BmpError::UnsupportedFormat {
            bits_per_pixel: info.bits_per_pixel,
            planes: info.planes,
            compression: info.compression,
        })
    }
}

fn require<T>(value: Option<T>, name: &str, len: usize) -> Result<T, BmpError> {
    value.ok_or_else(|| {
        BmpError::InvalidInfoHeader(format!("{name} lies outside the {len}-byte info header"))
    })
}

fn fixed_u32(buf: &[u8; FILE_HEADER_SIZE], off: usize) -> u32 {
    u32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

fn le_u16(buf: &[u8], off: usize) -> Option<u16> {
    let bytes = buf.get(off..off.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn le_u32(buf: &[u8], off: usize) -> Option<u32> {
    let bytes = buf.get(off..off.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
