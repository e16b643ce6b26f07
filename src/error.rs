use std::fmt;
use std::io;
use std::path::PathBuf;

/// Point in the decode where the input ran out of bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadStage {
    /// The 14-byte file header.
    Header,
    /// The 4-byte size field that opens the info header.
    InfoHeaderSize,
    /// The body of the info header.
    InfoHeader,
    /// The pixel at this index (file order).
    Pixel(usize),
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("file header"),
            Self::InfoHeaderSize => f.write_str("info header size"),
            Self::InfoHeader => f.write_str("info header"),
            Self::Pixel(index) => write!(f, "pixel {index}"),
        }
    }
}

/// Errors from BMP decoding, encoding and binarization.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("couldn't open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("short read in {stage}: need {needed} bytes, got {got}")]
    ShortRead {
        stage: ReadStage,
        needed: usize,
        got: usize,
    },

    #[error("not a BMP file (magic bytes {found:02x?}, expected \"BM\")")]
    InvalidMagic { found: [u8; 2] },

    #[error("invalid info header: {0}")]
    InvalidInfoHeader(String),

    #[error(
        "unsupported BMP variant: {bits_per_pixel} bpp, {planes} planes, compression {compression}"
    )]
    UnsupportedFormat {
        bits_per_pixel: u16,
        planes: u16,
        compression: u32,
    },

    #[error("couldn't copy the header: expected {expected} bytes, read {read}, wrote {written}")]
    CopyMismatch {
        expected: usize,
        read: usize,
        written: usize,
    },

    #[error("couldn't write pixel {index}: {source}")]
    ShortWrite {
        index: usize,
        #[source]
        source: io::Error,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: i32, height: i32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
