//! # bmpbin
//!
//! Decoder, encoder and black/white thresholding for 24-bit BMP images.
//!
//! ## Supported Input
//!
//! Uncompressed, single-plane, 24 bits per pixel BMP with a
//! BITMAPINFOHEADER (or a larger info header, of which the first 40 bytes
//! are read). Pixel rows are read and written exactly as stored, with no
//! row padding and no vertical flip.
//!
//! ## Output
//!
//! The output file is the input's header region (everything before the
//! pixel data) copied byte-for-byte, followed by the transformed pixels in
//! the same order and encoding. No header field is recomputed.
//!
//! ## Non-Goals
//!
//! - Compressed, palette (≤ 8 bpp), 16-bit or 32-bit BMP
//! - Top-down row order, row padding
//! - Any other image format
//!
//! ## Usage
//!
//! ```no_run
//! use bmpbin::{BmpFile, binarize};
//!
//! let mut file = BmpFile::open("in.bmp")?;
//! file.ensure_supported()?;
//! let image = file.load()?;
//! binarize(image.pixels_mut(), 128);
//! file.write("out.bmp")?;
//! file.release();
//! # Ok::<(), bmpbin::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod binarize;
pub mod bmp;
mod convert;
mod decode;
mod error;
mod limits;
mod pixel;

// Re-exports
pub use binarize::{binarize, luminance};
pub use bmp::{BmpFile, FileHeader, InfoHeader};
pub use convert::{ConversionReport, binarize_file, binarize_file_with_limits};
pub use decode::DecodedImage;
pub use error::{BmpError, ReadStage};
pub use limits::Limits;
pub use pixel::{BLACK, BYTES_PER_PIXEL, Pixel, WHITE};

/// Output file name used when the caller doesn't pick one.
pub const DEFAULT_OUTPUT: &str = "out.bmp";
