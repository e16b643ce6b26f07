//! 24-bit uncompressed BMP codec.
//!
//! The free functions are the individual codec steps; [`BmpFile`] ties them
//! to one open source and owns the decoded state.

mod decode;
mod encode;
mod header;

pub use decode::load_pixels;
pub use encode::{write_image, write_to};
pub use header::{
    FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader, MAGIC, decode_header,
    decode_info_header, ensure_supported, validate_format,
};

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::decode::DecodedImage;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::Pixel;

/// Open `path` for binary reading.
pub fn open(path: &Path) -> Result<BufReader<File>, BmpError> {
    let file = File::open(path).map_err(|source| BmpError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// An open BMP source together with its decoded headers and pixels.
///
/// The headers are decoded once on construction and never change. The
/// pixel array is empty until [`BmpFile::load`] and is owned here until
/// [`BmpFile::release`] (or drop), which also closes the source.
pub struct BmpFile<R = BufReader<File>> {
    reader: R,
    name: PathBuf,
    header: FileHeader,
    info: InfoHeader,
    image: DecodedImage,
    limits: Limits,
}

impl BmpFile<BufReader<File>> {
    /// Open `path` and decode its file and info headers.
    ///
    /// The format is not validated; see [`BmpFile::verify`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BmpError> {
        let path = path.as_ref();
        let reader = open(path)?;
        Self::from_reader(reader, path)
    }
}

impl<R: Read + Seek> BmpFile<R> {
    /// Decode the headers from an already open source. `name` is only used
    /// for reporting.
    pub fn from_reader(mut reader: R, name: impl Into<PathBuf>) -> Result<Self, BmpError> {
        let header = decode_header(&mut reader)?;
        let info = decode_info_header(&mut reader)?;
        let file = Self {
            reader,
            name: name.into(),
            header,
            info,
            image: DecodedImage::default(),
            limits: Limits::default(),
        };
        info!("{}", file.summary());
        Ok(file)
    }

    /// [`BmpFile::from_reader`], then reject anything but 24-bit
    /// uncompressed single-plane images.
    pub fn verify(reader: R, name: impl Into<PathBuf>) -> Result<Self, BmpError> {
        let file = Self::from_reader(reader, name)?;
        file.ensure_supported()?;
        Ok(file)
    }

    /// Resource limits applied by [`BmpFile::load`].
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Read the pixel array into memory.
    pub fn load(&mut self) -> Result<&mut DecodedImage, BmpError> {
        let pixels = load_pixels(&mut self.reader, &self.header, &self.info, Some(&self.limits))?;
        let (width, height) = self.info.dimensions();
        self.image = DecodedImage::new(pixels, width, height);
        Ok(&mut self.image)
    }

    /// Write the source's header region followed by the current pixels to
    /// `output`.
    pub fn write(&mut self, output: impl AsRef<Path>) -> Result<(), BmpError> {
        let output = output.as_ref();
        debug!("writing {} to {}", self.name.display(), output.display());
        write_image(&mut self.reader, &self.header, self.image.pixels(), output)
    }

    /// Like [`BmpFile::write`], into any sink.
    pub fn write_to<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), BmpError> {
        write_to(&mut self.reader, &self.header, self.image.pixels(), out)
    }
}

impl<R> BmpFile<R> {
    pub fn name(&self) -> &Path {
        &self.name
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn info(&self) -> &InfoHeader {
        &self.info
    }

    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        self.image.pixels_mut()
    }

    pub fn is_supported(&self) -> bool {
        validate_format(&self.info)
    }

    pub fn ensure_supported(&self) -> Result<(), BmpError> {
        ensure_supported(&self.info)
    }

    /// Human-readable description of the decoded headers.
    pub fn summary(&self) -> Summary<'_> {
        Summary {
            name: &self.name,
            header: &self.header,
            info: &self.info,
        }
    }

    /// Free the pixel array and close the source.
    pub fn release(self) {
        debug!(
            "releasing {} ({} pixels)",
            self.name.display(),
            self.image.pixels().len()
        );
    }
}

/// See [`BmpFile::summary`].
pub struct Summary<'a> {
    name: &'a Path,
    header: &'a FileHeader,
    info: &'a InfoHeader,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} bytes, {}",
            self.name.display(),
            self.header.file_size,
            self.info
        )
    }
}
