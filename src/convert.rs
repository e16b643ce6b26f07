use std::path::Path;

use log::info;

use crate::binarize::binarize;
use crate::bmp::BmpFile;
use crate::error::BmpError;
use crate::limits::Limits;

/// What [`binarize_file`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConversionReport {
    pub width: u32,
    pub height: u32,
    pub pixels: usize,
    /// Pixels that came out black; the rest are white.
    pub black: usize,
}

/// Binarize the BMP at `input` and write the result to `output`.
///
/// Runs open, header decode, format check, pixel load, thresholding and
/// write in order; the first failure aborts the rest. Nothing is written
/// unless every read step succeeded.
pub fn binarize_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    threshold: u8,
) -> Result<ConversionReport, BmpError> {
    binarize_file_with_limits(input, output, threshold, Limits::default())
}

/// [`binarize_file`] with resource limits on the pixel load.
pub fn binarize_file_with_limits(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    threshold: u8,
    limits: Limits,
) -> Result<ConversionReport, BmpError> {
    let mut file = BmpFile::open(input)?.with_limits(limits);
    file.ensure_supported()?;

    let image = file.load()?;
    let (width, height) = (image.width, image.height);
    let black = binarize(image.pixels_mut(), threshold);
    let pixels = image.pixels().len();
    info!("binarized {pixels} pixels at threshold {threshold}: {black} black");

    file.write(output)?;
    file.release();

    Ok(ConversionReport {
        width,
        height,
        pixels,
        black,
    })
}
