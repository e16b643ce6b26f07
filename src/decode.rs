use crate::pixel::Pixel;

/// A decoded 24-bit image: dimensions plus pixels in file row order.
///
/// For a standard bottom-up BMP, row 0 of `pixels` is the bottom row of the
/// picture. Nothing here flips it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedImage {
    pixels: Vec<Pixel>,
    pub width: u32,
    pub height: u32,
}

impl DecodedImage {
    pub(crate) fn new(pixels: Vec<Pixel>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Mutable access for in-place transforms.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    ///
    /// Borrows directly from this image's pixel buffer; rows are in file
    /// order.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }

    /// Mutable 2D view, for transforms that care about rows.
    #[cfg(feature = "imgref")]
    pub fn as_imgref_mut(&mut self) -> imgref::ImgRefMut<'_, Pixel> {
        imgref::ImgRefMut::new(
            &mut self.pixels,
            self.width as usize,
            self.height as usize,
        )
    }
}
