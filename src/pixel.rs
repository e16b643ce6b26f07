/// One decoded pixel: red, green, blue intensities in memory order.
pub type Pixel = rgb::RGB8;

/// Bytes one pixel occupies on disk.
pub const BYTES_PER_PIXEL: usize = 3;

pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };
pub const WHITE: Pixel = Pixel {
    r: 255,
    g: 255,
    b: 255,
};

/// Build a pixel from its on-disk blue, green, red bytes.
#[inline]
pub(crate) fn from_bgr(bgr: [u8; 3]) -> Pixel {
    Pixel {
        r: bgr[2],
        g: bgr[1],
        b: bgr[0],
    }
}

/// On-disk blue, green, red bytes for a pixel.
#[inline]
pub(crate) fn to_bgr(px: Pixel) -> [u8; 3] {
    [px.b, px.g, px.r]
}
