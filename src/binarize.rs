//! Luminance thresholding.
//!
//! Each pixel is reduced to a perceptual grayscale value
//! (`Y = 0.2989 R + 0.5870 G + 0.1140 B`, the Matlab/GIMP weights) and
//! replaced with black when `Y < threshold`, white otherwise.
//!
//! The weights are single-precision values widened to `f64`, which is what
//! the common C implementations of this formula compute with. Using the
//! decimal `f64` literals instead changes the truncated result for a few
//! hundred colors, e.g. (0, 72, 24).

use crate::pixel::{BLACK, Pixel, WHITE};

const R_WEIGHT: f64 = 0.2989_f32 as f64;
const G_WEIGHT: f64 = 0.5870_f32 as f64;
const B_WEIGHT: f64 = 0.1140_f32 as f64;

/// Grayscale intensity of a pixel, truncated toward zero.
///
/// The weights sum to about 0.99990002, so pure white maps to 254, not 255.
#[inline]
pub fn luminance(px: Pixel) -> u8 {
    let grey = R_WEIGHT * f64::from(px.r)
        + G_WEIGHT * f64::from(px.g)
        + B_WEIGHT * f64::from(px.b);
    // `as` saturates and drops the fraction.
    grey as u8
}

/// Replace every pixel with black or white, in place.
///
/// Returns the number of pixels that became black.
pub fn binarize(pixels: &mut [Pixel], threshold: u8) -> usize {
    let mut black = 0;
    for px in pixels.iter_mut() {
        if luminance(*px) < threshold {
            *px = BLACK;
            black += 1;
        } else {
            *px = WHITE;
        }
    }
    black
}
