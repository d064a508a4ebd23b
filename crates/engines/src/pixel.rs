//! Pure-computation pixel buffer conversion from a [`Raster`].
//!
//! This module is always available (no feature gate) so that the `png`
//! snapshot path and any other byte-oriented consumer share one conversion.

use lava_lamp_core::raster::Raster;

/// Packs raster pixels into an RGBA8 buffer.
///
/// Each pixel is written as four bytes (R, G, B, 255). The buffer length is
/// `width * height * 4`.
pub fn raster_to_rgba(raster: &Raster) -> Vec<u8> {
    raster
        .pixels()
        .iter()
        .flat_map(|&c| {
            let [r, g, b] = c.to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}
