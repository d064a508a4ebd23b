//! CPU-side PNG output of a [`Raster`].
//!
//! This module is feature-gated behind `png` (default on) so that builds that
//! never write files can skip the `image` crate. The pixel buffer conversion
//! itself lives in [`crate::pixel`] (always available).

use lava_lamp_core::error::EngineError;
use lava_lamp_core::raster::Raster;
use std::path::Path;

use crate::pixel::raster_to_rgba;

/// Writes a raster as a PNG image.
///
/// Returns `EngineError::InvalidDimensions` if the raster dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), EngineError> {
    let rgba = raster_to_rgba(raster);
    let w = u32::try_from(raster.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_seed;
    use lava_lamp_core::seed::Seed;
    use lava_lamp_core::Srgb;

    #[test]
    fn write_png_round_trip() {
        let raster = render_seed(&Seed::new("metaballs", 64, 48, 3).with_frames(2), Srgb::BLACK)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lamp.png");

        write_png(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
        assert_eq!(img.into_raw(), raster_to_rgba(&raster));
    }

    #[test]
    fn write_png_into_missing_directory_is_io_error() {
        let raster = Raster::new(4, 4, Srgb::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.png");
        assert!(matches!(write_png(&raster, &path), Err(EngineError::Io(_))));
    }
}
