//! Image load and PNG snapshot I/O.
//!
//! Feature-gated behind `png` (default on) so GL-only builds can use
//! the registry and CPU path without pulling in the image crate. Load
//! failure is a typed error the caller must handle, not a callback that
//! silently never fires.

use filter_chain_core::FilterError;
use std::path::Path;

/// Loads an image and decodes it to an RGBA8 buffer.
///
/// Returns `(pixels, width, height)` with `pixels.len() == width * height * 4`.
///
/// # Errors
///
/// Returns `FilterError::Load` naming the path if the file cannot be
/// read or decoded.
pub fn load_rgba(path: &Path) -> Result<(Vec<u8>, u32, u32), FilterError> {
    let img = image::open(path)
        .map_err(|e| FilterError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok((img.into_raw(), width, height))
}

/// Writes an RGBA8 buffer as a PNG image.
///
/// # Errors
///
/// Returns `FilterError::InvalidDimensions` if the buffer does not
/// match `width * height * 4`, or `FilterError::Io` on write failure.
pub fn write_png(pixels: Vec<u8>, width: u32, height: u32, path: &Path) -> Result<(), FilterError> {
    let img = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or(FilterError::InvalidDimensions)?;
    img.save(path).map_err(|e| FilterError::Io(e.to_string()))
}
