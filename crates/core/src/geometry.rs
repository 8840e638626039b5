//! Pixel-space quad geometry for drawing the image.
//!
//! The image is drawn as a rectangle from (0,0) to (width, height) in
//! pixel coordinates, emitted as two triangles / six vertices. Texture
//! coordinates span the unit square and are paired with positions by
//! array index: vertex `i` samples texcoord `i`. Reordering one array
//! without the matching reorder in the other corrupts the sampling, so
//! both orderings live side by side in this module.

use crate::error::FilterError;

/// Texture coordinates for the six quad vertices, index-paired with
/// [`Quad::positions`]. Corner (0,0) in pixel space samples (0,0) in
/// texture space; (width, height) samples (1,1).
pub const TEX_COORDS: [f32; 12] = [
    0.0, 0.0, //
    1.0, 0.0, //
    0.0, 1.0, //
    0.0, 1.0, //
    1.0, 1.0, //
    1.0, 0.0, //
];

/// A quad covering (0,0)..(width, height) in pixel space as two triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    positions: [f32; 12],
    width: u32,
    height: u32,
}

impl Quad {
    /// Creates a quad sized to the given image dimensions.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidDimensions` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, FilterError> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidDimensions);
        }
        let (w, h) = (width as f32, height as f32);
        let positions = [
            0.0, 0.0, //
            w, 0.0, //
            0.0, h, //
            0.0, h, //
            w, h, //
            w, 0.0, //
        ];
        Ok(Self {
            positions,
            width,
            height,
        })
    }

    /// The six vertex positions as interleaved (x, y) pairs, index-paired
    /// with [`TEX_COORDS`].
    pub fn positions(&self) -> &[f32; 12] {
        &self.positions
    }

    /// Quad width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Quad height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}
