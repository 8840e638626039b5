//! GPU context wrapper with texture-size limits.
//!
//! `GpuContext` wraps a `glow::Context` and records `MAX_TEXTURE_SIZE`
//! at initialization so the pipeline can reject oversized source
//! images up front instead of failing inside texture allocation.

use crate::error::FilterError;

/// Wraps a `glow::Context` with the queried texture-size limit.
pub struct GpuContext {
    gl: glow::Context,
    max_texture_size: u32,
}

impl GpuContext {
    /// Wraps the given GL context, querying `MAX_TEXTURE_SIZE`.
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context) -> Self {
        use glow::HasContext;

        // SAFETY: glow wraps raw GL calls as unsafe. MAX_TEXTURE_SIZE is
        // a valid integer query on every GL / GLES / WebGL2 context.
        let max_texture_size = unsafe { gl.get_parameter_i32(glow::MAX_TEXTURE_SIZE) }.max(0) as u32;

        Self {
            gl,
            max_texture_size,
        }
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Consumes this wrapper and returns the underlying `glow::Context`.
    pub fn into_gl(self) -> glow::Context {
        self.gl
    }

    /// The driver's maximum texture dimension.
    pub fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }

    /// Checks that an image of the given size fits in a single texture.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidDimensions` for a zero dimension, or
    /// `FilterError::ImageTooLarge` if either dimension exceeds the limit.
    pub fn check_image_size(&self, width: u32, height: u32) -> Result<(), FilterError> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidDimensions);
        }
        if width > self.max_texture_size || height > self.max_texture_size {
            return Err(FilterError::ImageTooLarge {
                width,
                height,
                max: self.max_texture_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // GpuContext requires a live GL context, so integration tests are ignored.

    #[test]
    fn gpu_context_exposes_expected_api() {
        // Compile-time check that the public API exists.
        fn _assert_api(ctx: &GpuContext) {
            let _gl: &glow::Context = ctx.gl();
            let _max: u32 = ctx.max_texture_size();
            let _check: Result<(), FilterError> = ctx.check_image_size(1, 1);
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_queries_a_positive_texture_limit() {
        // Would test: GpuContext::new(gl).max_texture_size() >= 2048
        // (the GLES 3.0 minimum).
    }

    #[test]
    #[ignore = "requires GL context"]
    fn check_image_size_rejects_oversized_images() {
        // Would test: check_image_size(max + 1, 1) returns ImageTooLarge.
    }
}
