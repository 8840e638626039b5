//! Scratch render targets (FBO + texture) for intermediate passes.
//!
//! A `RenderTarget` pairs a framebuffer with an RGBA8 color attachment
//! sized to the source image. The pipeline allocates exactly two of
//! them and alternates destinations between consecutive passes, so each
//! pass samples the previous pass's fully resolved output.

use super::texture::create_texture;

/// An offscreen render target: a framebuffer whose single color
/// attachment is a clamped, nearest-filtered RGBA8 texture.
pub struct RenderTarget {
    fbo: glow::Framebuffer,
    texture: glow::Texture,
    width: u32,
    height: u32,
}

impl RenderTarget {
    /// Creates a render target at the given size.
    ///
    /// Allocates the texture, attaches it as `COLOR_ATTACHMENT0`, and
    /// verifies framebuffer completeness; both objects are deleted if
    /// the framebuffer is incomplete.
    ///
    /// # Errors
    ///
    /// Returns an error string if allocation fails or the framebuffer
    /// is not complete.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, width: u32, height: u32) -> Result<Self, String> {
        use glow::HasContext;

        let texture = create_texture(gl, width, height, None)?;

        // SAFETY: glow wraps raw GL calls as unsafe. texture is a valid
        // handle from create_texture; both objects are deleted on the
        // incomplete-framebuffer path.
        let fbo = unsafe {
            match gl.create_framebuffer() {
                Ok(f) => f,
                Err(e) => {
                    gl.delete_texture(texture);
                    return Err(e);
                }
            }
        };

        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(fbo);
                gl.delete_texture(texture);
                return Err(format!("framebuffer incomplete: status 0x{status:04X}"));
            }
        }

        Ok(Self {
            fbo,
            texture,
            width,
            height,
        })
    }

    /// Binds this target as the draw destination and sets the viewport
    /// to its full extent.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.fbo is a valid framebuffer handle from new().
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            gl.viewport(0, 0, self.width as i32, self.height as i32);
        }
    }

    /// The attached texture, sampled by the next pass.
    pub fn texture(&self) -> glow::Texture {
        self.texture
    }

    /// Target width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Target height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Deletes the framebuffer and texture.
    ///
    /// GL objects have no destructor; call this before dropping the
    /// target for deterministic cleanup.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: both handles are valid objects created in new().
        unsafe {
            gl.delete_framebuffer(self.fbo);
            gl.delete_texture(self.texture);
        }
    }
}
